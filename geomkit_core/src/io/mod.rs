//! Value readers and writers with a compile-time byte order.
//!
//! The readers operate on borrowed byte slices, the writers collect into an in-memory [`Blob`](crate::Blob).
//! Both are generic over a [`byteorder::ByteOrder`], so little and big endian data share one implementation.

mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_blob;

pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_blob::*;
