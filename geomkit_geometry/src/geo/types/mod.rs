mod circularstring;
mod compound;
mod curve;
mod linestring;
mod macros;
mod part;
mod polygon;
mod traits;
mod vertex;

pub use circularstring::*;
pub use compound::*;
pub use curve::*;
pub use linestring::*;
pub use part::*;
pub use polygon::*;
pub use traits::*;
pub use vertex::*;
