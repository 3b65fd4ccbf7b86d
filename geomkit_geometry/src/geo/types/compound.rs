use super::{
	CircularString, GeometryTrait, LineString, Vertex, linestring::out_of_range, merge_bounds,
};
use crate::GeometryError;
use anyhow::{Result, bail, ensure};
use std::fmt::Debug;

/// One run of a compound curve: straight segments or circular arcs.
#[derive(Clone, PartialEq)]
pub enum Segment {
	Line(LineString),
	Arc(CircularString),
}

impl Segment {
	#[must_use]
	pub fn vertices(&self) -> &Vec<Vertex> {
		match self {
			Segment::Line(line) => &line.0,
			Segment::Arc(arc) => &arc.0,
		}
	}

	pub fn vertices_mut(&mut self) -> &mut Vec<Vertex> {
		match self {
			Segment::Line(line) => &mut line.0,
			Segment::Arc(arc) => &mut arc.0,
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.vertices().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.vertices().is_empty()
	}

	#[must_use]
	pub fn first(&self) -> Option<&Vertex> {
		self.vertices().first()
	}

	#[must_use]
	pub fn last(&self) -> Option<&Vertex> {
		self.vertices().last()
	}

	fn insert_vertex(&mut self, index: usize, vertex: Vertex) -> Result<()> {
		match self {
			Segment::Line(line) => line.insert_vertex(index, vertex),
			Segment::Arc(arc) => arc.insert_vertex(index, vertex),
		}
	}

	fn delete_vertex(&mut self, index: usize) -> Result<()> {
		match self {
			Segment::Line(line) => line.delete_vertex(index),
			Segment::Arc(arc) => arc.delete_vertex(index),
		}
	}

	fn verify(&self) -> Result<()> {
		match self {
			Segment::Line(line) => {
				ensure!(
					line.0.len() >= 2,
					GeometryError::structural("a straight segment of a CompoundCurve needs at least 2 vertices")
				);
				Ok(())
			}
			Segment::Arc(arc) => arc.verify(),
		}
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		match self {
			Segment::Line(line) => line.compute_bounds(),
			Segment::Arc(arc) => arc.compute_bounds(),
		}
	}
}

impl Debug for Segment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Segment::Line(line) => f.debug_tuple("Line").field(&line.0).finish(),
			Segment::Arc(arc) => arc.fmt(f),
		}
	}
}

/// A curve made of contiguous straight and circular segments.
///
/// The end vertex of each segment is the start vertex of the next one. Vertex indices count such
/// a junction once.
#[derive(Clone, Default, PartialEq)]
pub struct CompoundCurve(pub Vec<Segment>);

impl CompoundCurve {
	/// Finds the storage location(s) of vertex `index` as `(segment, position)`.
	///
	/// A junction vertex has two locations: the end of one segment and the start of the next.
	/// Returns an empty list if `index` is out of range.
	#[must_use]
	pub fn locate(&self, index: usize) -> Vec<(usize, usize)> {
		let mut offset = 0;
		for (s, segment) in self.0.iter().enumerate() {
			let len = segment.len();
			if len == 0 {
				continue;
			}
			if index < offset + len {
				let position = index - offset;
				let mut locations = vec![(s, position)];
				if position == len - 1 && s + 1 < self.0.len() {
					locations.push((s + 1, 0));
				}
				return locations;
			}
			offset += len - 1;
		}
		Vec::new()
	}

	#[must_use]
	pub fn vertex(&self, index: usize) -> Option<&Vertex> {
		let (s, position) = *self.locate(index).first()?;
		self.0[s].vertices().get(position)
	}

	/// All vertices in order, junctions once.
	#[must_use]
	pub fn points(&self) -> Vec<Vertex> {
		let mut points: Vec<Vertex> = Vec::new();
		for segment in &self.0 {
			let skip = usize::from(!points.is_empty());
			points.extend(segment.vertices().iter().skip(skip));
		}
		points
	}

	/// Vertices of the chord polygon: all vertices of straight segments, only arc end points of
	/// circular segments.
	#[must_use]
	pub fn chord_points(&self) -> Vec<Vertex> {
		let mut points: Vec<Vertex> = Vec::new();
		for segment in &self.0 {
			let skip = usize::from(!points.is_empty());
			match segment {
				Segment::Line(line) => points.extend(line.0.iter().skip(skip)),
				Segment::Arc(arc) => points.extend(arc.0.iter().step_by(2).skip(skip)),
			}
		}
		points
	}

	#[must_use]
	pub fn arc_segment_area(&self) -> f64 {
		self
			.0
			.iter()
			.map(|segment| match segment {
				Segment::Line(_) => 0.0,
				Segment::Arc(arc) => arc.arc_segment_area(),
			})
			.sum()
	}

	#[must_use]
	pub fn is_closed(&self) -> bool {
		match (self.0.first().and_then(Segment::first), self.0.last().and_then(Segment::last)) {
			(Some(first), Some(last)) => first.same_xy(last) && first.z == last.z,
			_ => false,
		}
	}

	/// Overwrites vertex `index` in every segment that stores it.
	pub fn set_vertex(&mut self, index: usize, vertex: Vertex) -> Result<()> {
		let locations = self.locate(index);
		if locations.is_empty() {
			return Err(out_of_range(index, self.vertex_count()));
		}
		for (s, position) in locations {
			self.0[s].vertices_mut()[position] = vertex;
		}
		Ok(())
	}

	/// Inserts `vertex` before vertex `index`; `index == vertex_count` appends to the last segment.
	///
	/// Before a junction the vertex goes into the segment that ends at the junction.
	pub fn insert_vertex(&mut self, index: usize, vertex: Vertex) -> Result<()> {
		let count = self.vertex_count();
		if index > count {
			return Err(out_of_range(index, count + 1));
		}
		let (s, position) = if index == count {
			let Some(last) = self.0.last() else {
				bail!(GeometryError::structural("cannot insert into an empty CompoundCurve"));
			};
			(self.0.len() - 1, last.len())
		} else {
			self.locate(index)[0]
		};
		self.0[s].insert_vertex(position, vertex)
	}

	/// Deletes vertex `index`.
	///
	/// Inside a segment the segment's own rule applies and an emptied segment is replaced by a
	/// straight connection of its neighbours. At a junction both adjacent segments lose the vertex:
	/// a line followed by a longer arc moves its end to the arc's next arc point, an arc followed by
	/// a line pulls the line start onto the arc's new end, two vanished segments become one
	/// straight segment, and any remaining gap is bridged by a straight segment.
	pub fn delete_vertex(&mut self, index: usize) -> Result<()> {
		let locations = self.locate(index);
		match locations.as_slice() {
			[] => Err(out_of_range(index, self.vertex_count())),
			[(s, position)] => {
				let s = *s;
				self.0[s].delete_vertex(*position)?;
				if self.0[s].is_empty() {
					self.0.remove(s);
					if s > 0 && s < self.0.len() {
						self.bridge(s - 1);
					}
				}
				Ok(())
			}
			[(s, _), ..] => self.delete_junction(*s),
		}
	}

	fn delete_junction(&mut self, s: usize) -> Result<()> {
		let (Some(a_start), Some(b_end)) = (self.0[s].first().copied(), self.0[s + 1].last().copied()) else {
			bail!(GeometryError::structural("CompoundCurve contains an empty segment"));
		};

		let (head, tail) = self.0.split_at_mut(s + 1);
		match (&mut head[s], &mut tail[0]) {
			(Segment::Line(line), Segment::Arc(arc)) if arc.0.len() > 3 => {
				let arc_point = arc.0[2];
				if let Some(end) = line.0.last_mut() {
					*end = arc_point;
				}
				arc.delete_vertex(0)?;
			}
			(Segment::Arc(arc), Segment::Line(line)) if arc.0.len() > 3 => {
				arc.delete_vertex(arc.0.len() - 1)?;
				if let (Some(end), Some(start)) = (arc.0.last(), line.0.first_mut()) {
					*start = *end;
				}
			}
			(a, b) => {
				a.delete_vertex(a.len() - 1)?;
				b.delete_vertex(0)?;
			}
		}

		match (self.0[s].is_empty(), self.0[s + 1].is_empty()) {
			(true, true) => {
				self.0.splice(s..=s + 1, [straight(a_start, b_end)]);
			}
			(true, false) => {
				self.0.remove(s);
				if let Some(start) = self.0[s].first().copied()
					&& !start.same_xy(&a_start)
				{
					self.0.insert(s, straight(a_start, start));
				}
			}
			(false, true) => {
				self.0.remove(s + 1);
				if let Some(end) = self.0[s].last().copied()
					&& !end.same_xy(&b_end)
				{
					self.0.insert(s + 1, straight(end, b_end));
				}
			}
			(false, false) => self.bridge(s),
		}
		Ok(())
	}

	/// Inserts a straight segment between segment `s` and `s + 1` if they do not touch.
	fn bridge(&mut self, s: usize) {
		let (Some(end), Some(start)) = (
			self.0.get(s).and_then(Segment::last).copied(),
			self.0.get(s + 1).and_then(Segment::first).copied(),
		) else {
			return;
		};
		if !end.same_xy(&start) {
			self.0.insert(s + 1, straight(end, start));
		}
	}
}

fn straight(a: Vertex, b: Vertex) -> Segment {
	Segment::Line(LineString(vec![a, b]))
}

impl GeometryTrait for CompoundCurve {
	fn area(&self) -> f64 {
		0.0
	}

	fn verify(&self) -> Result<()> {
		ensure!(
			!self.0.is_empty(),
			GeometryError::structural("CompoundCurve must contain at least one segment")
		);
		for segment in &self.0 {
			segment.verify()?;
		}
		for pair in self.0.windows(2) {
			let (Some(end), Some(start)) = (pair[0].last(), pair[1].first()) else {
				continue;
			};
			ensure!(
				end.same_xy(start),
				GeometryError::structural(format!(
					"CompoundCurve segments are not contiguous: {end:?} does not meet {start:?}"
				))
			);
		}
		Ok(())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		self
			.0
			.iter()
			.fold(None, |bbox, segment| merge_bounds(bbox, segment.compute_bounds()))
	}

	fn vertex_count(&self) -> usize {
		let stored: usize = self.0.iter().map(Segment::len).sum();
		let non_empty = self.0.iter().filter(|segment| !segment.is_empty()).count();
		stored - non_empty.saturating_sub(1)
	}

	fn for_each_vertex_mut(&mut self, f: &mut dyn FnMut(&mut Vertex)) {
		for segment in &mut self.0 {
			segment.vertices_mut().iter_mut().for_each(&mut *f);
		}
	}
}

impl Debug for CompoundCurve {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Compound").field(&self.0).finish()
	}
}
