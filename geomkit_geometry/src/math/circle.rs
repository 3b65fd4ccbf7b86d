//! Circular arc helpers for arcs given by start, intermediate and end point.

use crate::Vertex;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const EPSILON: f64 = 1e-12;

/// A circle through three points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
	pub center_x: f64,
	pub center_y: f64,
	pub radius: f64,
}

impl Circle {
	/// The circle through `p1`, `p2` and `p3`, or `None` if the points are collinear.
	///
	/// If `p1` and `p3` coincide the arc is a full circle and `p2` is the opposite point.
	#[must_use]
	pub fn through(p1: &Vertex, p2: &Vertex, p3: &Vertex) -> Option<Circle> {
		if same_xy(p1, p3) {
			if same_xy(p1, p2) {
				return None;
			}
			let center_x = (p1.x + p2.x) / 2.0;
			let center_y = (p1.y + p2.y) / 2.0;
			let radius = ((p1.x - p2.x).hypot(p1.y - p2.y)) / 2.0;
			return Some(Circle {
				center_x,
				center_y,
				radius,
			});
		}

		let (ax, ay) = (p2.x - p1.x, p2.y - p1.y);
		let (bx, by) = (p3.x - p1.x, p3.y - p1.y);
		let d = 2.0 * (ax * by - ay * bx);
		let scale = (ax.abs() + ay.abs()) * (bx.abs() + by.abs());
		if d.abs() <= EPSILON * scale.max(1.0) {
			return None;
		}
		let a2 = ax * ax + ay * ay;
		let b2 = bx * bx + by * by;
		let ux = (by * a2 - ay * b2) / d;
		let uy = (ax * b2 - bx * a2) / d;
		Some(Circle {
			center_x: p1.x + ux,
			center_y: p1.y + uy,
			radius: ux.hypot(uy),
		})
	}

	/// Angle of a point seen from the center, in `[0, 2π)`.
	#[must_use]
	pub fn angle_of(&self, x: f64, y: f64) -> f64 {
		(y - self.center_y).atan2(x - self.center_x).rem_euclid(TAU)
	}

	#[must_use]
	pub fn point_at(&self, angle: f64) -> (f64, f64) {
		(
			self.center_x + self.radius * angle.cos(),
			self.center_y + self.radius * angle.sin(),
		)
	}
}

/// Signed sweep angle from `p1` through `p2` to `p3`, counter-clockwise positive.
///
/// Returns `None` for collinear points. A full circle (`p1 == p3`) sweeps `2π`.
#[must_use]
pub fn arc_sweep(p1: &Vertex, p2: &Vertex, p3: &Vertex) -> Option<(Circle, f64)> {
	let circle = Circle::through(p1, p2, p3)?;
	if same_xy(p1, p3) {
		return Some((circle, TAU));
	}
	let a1 = circle.angle_of(p1.x, p1.y);
	let a2 = circle.angle_of(p2.x, p2.y);
	let a3 = circle.angle_of(p3.x, p3.y);
	let to_end = (a3 - a1).rem_euclid(TAU);
	let to_mid = (a2 - a1).rem_euclid(TAU);
	let sweep = if to_mid < to_end { to_end } else { to_end - TAU };
	Some((circle, sweep))
}

/// Bounding box `[x_min, y_min, x_max, y_max]` of the arc `p1`, `p2`, `p3`.
///
/// Includes the compass points of the circle that the arc passes. Collinear arcs are treated as
/// the straight run through their three points.
#[must_use]
pub fn arc_bounds(p1: &Vertex, p2: &Vertex, p3: &Vertex) -> [f64; 4] {
	let mut bbox = [p1.x, p1.y, p1.x, p1.y];
	extend_bounds(&mut bbox, p3.x, p3.y);

	let Some((circle, sweep)) = arc_sweep(p1, p2, p3) else {
		extend_bounds(&mut bbox, p2.x, p2.y);
		return bbox;
	};

	let start = circle.angle_of(p1.x, p1.y);
	for compass in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
		let offset = if sweep >= 0.0 {
			(compass - start).rem_euclid(TAU)
		} else {
			(start - compass).rem_euclid(TAU)
		};
		if offset <= sweep.abs() {
			let (x, y) = circle.point_at(compass);
			extend_bounds(&mut bbox, x, y);
		}
	}
	bbox
}

/// Signed area between the chord `p1`→`p3` and the arc through `p2`.
///
/// Adding this to the shoelace area of the chords gives the area enclosed by a curved ring.
#[must_use]
pub fn arc_segment_area(p1: &Vertex, p2: &Vertex, p3: &Vertex) -> f64 {
	match arc_sweep(p1, p2, p3) {
		Some((circle, sweep)) => circle.radius * circle.radius * (sweep - sweep.sin()) / 2.0,
		None => 0.0,
	}
}

/// A point on the circle through `after`, `before` and `on_circle`, halfway between `after` and
/// `before` on the side facing the chord midpoint.
///
/// Falls back to the chord midpoint when the points are collinear or the chord is a diameter.
/// Z and M are averaged from `after` and `before`.
#[must_use]
pub fn point_between_on_circle(after: &Vertex, before: &Vertex, on_circle: &Vertex) -> Vertex {
	let mid_x = (after.x + before.x) / 2.0;
	let mid_y = (after.y + before.y) / 2.0;
	let mut result = Vertex {
		x: mid_x,
		y: mid_y,
		z: average(after.z, before.z),
		m: average(after.m, before.m),
	};

	if let Some(circle) = Circle::through(after, before, on_circle) {
		let dx = mid_x - circle.center_x;
		let dy = mid_y - circle.center_y;
		let distance = dx.hypot(dy);
		if distance > EPSILON * circle.radius.max(1.0) {
			result.x = circle.center_x + dx / distance * circle.radius;
			result.y = circle.center_y + dy / distance * circle.radius;
		}
	}
	result
}

fn average(a: Option<f64>, b: Option<f64>) -> Option<f64> {
	match (a, b) {
		(Some(a), Some(b)) => Some((a + b) / 2.0),
		(a, b) => a.or(b),
	}
}

fn same_xy(a: &Vertex, b: &Vertex) -> bool {
	a.x == b.x && a.y == b.y
}

pub(crate) fn extend_bounds(bbox: &mut [f64; 4], x: f64, y: f64) {
	bbox[0] = bbox[0].min(x);
	bbox[1] = bbox[1].min(y);
	bbox[2] = bbox[2].max(x);
	bbox[3] = bbox[3].max(y);
}
