use crate::Vertex;

/// Signed area of a closed vertex loop (shoelace formula), counter-clockwise positive.
///
/// The loop is closed implicitly, so a repeated closing vertex does not change the result.
pub fn signed_ring_area(vertices: &[Vertex]) -> f64 {
	let Some(mut p2) = vertices.last() else {
		return 0.0;
	};
	let mut sum = 0f64;
	for p1 in vertices {
		sum += (p2.x - p1.x) * (p1.y + p2.y);
		p2 = p1;
	}
	sum / 2.0
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ring(points: &[[f64; 2]]) -> Vec<Vertex> {
		points.iter().map(|p| Vertex::new(p[0], p[1])).collect()
	}

	#[test]
	fn counter_clockwise_is_positive() {
		let square = ring(&[[0.0, 0.0], [5.0, 0.0], [5.0, 5.0], [0.0, 5.0], [0.0, 0.0]]);
		assert_eq!(signed_ring_area(&square), 25.0);
	}

	#[test]
	fn clockwise_is_negative() {
		let square = ring(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]]);
		assert_eq!(signed_ring_area(&square), -4.0);
	}

	#[test]
	fn degenerate() {
		assert_eq!(signed_ring_area(&[]), 0.0);
		assert_eq!(signed_ring_area(&ring(&[[1.0, 1.0]])), 0.0);
	}
}
