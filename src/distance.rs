use crate::point::Point;

/// Euclidean (L2) distance between two points
#[inline]
pub fn euclidean_distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Find the index of the centroid closest to `point`.
///
/// Comparison is strict, so on a tie the lowest index wins.
/// Returns `None` only when `centroids` is empty.
#[inline]
pub fn nearest_centroid(point: Point, centroids: &[Point]) -> Option<usize> {
    let mut best_label = None;
    let mut best_dist = f32::INFINITY;

    for (j, &centroid) in centroids.iter().enumerate() {
        let dist = euclidean_distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_label = Some(j);
        }
    }

    // Every distance was NaN; fall back to the first centroid
    if best_label.is_none() && !centroids.is_empty() {
        best_label = Some(0);
    }

    best_label
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euclidean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);

        assert_relative_eq!(euclidean_distance(a, b), 5.0, epsilon = 1e-6);
        assert_relative_eq!(euclidean_distance(b, a), 5.0, epsilon = 1e-6);
        assert_eq!(euclidean_distance(b, b), 0.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let points = [
            Point::new(-1.5, 2.0),
            Point::new(10.0, -7.25),
            Point::new(0.1, 0.2),
        ];
        for &a in &points {
            for &b in &points {
                assert_eq!(euclidean_distance(a, b), euclidean_distance(b, a));
            }
            assert_eq!(euclidean_distance(a, a), 0.0);
        }
    }

    #[test]
    fn test_find_nearest_centroid() {
        let centroids = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];

        assert_eq!(nearest_centroid(Point::new(0.0, 0.0), &centroids), Some(0));
        assert_eq!(nearest_centroid(Point::new(10.0, 10.0), &centroids), Some(1));
        // (5,5) is equidistant, first centroid wins
        assert_eq!(nearest_centroid(Point::new(5.0, 5.0), &centroids), Some(0));
        assert_eq!(nearest_centroid(Point::new(5.0, 5.0), &[]), None);
    }
}
