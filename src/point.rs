use crate::error::{KMeansError, Result};
use ndarray::{Array2, ArrayView2};
use std::fmt;
use std::ops::Index;

/// Smallest capacity a [`PointBuffer`] allocates on its first append
pub const MIN_CAPACITY: usize = 8;

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

/// Growable, ordered list of points holding the members of one cluster.
///
/// Capacity doubles whenever the buffer is full, starting at [`MIN_CAPACITY`].
/// Growth goes through `try_reserve_exact`, so an allocation failure comes
/// back as [`KMeansError::AllocationFailure`] instead of aborting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointBuffer {
    items: Vec<Point>,
}

impl PointBuffer {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a point, doubling the capacity if the buffer is full.
    pub fn push(&mut self, point: Point) -> Result<()> {
        if self.items.len() == self.items.capacity() {
            let capacity = (self.items.capacity() * 2).max(MIN_CAPACITY);
            self.items
                .try_reserve_exact(capacity - self.items.len())
                .map_err(KMeansError::AllocationFailure)?;
        }
        self.items.push(point);
        Ok(())
    }

    /// Drop all points and release the backing storage.
    pub fn clear(&mut self) {
        self.items = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.items
    }

    /// Arithmetic mean of the buffered points, `None` when empty.
    pub fn mean(&self) -> Option<Point> {
        if self.items.is_empty() {
            return None;
        }

        let (sum_x, sum_y) = self
            .items
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
        let count = self.items.len() as f32;

        Some(Point::new(sum_x / count, sum_y / count))
    }
}

impl Index<usize> for PointBuffer {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a PointBuffer {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for PointBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for point in &self.items {
            write!(f, "{} ", point)?;
        }
        write!(f, "]")
    }
}

/// Convert an `(n, 2)` array into points, one per row.
pub fn points_from_array(data: &ArrayView2<f32>) -> Result<Vec<Point>> {
    if data.ncols() != 2 {
        return Err(KMeansError::InvalidDimensions(format!(
            "Expected 2 features, got {}",
            data.ncols()
        )));
    }

    Ok(data
        .outer_iter()
        .map(|row| Point::new(row[0], row[1]))
        .collect())
}

/// Stack points into an `(n, 2)` array.
pub fn points_to_array(points: &[Point]) -> Array2<f32> {
    let mut array = Array2::zeros((points.len(), 2));
    for (i, point) in points.iter().enumerate() {
        array[[i, 0]] = point.x;
        array[[i, 1]] = point.y;
    }
    array
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_push_grows_by_doubling() {
        let mut buffer = PointBuffer::new();
        assert_eq!(buffer.capacity(), 0);

        buffer.push(Point::new(1.0, 2.0)).unwrap();
        assert!(buffer.capacity() >= MIN_CAPACITY);

        for i in 0..20 {
            buffer.push(Point::new(i as f32, 0.0)).unwrap();
        }
        assert_eq!(buffer.len(), 21);
        assert!(buffer.capacity() >= 21);
        assert_eq!(buffer[0], Point::new(1.0, 2.0));
        assert_eq!(buffer.get(21), None);
    }

    #[test]
    fn test_clear_releases_storage() {
        let mut buffer = PointBuffer::new();
        buffer.push(Point::new(1.0, 1.0)).unwrap();
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_display() {
        let mut buffer = PointBuffer::new();
        assert_eq!(buffer.to_string(), "[ ]");

        buffer.push(Point::new(1.0, -2.5)).unwrap();
        buffer.push(Point::new(0.0, 3.0)).unwrap();
        assert_eq!(
            buffer.to_string(),
            "[ (1.000000, -2.500000) (0.000000, 3.000000) ]"
        );
    }

    #[test]
    fn test_mean() {
        let mut buffer = PointBuffer::new();
        assert!(buffer.mean().is_none());

        buffer.push(Point::new(0.0, 0.0)).unwrap();
        buffer.push(Point::new(2.0, 4.0)).unwrap();
        let mean = buffer.mean().unwrap();

        assert_relative_eq!(mean.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(mean.y, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_array_conversion() {
        let data = array![[1.0f32, 2.0], [3.0, 4.0]];
        let points = points_from_array(&data.view()).unwrap();
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(points_to_array(&points), data);

        let wide = array![[1.0f32, 2.0, 3.0]];
        assert!(matches!(
            points_from_array(&wide.view()),
            Err(KMeansError::InvalidDimensions(_))
        ));
    }
}
