//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

use crate::{IndexedMesh, MeshError, MeshResult};

/// An axis-aligned bounding box (AABB).
///
/// Defined by its minimum and maximum corners. A box built from a single
/// point has `min == max` and zero volume.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert_eq!(aabb.size(), Point3::new(10.0, 10.0, 10.0).coords);
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from two corners.
    ///
    /// The corners are reordered per axis if `min > max`.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create a zero-volume AABB around a single point.
    #[inline]
    #[must_use]
    pub const fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create a bounding box from an iterator of points in one pass.
    ///
    /// Returns `None` if the iterator is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let points = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(10.0, 5.0, 3.0),
    ///     Point3::new(-2.0, 8.0, 1.0),
    /// ];
    ///
    /// let aabb = Aabb::from_points(points.iter()).unwrap();
    /// assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
    ///
    /// assert!(Aabb::from_points(std::iter::empty()).is_none());
    /// ```
    #[must_use]
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let first = points.next()?;
        let mut aabb = Self::from_point(*first);
        for point in points {
            aabb.expand_to_include(point);
        }
        Some(aabb)
    }

    /// Get the size (width, depth, height) of the box.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Get the center of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Get the diagonal length of the box.
    #[inline]
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.size().norm()
    }

    /// Check if the box contains a point. Boundary points are inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Grow the box to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Compute the enclosing box of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = *self;
        result.expand_to_include(&other.min);
        result.expand_to_include(&other.max);
        result
    }

    /// Minimum corner as a plain array.
    #[inline]
    #[must_use]
    pub fn min_array(&self) -> [f64; 3] {
        [self.min.x, self.min.y, self.min.z]
    }

    /// Maximum corner as a plain array.
    #[inline]
    #[must_use]
    pub fn max_array(&self) -> [f64; 3] {
        [self.max.x, self.max.y, self.max.z]
    }
}

/// Compute the axis-aligned bounding box of a mesh's vertices.
///
/// Faces are not consulted: unreferenced vertices still count.
///
/// # Errors
///
/// Returns [`MeshError::EmptyMesh`] if the mesh has no vertices.
///
/// # Example
///
/// ```
/// use mesh_types::{compute_bounding_box, IndexedMesh, Point3, Vertex};
///
/// let mesh = IndexedMesh::from_parts(vec![Vertex::from_coords(1.0, 2.0, 3.0)], vec![]);
/// let bounds = compute_bounding_box(&mesh).unwrap();
/// assert_eq!(bounds.min, Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(bounds.max, bounds.min);
///
/// assert!(compute_bounding_box(&IndexedMesh::new()).is_err());
/// ```
pub fn compute_bounding_box(mesh: &IndexedMesh) -> MeshResult<Aabb> {
    Aabb::from_points(mesh.vertices.iter().map(|v| &v.position))
        .ok_or_else(|| MeshError::empty(mesh.vertices.len(), mesh.faces.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vertex;

    #[test]
    fn aabb_from_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
            Point3::new(-2.0, 8.0, 1.0),
        ];

        let aabb = Aabb::from_points(points.iter());
        assert!(aabb.is_some());
        if let Some(aabb) = aabb {
            assert!((aabb.min.x - (-2.0)).abs() < f64::EPSILON);
            assert!((aabb.min.y - 0.0).abs() < f64::EPSILON);
            assert!((aabb.max.x - 10.0).abs() < f64::EPSILON);
            assert!((aabb.max.y - 8.0).abs() < f64::EPSILON);
            assert!((aabb.max.z - 3.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn aabb_new_reorders_corners() {
        let aabb = Aabb::new(Point3::new(5.0, 0.0, 2.0), Point3::new(1.0, 3.0, -1.0));
        assert_eq!(aabb.min, Point3::new(1.0, 0.0, -1.0));
        assert_eq!(aabb.max, Point3::new(5.0, 3.0, 2.0));
    }

    #[test]
    fn single_vertex_bounds_collapse_to_point() {
        let mesh = IndexedMesh::from_parts(vec![Vertex::from_coords(1.0, 2.0, 3.0)], vec![]);
        let bounds = compute_bounding_box(&mesh);
        assert_eq!(
            bounds,
            Ok(Aabb::from_point(Point3::new(1.0, 2.0, 3.0)))
        );
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        let result = compute_bounding_box(&IndexedMesh::new());
        assert_eq!(result, Err(MeshError::empty(0, 0)));
    }

    #[test]
    fn negative_coordinates_bound_correctly() {
        let mesh = IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(-1.0, -1.0, 0.0),
                Vertex::from_coords(-0.5, -0.25, 0.75),
            ],
            vec![],
        );
        let bounds = compute_bounding_box(&mesh);
        assert!(bounds.is_ok());
        if let Ok(b) = bounds {
            assert_eq!(b.min_array(), [-1.0, -1.0, 0.0]);
            assert_eq!(b.max_array(), [-0.5, -0.25, 0.75]);
        }
    }

    #[test]
    fn aabb_contains_and_union() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 5.0, 5.0));
        let b = Aabb::new(Point3::new(3.0, 3.0, 3.0), Point3::new(10.0, 10.0, 10.0));
        let u = a.union(&b);

        assert!(a.contains(&Point3::new(0.0, 0.0, 0.0)));
        assert!(!a.contains(&Point3::new(-1.0, 5.0, 5.0)));
        assert_eq!(u.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(u.max, Point3::new(10.0, 10.0, 10.0));
        assert_eq!(u.center(), Point3::new(5.0, 5.0, 5.0));
    }
}
