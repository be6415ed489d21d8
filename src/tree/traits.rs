//! Geometry services the depth-ordering tree depends on.
//!
//! The tree never clips or triangulates by itself; it asks an implementation
//! of [`GeometryOps`] so tests can substitute a deterministic stub.

use crate::errors::GeometryError;
use crate::float_types::Real;
use geo::{MultiPolygon, Polygon as GeoPolygon};
use nalgebra::Point3;

pub trait GeometryOps {
    /// Area of `subject` not covered by `clip`, as zero or more polygons.
    ///
    /// Collinear, repeated, or non-finite input must produce an empty result
    /// rather than an error.
    fn clip_difference(
        &mut self,
        subject: &[Point3<Real>; 3],
        clip: &[Point3<Real>; 3],
    ) -> MultiPolygon<Real>;

    /// Triangles (z = 0) that exactly tile `polygon`, holes included.
    fn triangulate(
        &mut self,
        polygon: &GeoPolygon<Real>,
    ) -> Result<Vec<[Point3<Real>; 3]>, GeometryError>;
}
