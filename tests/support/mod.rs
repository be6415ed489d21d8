//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use geo::{Coord, LineString, MultiPolygon, Polygon as GeoPolygon};
use nalgebra::Point3;
use painter3d::{
    Camera, CameraState, GeometryError, GeometryOps, Real, Scene, Triangle, polygon::area,
};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A 10x10x10 box with its corner at the origin.
pub fn reference_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_hexahedron(Point3::origin(), 10.0, 10.0, 10.0);
    scene
}

/// 30 units in front of the reference box, 75 degree FOV at 16:9.
pub fn reference_camera() -> CameraState {
    Camera::new_at(0.0, 0.0, -30.0, 75.0, 16.0 / 9.0).state()
}

/// Helper to make a projected triangle from `(h, v)` pairs.
pub fn tri<S: Clone>(points: [(Real, Real); 3], depth: Real, metadata: S) -> Triangle<S> {
    Triangle::from_angles(points, depth, Some(metadata))
}

/// Summed projected area of every triangle.
pub fn total_area<S: Clone>(triangles: &[Triangle<S>]) -> Real {
    triangles.iter().map(Triangle::area).sum()
}

pub fn is_farthest_first<S: Clone>(triangles: &[Triangle<S>]) -> bool {
    triangles.windows(2).all(|w| w[0].depth >= w[1].depth)
}

/// Deterministic [`GeometryOps`]: an overlapped triangle is hidden whole and
/// never split. Counts how often it was asked to clip.
#[derive(Debug, Default)]
pub struct HideOps {
    pub clips: usize,
}

impl GeometryOps for HideOps {
    fn clip_difference(
        &mut self,
        _subject: &[Point3<Real>; 3],
        _clip: &[Point3<Real>; 3],
    ) -> MultiPolygon<Real> {
        self.clips += 1;
        MultiPolygon::new(Vec::new())
    }

    fn triangulate(
        &mut self,
        polygon: &GeoPolygon<Real>,
    ) -> Result<Vec<[Point3<Real>; 3]>, GeometryError> {
        let coords: Vec<Coord<Real>> = polygon.exterior().0.clone();
        match coords.as_slice() {
            [a, b, c, ..] => {
                let p = |c: &Coord<Real>| Point3::new(c.x, c.y, 0.0);
                let triangle = [p(a), p(b), p(c)];
                if area(&triangle[0], &triangle[1], &triangle[2]) > 0.0 {
                    Ok(vec![triangle])
                } else {
                    Err(GeometryError::DegenerateTriangulation("flat".into()))
                }
            }
            _ => Err(GeometryError::EmptyTriangulation {
                points: coords.len(),
            }),
        }
    }
}

/// Closed `geo` ring from `(x, y)` pairs.
pub fn ring(points: &[(Real, Real)]) -> GeoPolygon<Real> {
    GeoPolygon::new(LineString::from(points.to_vec()), Vec::new())
}
