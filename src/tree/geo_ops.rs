//! [`GeometryOps`] backed by `geo`: boolean difference and ear-cut triangulation.

use crate::errors::GeometryError;
use crate::float_types::{AREA_EPSILON, JITTER_AMPLITUDE, Real};
use crate::tree::traits::GeometryOps;
use geo::{
    Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon as GeoPolygon, TriangulateEarcut,
};
use nalgebra::Point3;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Perturbation applied to a polygon whose first triangulation came back empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterConfig {
    /// Largest offset per coordinate, in projected degrees; 0 disables the retry
    pub amplitude: Real,
    pub seed: u64,
}

impl Default for JitterConfig {
    fn default() -> Self {
        JitterConfig {
            amplitude: JITTER_AMPLITUDE,
            seed: 0x5eed_cafe,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeoOps {
    jitter: JitterConfig,
    rng: StdRng,
}

impl Default for GeoOps {
    fn default() -> Self {
        Self::new(JitterConfig::default())
    }
}

impl GeoOps {
    pub fn new(jitter: JitterConfig) -> Self {
        GeoOps {
            jitter,
            rng: StdRng::seed_from_u64(jitter.seed),
        }
    }

    /// Copy of `polygon` with every ring point moved by at most the jitter amplitude.
    fn jittered(&mut self, polygon: &GeoPolygon<Real>) -> GeoPolygon<Real> {
        let amplitude = self.jitter.amplitude;
        let mut shake = |ring: &LineString<Real>| {
            let mut coords: Vec<Coord<Real>> = ring
                .0
                .iter()
                .map(|c| Coord {
                    x: c.x + self.rng.random_range(-amplitude..=amplitude),
                    y: c.y + self.rng.random_range(-amplitude..=amplitude),
                })
                .collect();
            // keep the ring closed on the shaken first point
            if let (Some(first), Some(last)) = (coords.first().copied(), coords.last_mut()) {
                if ring.is_closed() {
                    *last = first;
                }
            }
            LineString::new(coords)
        };
        let exterior = shake(polygon.exterior());
        let interiors = polygon.interiors().iter().map(&mut shake).collect();
        GeoPolygon::new(exterior, interiors)
    }
}

impl GeometryOps for GeoOps {
    fn clip_difference(
        &mut self,
        subject: &[Point3<Real>; 3],
        clip: &[Point3<Real>; 3],
    ) -> MultiPolygon<Real> {
        if !finite(subject) || !finite(clip) {
            return MultiPolygon::new(Vec::new());
        }
        let subject = ring(subject);
        if subject.unsigned_area() <= AREA_EPSILON {
            return MultiPolygon::new(Vec::new());
        }
        let clip = ring(clip);
        if clip.unsigned_area() <= AREA_EPSILON {
            return MultiPolygon::new(vec![subject]);
        }
        subject.difference(&clip)
    }

    fn triangulate(
        &mut self,
        polygon: &GeoPolygon<Real>,
    ) -> Result<Vec<[Point3<Real>; 3]>, GeometryError> {
        validate(polygon)?;

        let triangles = earcut(polygon);
        if !triangles.is_empty() {
            return Ok(triangles);
        }

        if self.jitter.amplitude > 0.0 {
            let shaken = self.jittered(polygon);
            let triangles = earcut(&shaken);
            if !triangles.is_empty() {
                return Ok(triangles);
            }
        }

        Err(GeometryError::EmptyTriangulation {
            points: polygon.exterior().0.len(),
        })
    }
}

fn finite(points: &[Point3<Real>; 3]) -> bool {
    points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
}

fn ring(points: &[Point3<Real>; 3]) -> GeoPolygon<Real> {
    let coords: Vec<Coord<Real>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    GeoPolygon::new(LineString::new(coords), Vec::new())
}

fn validate(polygon: &GeoPolygon<Real>) -> Result<(), GeometryError> {
    let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
    let mut coords = rings.flat_map(|ring| ring.0.iter());
    if !coords.all(|c| c.x.is_finite() && c.y.is_finite()) {
        return Err(GeometryError::NonFinite);
    }

    let mut distinct: Vec<Coord<Real>> = Vec::new();
    for c in &polygon.exterior().0 {
        if !distinct.contains(c) {
            distinct.push(*c);
        }
    }
    if distinct.len() < 3 {
        return Err(GeometryError::DegenerateTriangulation(format!(
            "{} distinct points",
            distinct.len()
        )));
    }

    let area = polygon.unsigned_area();
    if area <= AREA_EPSILON {
        return Err(GeometryError::DegenerateTriangulation(format!(
            "area {area} is below {AREA_EPSILON}"
        )));
    }
    Ok(())
}

/// Ear-cut `polygon` and embed the triangles at z = 0.
fn earcut(polygon: &GeoPolygon<Real>) -> Vec<[Point3<Real>; 3]> {
    let triangulation = polygon.earcut_triangles_raw();
    let vertices = triangulation.vertices;
    triangulation
        .triangle_indices
        .chunks_exact(3)
        .map(|tri| {
            [
                Point3::new(vertices[2 * tri[0]], vertices[2 * tri[0] + 1], 0.0),
                Point3::new(vertices[2 * tri[1]], vertices[2 * tri[1] + 1], 0.0),
                Point3::new(vertices[2 * tri[2]], vertices[2 * tri[2] + 1], 0.0),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::area;

    fn p(x: Real, y: Real) -> Point3<Real> {
        Point3::new(x, y, 0.0)
    }

    fn total_area(triangles: &[[Point3<Real>; 3]]) -> Real {
        triangles.iter().map(|[a, b, c]| area(a, b, c)).sum()
    }

    #[test]
    fn difference_of_disjoint_keeps_subject() {
        let mut ops = GeoOps::default();
        let result = ops.clip_difference(
            &[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)],
            &[p(5.0, 5.0), p(6.0, 5.0), p(5.0, 6.0)],
        );
        assert_eq!(result.0.len(), 1);
        assert!((result.unsigned_area() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn collinear_subject_clips_to_nothing() {
        let mut ops = GeoOps::default();
        let result = ops.clip_difference(
            &[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)],
            &[p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0)],
        );
        assert!(result.0.is_empty());
    }

    #[test]
    fn triangulates_polygon_with_hole() {
        let mut ops = GeoOps::default();
        let outer = LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]);
        let hole = LineString::from(vec![(1.0, 1.0), (4.0, 1.0), (1.0, 4.0), (1.0, 1.0)]);
        let triangles = ops
            .triangulate(&GeoPolygon::new(outer, vec![hole]))
            .unwrap();
        assert!((total_area(&triangles) - 45.5).abs() < 1e-9);
    }

    #[test]
    fn repeated_points_are_degenerate() {
        let mut ops = GeoOps::default();
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 1.0), (0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            ops.triangulate(&GeoPolygon::new(line, Vec::new())),
            Err(GeometryError::DegenerateTriangulation(_))
        ));
    }

    #[test]
    fn non_finite_is_rejected() {
        let mut ops = GeoOps::default();
        let line = LineString::from(vec![(0.0, 0.0), (Real::NAN, 1.0), (1.0, 0.0)]);
        assert_eq!(
            ops.triangulate(&GeoPolygon::new(line, Vec::new())),
            Err(GeometryError::NonFinite)
        );
    }

    #[test]
    fn jitter_stays_within_amplitude() {
        let mut ops = GeoOps::new(JitterConfig {
            amplitude: 0.01,
            seed: 7,
        });
        let square = GeoPolygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            Vec::new(),
        );
        let shaken = ops.jittered(&square);
        assert!(shaken.exterior().is_closed());
        for (a, b) in square.exterior().0.iter().zip(shaken.exterior().0.iter()) {
            assert!((a.x - b.x).abs() <= 0.01 && (a.y - b.y).abs() <= 0.01);
        }
    }
}
