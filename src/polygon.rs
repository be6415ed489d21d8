//! Projected triangles and the 2D predicates the depth-ordering tree relies on.
//!
//! Vertices live in projected-angle space: `x` is the horizontal angle, `y`
//! the vertical angle, and `z` stays 0.

use crate::float_types::{AREA_EPSILON, Real};
use nalgebra::Point3;

/// A projected triangle plus the camera distance used to order it.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle<S: Clone> {
    pub vertices: [Point3<Real>; 3],
    /// Representative camera distance; larger is farther
    pub depth: Real,
    /// Generic metadata carried through clipping
    pub metadata: Option<S>,
}

impl<S: Clone> Triangle<S> {
    pub const fn new(vertices: [Point3<Real>; 3], depth: Real, metadata: Option<S>) -> Self {
        Triangle {
            vertices,
            depth,
            metadata,
        }
    }

    /// Build from `(horizontal, vertical)` angle pairs.
    pub fn from_angles(angles: [(Real, Real); 3], depth: Real, metadata: Option<S>) -> Self {
        let [a, b, c] = angles;
        Triangle::new(
            [
                Point3::new(a.0, a.1, 0.0),
                Point3::new(b.0, b.1, 0.0),
                Point3::new(c.0, c.1, 0.0),
            ],
            depth,
            metadata,
        )
    }

    /// Unsigned area in the projected plane.
    pub fn area(&self) -> Real {
        let [a, b, c] = &self.vertices;
        area(a, b, c)
    }

    pub fn is_degenerate(&self) -> bool {
        self.area() <= AREA_EPSILON
    }

    /// Point-in-triangle by area decomposition: the three sub-triangles built
    /// with `p` add up to the whole. Points on an edge or vertex are outside.
    pub fn strictly_contains_point(&self, p: &Point3<Real>) -> bool {
        let [a, b, c] = &self.vertices;
        let whole = area(a, b, c);
        let subs = [area(p, b, c), area(a, p, c), area(a, b, p)];
        let parts: Real = subs.iter().sum();
        (parts - whole).abs() < AREA_EPSILON && subs.iter().all(|s| *s > AREA_EPSILON)
    }

    /// Number of `other`'s vertices strictly inside `self`.
    pub fn inside_count(&self, other: &Triangle<S>) -> usize {
        other
            .vertices
            .iter()
            .filter(|p| self.strictly_contains_point(p))
            .count()
    }

    /// True when an edge of `self` properly crosses an edge of `other`.
    pub fn edges_cross(&self, other: &Triangle<S>) -> bool {
        self.edges().iter().any(|(a, b)| {
            other
                .edges()
                .iter()
                .any(|(c, d)| segments_cross(a, b, c, d))
        })
    }

    /// Whether the interiors of the two triangles share any area.
    pub fn overlaps(&self, other: &Triangle<S>) -> bool {
        self.inside_count(other) > 0 || other.inside_count(self) > 0 || self.edges_cross(other)
    }

    pub fn is_farther_than(&self, other: &Triangle<S>) -> bool {
        self.depth > other.depth
    }

    pub fn edges(&self) -> [(Point3<Real>, Point3<Real>); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Stride-3 positions in normalized device coordinates.
    pub fn to_buffer(&self, max_horizontal: Real, max_vertical: Real) -> [f32; 9] {
        let mut out = [0.0; 9];
        for (i, v) in self.vertices.iter().enumerate() {
            let (x, y) = normalize_position(v.x, v.y, max_horizontal, max_vertical);
            out[i * 3] = x as f32;
            out[i * 3 + 1] = y as f32;
            out[i * 3 + 2] = 0.0;
        }
        out
    }
}

/// Unsigned area of the triangle `abc` in the x/y plane.
pub fn area(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Real {
    ((a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) / 2.0).abs()
}

/// Twice the signed area of `abc`; positive when counter-clockwise.
pub fn orient(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Real {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper crossing of `ab` and `cd`: touching or collinear overlap does not count.
pub fn segments_cross(
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
    d: &Point3<Real>,
) -> bool {
    let sign = |v: Real| {
        if v > AREA_EPSILON {
            1
        } else if v < -AREA_EPSILON {
            -1
        } else {
            0
        }
    };
    let (o1, o2) = (sign(orient(a, b, c)), sign(orient(a, b, d)));
    let (o3, o4) = (sign(orient(c, d, a)), sign(orient(c, d, b)));
    o1 * o2 < 0 && o3 * o4 < 0
}

/// Map view angles to normalized device coordinates.
pub fn normalize_position(x: Real, y: Real, max_x: Real, max_y: Real) -> (Real, Real) {
    (x / max_x, y / max_y)
}
