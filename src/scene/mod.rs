//! Static scene description: points, edges, and hexahedral entities.
//!
//! Entities are built once and never mutated while frames are rendered.

use crate::bsp::ShapeDescriptor;
use crate::float_types::Real;
use nalgebra::Point3;

/// A vertex of an entity plus the indices of the points it is wired to.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: Point3<Real>,
    pub connected_to: Vec<usize>,
}

impl Point {
    pub const fn new(position: Point3<Real>, connected_to: Vec<usize>) -> Self {
        Point {
            position,
            connected_to,
        }
    }
}

/// An unordered pair of point indices within one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub p1: usize,
    pub p2: usize,
}

impl Edge {
    pub const fn new(p1: usize, p2: usize) -> Self {
        Edge { p1, p2 }
    }

    /// True when both edges join the same two points, in either direction.
    pub const fn same_as(&self, other: &Edge) -> bool {
        (self.p1 == other.p1 && self.p2 == other.p2)
            || (self.p1 == other.p2 && self.p2 == other.p1)
    }

    /// True when `point` is one of the two endpoints.
    pub const fn touches(&self, point: usize) -> bool {
        self.p1 == point || self.p2 == point
    }
}

/// One solid object: its points, the edges between them, and the face table
/// used to rebuild its sides.
#[derive(Debug, Clone)]
pub struct Entity {
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
    pub shape: ShapeDescriptor,
}

impl Entity {
    /// Build an entity from points with adjacency, deriving each edge once.
    ///
    /// Adjacency entries pointing outside `points` are ignored.
    pub fn from_points(points: Vec<Point>, shape: ShapeDescriptor) -> Self {
        let mut edges: Vec<Edge> = Vec::new();
        for (index, point) in points.iter().enumerate() {
            for &other in &point.connected_to {
                if other >= points.len() || other == index {
                    continue;
                }
                let candidate = Edge::new(index, other);
                if !edges.iter().any(|edge| edge.same_as(&candidate)) {
                    edges.push(candidate);
                }
            }
        }

        Entity {
            points,
            edges,
            shape,
        }
    }

    /// Axis-aligned box with one corner at `origin`, labelled the way
    /// [`ShapeDescriptor::hexahedron`] expects:
    ///
    /// ```text
    /// 0 (x0, y0, z0)   4 (x0, y1, z0)
    /// 1 (x1, y0, z0)   5 (x1, y1, z0)
    /// 2 (x1, y0, z1)   6 (x1, y1, z1)
    /// 3 (x0, y0, z1)   7 (x0, y1, z1)
    /// ```
    pub fn hexahedron(origin: Point3<Real>, width: Real, height: Real, depth: Real) -> Self {
        let (x0, y0, z0) = (origin.x, origin.y, origin.z);
        let (x1, y1, z1) = (x0 + width, y0 + height, z0 + depth);

        let points = vec![
            Point::new(Point3::new(x0, y0, z0), vec![1, 3, 4]),
            Point::new(Point3::new(x1, y0, z0), vec![0, 2, 5]),
            Point::new(Point3::new(x1, y0, z1), vec![1, 3, 6]),
            Point::new(Point3::new(x0, y0, z1), vec![0, 2, 7]),
            Point::new(Point3::new(x0, y1, z0), vec![0, 5, 7]),
            Point::new(Point3::new(x1, y1, z0), vec![1, 4, 6]),
            Point::new(Point3::new(x1, y1, z1), vec![2, 5, 7]),
            Point::new(Point3::new(x0, y1, z1), vec![3, 4, 6]),
        ];

        Self::from_points(points, ShapeDescriptor::hexahedron())
    }

    /// Mean of all point positions.
    pub fn centroid(&self) -> Point3<Real> {
        if self.points.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .points
            .iter()
            .fold(Point3::origin().coords, |acc, p| acc + p.position.coords);
        Point3::from(sum / self.points.len() as Real)
    }
}

/// Everything rendered in a frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub entities: Vec<Entity>,
}

impl Scene {
    pub const fn new() -> Self {
        Scene {
            entities: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Append an axis-aligned box, see [`Entity::hexahedron`].
    pub fn add_hexahedron(&mut self, origin: Point3<Real>, width: Real, height: Real, depth: Real) {
        self.entities
            .push(Entity::hexahedron(origin, width, height, depth));
    }
}
