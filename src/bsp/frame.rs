//! One side of an entity together with the projected edges that bound it.

use crate::camera::Projector;
use crate::errors::{ReconstructionError, TopologyError};
use crate::float_types::Real;
use crate::polygon::Triangle;
use crate::scene::{Edge, Entity};

/// An edge as seen from the camera this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEdge {
    pub edge: Edge,
    pub p1_distance: Real,
    pub p2_distance: Real,
    /// `(horizontal, vertical)` view angles of `edge.p1`
    pub p1_angles: (Real, Real),
    /// `(horizontal, vertical)` view angles of `edge.p2`
    pub p2_angles: (Real, Real),
    /// Either endpoint passed the visibility test
    pub visible: bool,
}

impl ProjectedEdge {
    /// Project both endpoints of `edge`.
    pub fn project(
        edge: Edge,
        entity: &Entity,
        projector: &Projector,
    ) -> Result<Self, TopologyError> {
        let len = entity.points.len();
        let point = |index: usize| {
            entity
                .points
                .get(index)
                .ok_or(TopologyError::PointOutOfRange { index, len })
        };
        let p1 = point(edge.p1)?.position;
        let p2 = point(edge.p2)?.position;

        let a = projector.project(&p1);
        let b = projector.project(&p2);

        Ok(ProjectedEdge {
            edge,
            p1_distance: projector.distance(&p1),
            p2_distance: projector.distance(&p2),
            p1_angles: (a.horizontal, a.vertical),
            p2_angles: (b.horizontal, b.vertical),
            visible: a.visible || b.visible,
        })
    }

    /// Angles and distance of `point` if it is one of this edge's endpoints.
    pub fn corner(&self, point: usize) -> Option<Corner> {
        if self.edge.p1 == point {
            Some(Corner {
                point,
                angles: self.p1_angles,
                distance: self.p1_distance,
            })
        } else if self.edge.p2 == point {
            Some(Corner {
                point,
                angles: self.p2_angles,
                distance: self.p2_distance,
            })
        } else {
            None
        }
    }

    /// The endpoint that is not `point`.
    pub const fn other(&self, point: usize) -> usize {
        if self.edge.p1 == point {
            self.edge.p2
        } else {
            self.edge.p1
        }
    }
}

/// A face vertex with its projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub point: usize,
    pub angles: (Real, Real),
    pub distance: Real,
}

/// A face vertex referenced by only one of the face's edges.
pub type HangingPoint = Corner;

/// One side of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub side: usize,
    pub edges: Vec<ProjectedEdge>,
    pub enclosed: bool,
    /// Any assigned edge is visible
    pub visible: bool,
    /// The side faces the camera (edge-on counts)
    pub front_facing: bool,
}

impl Face {
    pub const fn new(side: usize) -> Self {
        Face {
            side,
            edges: Vec::new(),
            enclosed: false,
            visible: false,
            front_facing: true,
        }
    }

    pub fn add_edge(&mut self, edge: ProjectedEdge) {
        self.visible |= edge.visible;
        self.edges.push(edge);
    }

    /// Visible and not turned away from the camera.
    pub const fn is_renderable(&self) -> bool {
        self.visible && self.front_facing
    }

    /// Projection of `point` taken from whichever edge carries it.
    pub fn corner(&self, point: usize) -> Option<Corner> {
        self.edges.iter().find_map(|edge| edge.corner(point))
    }

    /// Split the quad into two triangles sharing a diagonal.
    ///
    /// Edge 0 is the anchor; the first other edge touching it fans the first
    /// triangle, the two remaining edges meet at the opposite corner and form
    /// the second.
    pub fn convert_to_triangles<S: Clone>(
        &self,
        metadata: Option<S>,
    ) -> Result<(Triangle<S>, Triangle<S>), ReconstructionError> {
        if self.edges.len() != 4 {
            return Err(ReconstructionError::NotEnoughEdges {
                side: self.side,
                found: self.edges.len(),
            });
        }

        let anchor = &self.edges[0];
        for fan_index in 1..4 {
            let fan = &self.edges[fan_index];
            let (shared, anchor_far) = if fan.edge.touches(anchor.edge.p1) {
                (anchor.edge.p1, anchor.edge.p2)
            } else if fan.edge.touches(anchor.edge.p2) {
                (anchor.edge.p2, anchor.edge.p1)
            } else {
                continue;
            };
            let first = self.triangle([fan.other(shared), anchor_far, shared], metadata.clone())?;

            let mut rest = (1..4).filter(|&k| k != fan_index).map(|k| &self.edges[k]);
            let (Some(a), Some(b)) = (rest.next(), rest.next()) else {
                break;
            };
            let b_far = if a.edge.touches(b.edge.p1) {
                b.edge.p2
            } else if a.edge.touches(b.edge.p2) {
                b.edge.p1
            } else {
                break;
            };
            let second = self.triangle([a.edge.p1, a.edge.p2, b_far], metadata)?;

            return Ok((first, second));
        }

        Err(ReconstructionError::OpenFace { side: self.side })
    }

    fn triangle<S: Clone>(
        &self,
        points: [usize; 3],
        metadata: Option<S>,
    ) -> Result<Triangle<S>, ReconstructionError> {
        let mut corners = [None; 3];
        for (slot, point) in corners.iter_mut().zip(points) {
            *slot = self.corner(point);
        }
        let [Some(a), Some(b), Some(c)] = corners else {
            return Err(ReconstructionError::OpenFace { side: self.side });
        };
        let depth = (a.distance + b.distance + c.distance) / 3.0;
        Ok(Triangle::from_angles([a.angles, b.angles, c.angles], depth, metadata))
    }

    /// The two points referenced by exactly one edge, in order of appearance.
    pub fn hanging_points(&self) -> Option<(HangingPoint, HangingPoint)> {
        let mut seen: Vec<(Corner, usize)> = Vec::new();
        for edge in &self.edges {
            for point in [edge.edge.p1, edge.edge.p2] {
                match seen.iter_mut().find(|(corner, _)| corner.point == point) {
                    Some((_, count)) => *count += 1,
                    None => {
                        if let Some(corner) = edge.corner(point) {
                            seen.push((corner, 1));
                        }
                    }
                }
            }
        }

        let mut hanging = seen
            .into_iter()
            .filter(|(_, count)| *count == 1)
            .map(|(corner, _)| corner);
        match (hanging.next(), hanging.next(), hanging.next()) {
            (Some(a), Some(b), None) => Some((a, b)),
            _ => None,
        }
    }

    /// Close an open outline by joining its two hanging points.
    ///
    /// A face with at most one edge cannot outline anything and is emptied.
    pub fn enclose(&mut self) {
        if self.edges.len() > 1 {
            if let Some((a, b)) = self.hanging_points() {
                self.edges.push(ProjectedEdge {
                    edge: Edge::new(a.point, b.point),
                    p1_distance: a.distance,
                    p2_distance: b.distance,
                    p1_angles: a.angles,
                    p2_angles: b.angles,
                    visible: false,
                });
            }
        } else {
            self.edges.clear();
            self.visible = false;
        }
        self.enclosed = true;
    }
}
