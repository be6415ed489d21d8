//! Per-entity face reconstruction.

use crate::bsp::frame::{Face, ProjectedEdge};
use crate::bsp::shape::ShapeDescriptor;
use crate::camera::Projector;
use crate::errors::TopologyError;
use crate::float_types::{Real, tolerance};
use crate::scene::{Edge, Entity};
use nalgebra::{Point3, Vector3};

/// The faces of one entity, filled with this frame's projected edges.
#[derive(Debug, Clone)]
pub struct Figure {
    pub faces: Vec<Face>,
    shape: ShapeDescriptor,
}

impl Figure {
    /// Empty faces, one per row of the shape's face table.
    pub fn new(shape: &ShapeDescriptor) -> Self {
        Figure {
            faces: (0..shape.face_count()).map(Face::new).collect(),
            shape: shape.clone(),
        }
    }

    /// Project every edge of `entity` and file it under its two faces.
    ///
    /// With `visible_only` set, edges with no visible endpoint are left out.
    /// Edges that cannot be placed are skipped and reported.
    pub fn from_entity(
        entity: &Entity,
        projector: &Projector,
        visible_only: bool,
    ) -> (Self, Vec<TopologyError>) {
        let mut figure = Figure::new(&entity.shape);
        let mut errors = Vec::new();

        for edge in &entity.edges {
            let projected = match ProjectedEdge::project(*edge, entity, projector) {
                Ok(projected) => projected,
                Err(err) => {
                    errors.push(err);
                    continue;
                }
            };
            if visible_only && !projected.visible {
                continue;
            }
            if let Err(err) = figure.add_projected_edge(projected) {
                errors.push(err);
            }
        }

        (figure, errors)
    }

    /// The two faces bordering `edge`.
    pub fn assign_edge_to_faces(&self, edge: &Edge) -> Result<(usize, usize), TopologyError> {
        match self.shape.faces_with(edge.p1, edge.p2).as_slice() {
            &[a, b] => Ok((a, b)),
            other => Err(TopologyError::AmbiguousFaceAssignment {
                p1: edge.p1,
                p2: edge.p2,
                matches: other.len(),
            }),
        }
    }

    /// Append `edge` to both faces it borders.
    pub fn add_projected_edge(&mut self, edge: ProjectedEdge) -> Result<(), TopologyError> {
        let (a, b) = self.assign_edge_to_faces(&edge.edge)?;
        self.faces[a].add_edge(edge);
        self.faces[b].add_edge(edge);
        Ok(())
    }

    /// Flag faces turned away from `camera`.
    ///
    /// The outward direction of a face runs from the entity centroid to the
    /// face centroid; faces seen exactly edge-on stay front facing.
    pub fn mark_front_facing(&mut self, entity: &Entity, camera: &Point3<Real>) {
        let center = entity.centroid();
        for face in &mut self.faces {
            let Some(corners) = self.shape.faces.get(face.side) else {
                continue;
            };
            let Some(face_center) = centroid_of(entity, corners) else {
                continue;
            };
            let outward: Vector3<Real> = face_center - center;
            face.front_facing = outward.dot(&(camera - face_center)) >= -tolerance();
        }
    }

    /// Close every face's outline, see [`Face::enclose`].
    pub fn enclose_all(&mut self) {
        self.faces.iter_mut().for_each(Face::enclose);
    }

    pub fn renderable_faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().filter(|face| face.is_renderable())
    }
}

fn centroid_of(entity: &Entity, corners: &[usize]) -> Option<Point3<Real>> {
    let mut sum = Vector3::zeros();
    for &index in corners {
        sum += entity.points.get(index)?.position.coords;
    }
    Some(Point3::from(sum / corners.len() as Real))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;

    fn cube() -> Entity {
        Entity::hexahedron(Point3::origin(), 10.0, 10.0, 10.0)
    }

    #[test]
    fn every_edge_borders_two_faces() {
        let entity = cube();
        let figure = Figure::new(&entity.shape);
        for edge in &entity.edges {
            let (a, b) = figure.assign_edge_to_faces(edge).unwrap();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn diagonal_is_ambiguous() {
        let figure = Figure::new(&ShapeDescriptor::hexahedron());
        assert_eq!(
            figure.assign_edge_to_faces(&Edge::new(0, 6)),
            Err(TopologyError::AmbiguousFaceAssignment {
                p1: 0,
                p2: 6,
                matches: 0
            })
        );
        // face diagonal: one face only
        assert!(figure.assign_edge_to_faces(&Edge::new(0, 5)).is_err());
    }

    #[test]
    fn faces_fill_with_four_edges() {
        let entity = cube();
        let projector = Projector::new(Camera::new_at(5.0, 5.0, -30.0, 75.0, 16.0 / 9.0).state());
        let (figure, errors) = Figure::from_entity(&entity, &projector, false);
        assert!(errors.is_empty());
        assert!(figure.faces.iter().all(|face| face.edges.len() == 4));
        assert!(figure.faces.iter().all(|face| face.visible));
    }

    #[test]
    fn back_faces_are_flagged() {
        let entity = cube();
        let mut figure = Figure::new(&entity.shape);
        figure.mark_front_facing(&entity, &Point3::new(5.0, 5.0, -30.0));
        let facing: Vec<usize> = figure
            .faces
            .iter()
            .filter(|f| f.front_facing)
            .map(|f| f.side)
            .collect();
        assert_eq!(facing, vec![0]);
    }

    #[test]
    fn bad_point_index_is_reported() {
        let mut entity = cube();
        entity.edges.push(Edge::new(0, 42));
        let projector = Projector::new(Camera::default().state());
        let (_, errors) = Figure::from_entity(&entity, &projector, false);
        assert_eq!(
            errors,
            vec![TopologyError::PointOutOfRange { index: 42, len: 8 }]
        );
    }
}
