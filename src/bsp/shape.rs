//! Face tables describing which points bound each side of an entity.

/// Maps each face index to the four point indices that bound it.
///
/// The table belongs to an entity rather than the crate so other labelled
/// shapes can bring their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDescriptor {
    pub faces: Vec<[usize; 4]>,
}

impl ShapeDescriptor {
    pub const fn new(faces: Vec<[usize; 4]>) -> Self {
        ShapeDescriptor { faces }
    }

    /// Six sides of the canonical 8-point box built by
    /// [`Entity::hexahedron`](crate::scene::Entity::hexahedron).
    pub fn hexahedron() -> Self {
        ShapeDescriptor {
            faces: vec![
                [0, 1, 4, 5],
                [1, 2, 5, 6],
                [2, 3, 6, 7],
                [0, 3, 4, 7],
                [0, 1, 2, 3],
                [4, 5, 6, 7],
            ],
        }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Indices of every face listing both `p1` and `p2`.
    pub fn faces_with(&self, p1: usize, p2: usize) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, corners)| corners.contains(&p1) && corners.contains(&p2))
            .map(|(index, _)| index)
            .collect()
    }
}

impl Default for ShapeDescriptor {
    fn default() -> Self {
        Self::hexahedron()
    }
}
