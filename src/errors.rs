//! Errors raised by the visibility-and-depth-ordering pipeline.
//!
//! None of these abort a frame: the frame driver skips the affected face or
//! fragment and records the error in its [`FrameReport`](crate::render::FrameReport).

/// A face could not be turned into triangles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconstructionError {
    /// (NotEnoughEdges) The face does not hold exactly the four edges of a quad
    #[error("(NotEnoughEdges) face {side} holds {found} edges, 4 are required")]
    NotEnoughEdges { side: usize, found: usize },

    /// (OpenFace) The four edges do not close into a quad
    #[error("(OpenFace) the edges of face {side} do not form a closed quad")]
    OpenFace { side: usize },
}

/// An edge does not border exactly two faces of its entity's shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// (AmbiguousFaceAssignment) The edge matched zero, one, or more than two faces
    #[error("(AmbiguousFaceAssignment) edge {p1}-{p2} matches {matches} faces, expected 2")]
    AmbiguousFaceAssignment { p1: usize, p2: usize, matches: usize },

    /// (PointOutOfRange) An edge references a point the entity does not have
    #[error("(PointOutOfRange) point index {index} is out of range (points.len = {len})")]
    PointOutOfRange { index: usize, len: usize },
}

/// A clipped fragment could not be triangulated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (DegenerateTriangulation) The polygon is collinear, repeated, or has no area
    #[error("(DegenerateTriangulation) {0}")]
    DegenerateTriangulation(String),

    /// (EmptyTriangulation) The triangulator produced no triangles, even after jittering
    #[error("(EmptyTriangulation) polygon with {points} points produced no triangles")]
    EmptyTriangulation { points: usize },

    /// (NonFinite) A coordinate is NaN or infinite
    #[error("(NonFinite) polygon contains a NaN or infinite coordinate")]
    NonFinite,
}

/// Anything the frame driver skipped while producing a frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    #[error("entity {entity}: {source}")]
    Reconstruction {
        entity: usize,
        #[source]
        source: ReconstructionError,
    },
    #[error("entity {entity}: {source}")]
    Topology {
        entity: usize,
        #[source]
        source: TopologyError,
    },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
