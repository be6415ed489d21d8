//! Per-entity "BSP" face reconstruction.
//!
//! Here BSP is not a recursive partition of the scene: each entity's twelve
//! edges are sorted into its six sides, and each side with four edges is
//! rebuilt as two projected triangles.

pub mod figure;
pub mod frame;
pub mod shape;

pub use figure::Figure;
pub use frame::{Corner, Face, HangingPoint, ProjectedEdge};
pub use shape::ShapeDescriptor;
