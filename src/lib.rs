//! A small **painter's-algorithm** renderer for hexahedral wireframe scenes,
//! built around three stages run once per frame:
//!
//! 1. [`Projector`](camera::Projector): camera-relative horizontal and vertical
//!    view angles and field-of-view visibility for every point.
//! 2. [`Figure`](bsp::Figure): each entity's edges sorted into its six sides and
//!    every visible side rebuilt as two projected triangles.
//! 3. [`DepthOrderTree`](tree::DepthOrderTree): overlapping triangles clipped
//!    so the farther one loses the shared area, then emitted back to front.
//!
//! The [`Renderer`](render::Renderer) drives all three and hands finished
//! vertex buffers to a [`RenderSurface`](render::RenderSurface).
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod bsp;
pub mod camera;
pub mod errors;
pub mod float_types;
pub mod polygon;
pub mod render;
pub mod scene;
pub mod tree;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use camera::{Camera, CameraConfig, CameraState, Projection, Projector};
pub use errors::{FrameError, GeometryError, ReconstructionError, TopologyError};
pub use float_types::Real;
pub use polygon::Triangle;
pub use render::{
    DrawMode, FaceTag, FrameReport, RecordingSurface, RenderConfig, RenderSurface, Renderer,
};
pub use scene::{Edge, Entity, Point, Scene};
pub use tree::{DepthOrderTree, GeoOps, GeometryOps, PivotSelection, TreeConfig};
