//! Frame driver: projection, face reconstruction and depth ordering for a
//! whole scene, submitted to a [`RenderSurface`].
//!
//! Nothing here aborts a frame. Faces, edges and fragments that cannot be
//! processed are skipped, logged, and listed in the returned [`FrameReport`].

pub mod surface;

pub use surface::{RecordingSurface, RenderSurface, Submission};

use crate::bsp::{Figure, ProjectedEdge};
use crate::camera::{CameraState, Projector};
use crate::errors::FrameError;
use crate::float_types::Real;
use crate::polygon::{Triangle, normalize_position};
use crate::scene::Scene;
use crate::tree::{DepthOrderTree, GeoOps, GeometryOps, TreeConfig};
use log::{debug, trace, warn};

/// Fill colour per side index, cycled for shapes with more than six sides.
pub const SIDE_COLOURS: [[f32; 3]; 6] = [
    [0.90, 0.30, 0.25],
    [0.30, 0.75, 0.35],
    [0.25, 0.45, 0.90],
    [0.95, 0.80, 0.25],
    [0.70, 0.35, 0.85],
    [0.25, 0.80, 0.80],
];

pub fn side_colour(side: usize) -> [f32; 3] {
    SIDE_COLOURS[side % SIDE_COLOURS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Every edge with a visible endpoint, as a line
    Wireframe,
    /// All faces, reconstructed, depth ordered and filled
    #[default]
    Solid,
    /// Like `Solid`, but faces are rebuilt from visible edges only
    Outline,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub mode: DrawMode,
    /// Skip faces turned away from the camera
    pub cull_back_faces: bool,
    pub tree: TreeConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            mode: DrawMode::default(),
            cull_back_faces: true,
            tree: TreeConfig::default(),
        }
    }
}

/// Which face a triangle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceTag {
    pub entity: usize,
    pub side: usize,
}

/// What happened while producing one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub edges_submitted: usize,
    pub triangles_submitted: usize,
    pub renderable_faces: usize,
    pub skipped: Vec<FrameError>,
    /// The depth-order tree gave up clipping
    pub truncated: bool,
}

#[derive(Debug)]
pub struct Renderer<G: GeometryOps = GeoOps> {
    config: RenderConfig,
    tree: DepthOrderTree<G>,
}

impl Default for Renderer<GeoOps> {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Renderer<GeoOps> {
    pub fn new(config: RenderConfig) -> Self {
        Renderer {
            config,
            tree: DepthOrderTree::from_config(config.tree),
        }
    }
}

impl<G: GeometryOps> Renderer<G> {
    /// A renderer clipping through `ops` instead of the default backend.
    pub const fn with_ops(ops: G, config: RenderConfig) -> Self {
        Renderer {
            config,
            tree: DepthOrderTree::new(ops, config.tree),
        }
    }

    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw one frame in the configured [`DrawMode`].
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        camera: &CameraState,
        surface: &mut impl RenderSurface,
    ) -> FrameReport {
        let report = match self.config.mode {
            DrawMode::Wireframe => self.draw_world(scene, camera, surface),
            DrawMode::Solid => self.draw_full_world(scene, camera, surface),
            DrawMode::Outline => self.draw_outline(scene, camera, surface),
        };
        trace!(
            "frame: {} edges, {} triangles, {} faces, {} skipped",
            report.edges_submitted,
            report.triangles_submitted,
            report.renderable_faces,
            report.skipped.len()
        );
        report
    }

    /// Wireframe: each edge with a visible endpoint is submitted on its own
    /// as the line triangle `[p1, p2, p2]`.
    pub fn draw_world(
        &self,
        scene: &Scene,
        camera: &CameraState,
        surface: &mut impl RenderSurface,
    ) -> FrameReport {
        let projector = Projector::new(*camera);
        let (max_h, max_v) = (camera.fov.half_horizontal(), camera.fov.half_vertical());
        let mut report = FrameReport::default();

        for (index, entity) in scene.entities.iter().enumerate() {
            for edge in &entity.edges {
                let projected = match ProjectedEdge::project(*edge, entity, &projector) {
                    Ok(projected) => projected,
                    Err(source) => {
                        warn!("entity {index}: skipping edge: {source}");
                        report.skipped.push(FrameError::Topology {
                            entity: index,
                            source,
                        });
                        continue;
                    }
                };
                if !projected.visible {
                    continue;
                }
                surface.submit(&line_buffer(&projected, max_h, max_v), None, 1);
                report.edges_submitted += 1;
            }
        }
        report
    }

    /// Solid: every face of every entity, depth ordered and filled.
    pub fn draw_full_world(
        &mut self,
        scene: &Scene,
        camera: &CameraState,
        surface: &mut impl RenderSurface,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        let ordered = self.ordered_triangles(scene, camera, false, &mut report);
        submit_triangles(&ordered, camera, surface, &mut report);
        report
    }

    /// Outline: faces rebuilt from visible edges only, partial faces closed
    /// through their hanging points.
    pub fn draw_outline(
        &mut self,
        scene: &Scene,
        camera: &CameraState,
        surface: &mut impl RenderSurface,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        let ordered = self.ordered_triangles(scene, camera, true, &mut report);
        submit_triangles(&ordered, camera, surface, &mut report);
        report
    }

    /// Triangles of every renderable face in back-to-front order.
    ///
    /// With `visible_only` set, faces are built from visible edges and
    /// enclosed before conversion.
    pub fn ordered_triangles(
        &mut self,
        scene: &Scene,
        camera: &CameraState,
        visible_only: bool,
        report: &mut FrameReport,
    ) -> Vec<Triangle<FaceTag>> {
        let projector = Projector::new(*camera);
        let mut candidates = Vec::new();

        for (index, entity) in scene.entities.iter().enumerate() {
            let (mut figure, errors) = Figure::from_entity(entity, &projector, visible_only);
            for source in errors {
                warn!("entity {index}: skipping edge: {source}");
                report.skipped.push(FrameError::Topology {
                    entity: index,
                    source,
                });
            }

            if self.config.cull_back_faces {
                figure.mark_front_facing(entity, &camera.position);
            }
            if visible_only {
                figure.enclose_all();
            }

            for face in figure.renderable_faces() {
                report.renderable_faces += 1;
                let tag = FaceTag {
                    entity: index,
                    side: face.side,
                };
                match face.convert_to_triangles(Some(tag)) {
                    Ok((a, b)) => candidates.extend([a, b]),
                    Err(source) => {
                        debug!("entity {index}: skipping face: {source}");
                        report.skipped.push(FrameError::Reconstruction {
                            entity: index,
                            source,
                        });
                    }
                }
            }
        }

        let ordered = self.tree.order(candidates);
        for err in self.tree.take_errors() {
            debug!("skipping fragment: {err}");
            report.skipped.push(err.into());
        }
        if self.tree.truncated() {
            warn!(
                "depth ordering stopped clipping after {} levels",
                self.tree.config().max_depth
            );
            report.truncated = true;
        }
        ordered
    }
}

fn line_buffer(edge: &ProjectedEdge, max_h: Real, max_v: Real) -> [f32; 9] {
    let (x1, y1) = normalize_position(edge.p1_angles.0, edge.p1_angles.1, max_h, max_v);
    let (x2, y2) = normalize_position(edge.p2_angles.0, edge.p2_angles.1, max_h, max_v);
    let (x1, y1, x2, y2) = (x1 as f32, y1 as f32, x2 as f32, y2 as f32);
    [x1, y1, 0.0, x2, y2, 0.0, x2, y2, 0.0]
}

/// One batch holding every triangle, in drawing order.
fn submit_triangles(
    triangles: &[Triangle<FaceTag>],
    camera: &CameraState,
    surface: &mut impl RenderSurface,
    report: &mut FrameReport,
) {
    if triangles.is_empty() {
        return;
    }
    let (max_h, max_v) = (camera.fov.half_horizontal(), camera.fov.half_vertical());

    let mut vertices = Vec::with_capacity(triangles.len() * 9);
    let mut colors = Vec::with_capacity(triangles.len() * 9);
    for triangle in triangles {
        vertices.extend_from_slice(&triangle.to_buffer(max_h, max_v));
        let colour = triangle
            .metadata
            .map_or([1.0, 1.0, 1.0], |tag| side_colour(tag.side));
        for _ in 0..3 {
            colors.extend_from_slice(&colour);
        }
    }

    surface.submit(&vertices, Some(&colors), triangles.len());
    report.triangles_submitted += triangles.len();
}
