//! Painter's-algorithm depth ordering.
//!
//! A [`DepthOrderTree`] turns an unordered batch of projected triangles into
//! a chain of [`SplitNode`]s. Each node picks a pivot, clips every triangle
//! that overlaps it so the farther one loses the shared area, and defers what
//! lies behind the pivot to its single child. Traversal emits the child
//! before the node, which yields a back-to-front stream.

pub mod geo_ops;
pub mod node;
pub mod traits;

pub use geo_ops::{GeoOps, JitterConfig};
pub use node::{NodeState, SplitNode};
pub use traits::GeometryOps;

use crate::errors::GeometryError;
use crate::float_types::AREA_EPSILON;
use crate::polygon::Triangle;
use geo::Area;

/// Which triangle a node classifies the others against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotSelection {
    /// Stably sort nearest-first and take the head
    #[default]
    Nearest,
    /// Take the head of the list in the order it arrived
    First,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeConfig {
    pub pivot: PivotSelection,
    /// Node levels built with clipping before the rest is sorted as-is
    pub max_depth: usize,
    pub jitter: JitterConfig,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            pivot: PivotSelection::default(),
            max_depth: 4096,
            jitter: JitterConfig::default(),
        }
    }
}

/// Builds depth-order trees, clipping through a [`GeometryOps`] backend.
#[derive(Debug, Clone)]
pub struct DepthOrderTree<G: GeometryOps = GeoOps> {
    ops: G,
    config: TreeConfig,
    errors: Vec<GeometryError>,
    truncated: bool,
}

impl Default for DepthOrderTree<GeoOps> {
    fn default() -> Self {
        Self::from_config(TreeConfig::default())
    }
}

impl DepthOrderTree<GeoOps> {
    /// A tree backed by [`GeoOps`] seeded from `config.jitter`.
    pub fn from_config(config: TreeConfig) -> Self {
        Self::new(GeoOps::new(config.jitter), config)
    }
}

impl<G: GeometryOps> DepthOrderTree<G> {
    pub const fn new(ops: G, config: TreeConfig) -> Self {
        DepthOrderTree {
            ops,
            config,
            errors: Vec::new(),
            truncated: false,
        }
    }

    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Whether the last build hit `max_depth` and stopped clipping.
    pub const fn truncated(&self) -> bool {
        self.truncated
    }

    /// Fragments the last build failed to triangulate; drains the list.
    pub fn take_errors(&mut self) -> Vec<GeometryError> {
        std::mem::take(&mut self.errors)
    }

    /// Build the node chain for `triangles`.
    ///
    /// Levels are classified one after another and linked up at the end, so
    /// deep chains never recurse.
    pub fn build<S: Clone>(&mut self, triangles: Vec<Triangle<S>>) -> SplitNode<S> {
        self.errors.clear();
        self.truncated = false;

        let mut levels: Vec<SplitNode<S>> = Vec::new();
        let mut working = triangles;
        while !working.is_empty() {
            let mut node = SplitNode::new();
            if levels.len() >= self.config.max_depth {
                self.truncated = true;
                sort_farthest_first(&mut working);
                node.settle(working, false);
                levels.push(node);
                break;
            }
            let (ready, bucket) = self.split(working);
            node.settle(ready, !bucket.is_empty());
            levels.push(node);
            working = bucket;
        }

        let mut child: Option<SplitNode<S>> = None;
        for mut node in levels.into_iter().rev() {
            node.child = child.map(Box::new);
            child = Some(node);
        }
        child.unwrap_or_else(SplitNode::empty)
    }

    /// Drawing order of a built tree, see [`SplitNode::traverse`].
    pub fn traverse<S: Clone>(&self, root: &SplitNode<S>) -> Vec<Triangle<S>> {
        root.traverse()
    }

    /// Build and flatten in one step.
    pub fn order<S: Clone>(&mut self, triangles: Vec<Triangle<S>>) -> Vec<Triangle<S>> {
        self.build(triangles).into_triangles()
    }

    /// Classify one level: returns its ready set and the deferred bucket.
    fn split<S: Clone>(
        &mut self,
        mut triangles: Vec<Triangle<S>>,
    ) -> (Vec<Triangle<S>>, Vec<Triangle<S>>) {
        if self.config.pivot == PivotSelection::Nearest {
            triangles.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        }

        let mut rest = triangles.into_iter();
        let mut pivot = rest.next();
        let mut ready = Vec::new();
        let mut bucket = Vec::new();

        for t in rest {
            let Some(p) = pivot.as_ref() else {
                // pivot consumed: leave the rest for the child
                bucket.push(t);
                continue;
            };

            if !p.overlaps(&t) {
                if t.is_farther_than(p) {
                    bucket.push(t);
                } else {
                    ready.push(t);
                }
                continue;
            }

            if p.is_farther_than(&t) {
                let fragments = self.clip(p, &t);
                // the nearer triangle leads the next level
                bucket.insert(0, t);
                bucket.extend(fragments);
                bucket.append(&mut ready);
                pivot = None;
            } else {
                let fragments = self.clip(&t, p);
                bucket.extend(fragments);
            }
        }

        if let Some(p) = pivot {
            ready.push(p);
        }
        sort_farthest_first(&mut ready);
        (ready, bucket)
    }

    /// `farther` minus `nearer`, triangulated; fragments keep the farther
    /// triangle's depth and metadata. Slivers below `AREA_EPSILON` are dropped.
    fn clip<S: Clone>(
        &mut self,
        farther: &Triangle<S>,
        nearer: &Triangle<S>,
    ) -> Vec<Triangle<S>> {
        let remains = self
            .ops
            .clip_difference(&farther.vertices, &nearer.vertices);

        let mut fragments = Vec::new();
        for polygon in remains.0.iter().filter(|p| p.unsigned_area() > AREA_EPSILON) {
            match self.ops.triangulate(polygon) {
                Ok(pieces) => fragments.extend(
                    pieces
                        .into_iter()
                        .map(|v| Triangle::new(v, farther.depth, farther.metadata.clone()))
                        .filter(|t| !t.is_degenerate()),
                ),
                Err(err) => self.errors.push(err),
            }
        }
        fragments
    }
}

fn sort_farthest_first<S: Clone>(triangles: &mut [Triangle<S>]) {
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::Real;
    use geo::{LineString, MultiPolygon, Polygon as GeoPolygon};
    use nalgebra::Point3;

    fn tri(points: [(Real, Real); 3], depth: Real, tag: u8) -> Triangle<u8> {
        Triangle::from_angles(points, depth, Some(tag))
    }

    fn big(depth: Real) -> Triangle<u8> {
        tri([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], depth, 1)
    }

    fn small(depth: Real) -> Triangle<u8> {
        tri([(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)], depth, 2)
    }

    fn area_of(triangles: &[Triangle<u8>], tag: u8) -> Real {
        triangles
            .iter()
            .filter(|t| t.metadata == Some(tag))
            .map(Triangle::area)
            .sum()
    }

    /// Hands the subject back whole and refuses to triangulate it.
    struct FailingOps;

    impl GeometryOps for FailingOps {
        fn clip_difference(
            &mut self,
            subject: &[Point3<Real>; 3],
            _clip: &[Point3<Real>; 3],
        ) -> MultiPolygon<Real> {
            let ring: Vec<(Real, Real)> = subject.iter().map(|p| (p.x, p.y)).collect();
            MultiPolygon::new(vec![GeoPolygon::new(LineString::from(ring), Vec::new())])
        }

        fn triangulate(
            &mut self,
            polygon: &GeoPolygon<Real>,
        ) -> Result<Vec<[Point3<Real>; 3]>, GeometryError> {
            Err(GeometryError::EmptyTriangulation {
                points: polygon.exterior().0.len(),
            })
        }
    }

    #[test]
    fn empty_input_builds_empty_leaf() {
        let mut tree: DepthOrderTree = DepthOrderTree::default();
        let root = tree.build::<u8>(Vec::new());
        assert!(root.leaf);
        assert_eq!(root.state, NodeState::LeafReady);
        assert!(tree.traverse(&root).is_empty());
    }

    #[test]
    fn disjoint_triangles_come_out_farthest_first() {
        let mut tree: DepthOrderTree = DepthOrderTree::default();
        let a = tri([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], 3.0, 1);
        let b = tri([(5.0, 0.0), (6.0, 0.0), (5.0, 1.0)], 7.0, 2);
        let c = tri([(0.0, 5.0), (1.0, 5.0), (0.0, 6.0)], 5.0, 3);

        let ordered = tree.order(vec![a, b, c]);
        let tags: Vec<_> = ordered.iter().map(|t| t.metadata).collect();
        assert_eq!(tags, vec![Some(2), Some(3), Some(1)]);
        assert!(tree.take_errors().is_empty());
    }

    #[test]
    fn farther_triangle_loses_the_overlap() {
        let mut tree: DepthOrderTree = DepthOrderTree::default();
        let ordered = tree.order(vec![big(10.0), small(2.0)]);

        assert_eq!(ordered.last().and_then(|t| t.metadata), Some(2));
        assert!((area_of(&ordered, 1) - 7.5).abs() < 1e-9);
        assert!((area_of(&ordered, 2) - 0.5).abs() < 1e-9);
        assert!(ordered.iter().filter(|t| t.metadata == Some(1)).all(|t| t.depth == 10.0));
        assert!(!tree.truncated());
    }

    #[test]
    fn consumed_pivot_defers_everything() {
        let mut tree = DepthOrderTree::from_config(TreeConfig {
            pivot: PivotSelection::First,
            ..TreeConfig::default()
        });
        let lone = tri([(10.0, 0.0), (11.0, 0.0), (10.0, 1.0)], 1.0, 3);
        let root = tree.build(vec![big(10.0), lone, small(2.0)]);

        // the far pivot was consumed, so the root draws nothing itself
        assert!(root.ready.is_empty());
        assert_eq!(root.state, NodeState::Split);

        let ordered = tree.traverse(&root);
        assert!((area_of(&ordered, 1) - 7.5).abs() < 1e-9);
        assert_eq!(ordered.iter().filter(|t| t.metadata == Some(2)).count(), 1);
        assert_eq!(ordered.iter().filter(|t| t.metadata == Some(3)).count(), 1);

        let small_at = ordered.iter().position(|t| t.metadata == Some(2));
        let last_big = ordered.iter().rposition(|t| t.metadata == Some(1));
        assert!(last_big < small_at);
    }

    #[test]
    fn triangulation_failures_are_collected() {
        let mut tree = DepthOrderTree::new(FailingOps, TreeConfig::default());
        let ordered = tree.order(vec![big(10.0), small(2.0)]);

        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].metadata, Some(2));
        assert_eq!(
            tree.take_errors(),
            vec![GeometryError::EmptyTriangulation { points: 4 }]
        );
        assert!(tree.take_errors().is_empty());
    }

    /// Leaves only a hair-thin sliver of the subject behind.
    struct SliverOps;

    impl GeometryOps for SliverOps {
        fn clip_difference(
            &mut self,
            subject: &[Point3<Real>; 3],
            _clip: &[Point3<Real>; 3],
        ) -> MultiPolygon<Real> {
            let [a, b, _] = subject;
            let sliver = vec![(a.x, a.y), (b.x, b.y), (b.x, b.y + 1e-12)];
            MultiPolygon::new(vec![GeoPolygon::new(LineString::from(sliver), Vec::new())])
        }

        fn triangulate(
            &mut self,
            _polygon: &GeoPolygon<Real>,
        ) -> Result<Vec<[Point3<Real>; 3]>, GeometryError> {
            Err(GeometryError::DegenerateTriangulation("sliver".into()))
        }
    }

    #[test]
    fn slivers_are_dropped_without_errors() {
        let mut tree = DepthOrderTree::new(SliverOps, TreeConfig::default());
        let ordered = tree.order(vec![big(10.0), small(2.0)]);

        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].metadata, Some(2));
        assert!(tree.take_errors().is_empty());
    }

    #[test]
    fn max_depth_stops_clipping() {
        let mut tree = DepthOrderTree::from_config(TreeConfig {
            max_depth: 0,
            ..TreeConfig::default()
        });
        let ordered = tree.order(vec![small(2.0), big(10.0)]);

        assert!(tree.truncated());
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].metadata, Some(1));
        assert_eq!(ordered[1].metadata, Some(2));
    }
}
