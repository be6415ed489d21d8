//! Where finished vertex buffers go.

/// A sink for triangle batches in normalized device coordinates.
///
/// `vertices` holds `x, y, z` per vertex; `colors`, when given, holds
/// `r, g, b` per vertex. Batches must be drawn in submission order.
pub trait RenderSurface {
    fn submit(&mut self, vertices: &[f32], colors: Option<&[f32]>, primitive_count: usize);
}

/// One call to [`RenderSurface::submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub vertices: Vec<f32>,
    pub colors: Option<Vec<f32>>,
    pub primitive_count: usize,
}

/// Keeps every submission in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub submissions: Vec<Submission>,
}

impl RecordingSurface {
    pub const fn new() -> Self {
        RecordingSurface {
            submissions: Vec::new(),
        }
    }

    /// Sum of `primitive_count` over all submissions.
    pub fn primitive_count(&self) -> usize {
        self.submissions.iter().map(|s| s.primitive_count).sum()
    }

    /// Drop recorded submissions so the surface can take the next frame.
    pub fn clear(&mut self) {
        self.submissions.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn submit(&mut self, vertices: &[f32], colors: Option<&[f32]>, primitive_count: usize) {
        self.submissions.push(Submission {
            vertices: vertices.to_vec(),
            colors: colors.map(<[f32]>::to_vec),
            primitive_count,
        });
    }
}
