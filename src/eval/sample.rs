use crate::compile::driver::CompilationReport;
use crate::eval::record::{CompiledRecord, VIEWPORT_SPAN};
use crate::foundation::core::{ElementHandle, Output};
use crate::foundation::error::ScrollcueResult;
use crate::render::Renderer;

/// Every channel of one element at one scroll position.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ElementSample {
    /// Element id.
    pub id: String,
    /// Element handle.
    pub handle: ElementHandle,
    /// Whether the element should be shown at all.
    pub visible: bool,
    /// Local progress the channels were evaluated at (unclamped).
    pub progress: f64,
    /// Horizontal position.
    pub x: Output,
    /// Vertical position.
    pub y: Output,
    /// Opacity.
    pub opacity: Output,
}

impl CompiledRecord {
    /// Evaluate every channel at global scroll position `scroll`.
    pub fn sample(&self, scroll: f64) -> ElementSample {
        let progress = self.local_progress(scroll);
        ElementSample {
            id: self.id.clone(),
            handle: self.handle,
            visible: self.visible(scroll),
            progress,
            x: self.eval_x(progress),
            y: self.eval_y(progress),
            opacity: self.eval_opacity(progress),
        }
    }
}

impl CompilationReport {
    /// Largest meaningful scroll position.
    pub fn max_scroll(&self) -> f64 {
        (self.total_extent + VIEWPORT_SPAN).max(0.0)
    }

    /// Clamp a raw scroll position into `[0, total_extent + 100]`.
    pub fn clamp_scroll(&self, scroll: f64) -> f64 {
        if scroll.is_nan() {
            return 0.0;
        }
        scroll.clamp(0.0, self.max_scroll())
    }

    /// Sample every record, in record order.
    pub fn sample_all(&self, scroll: f64) -> Vec<ElementSample> {
        let scroll = self.clamp_scroll(scroll);
        self.records.iter().map(|r| r.sample(scroll)).collect()
    }

    /// Sample every record and hand the results to `renderer`.
    #[tracing::instrument(skip(self, renderer))]
    pub fn render(&self, scroll: f64, renderer: &mut dyn Renderer) -> ScrollcueResult<()> {
        let scroll = self.clamp_scroll(scroll);
        renderer.begin(scroll)?;
        for record in &self.records {
            renderer.apply(&record.sample(scroll))?;
        }
        renderer.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/sample.rs"]
mod tests;
