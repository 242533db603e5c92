use std::io::Write;

use crate::eval::sample::ElementSample;
use crate::foundation::error::{ScrollcueError, ScrollcueResult};

/// Consumer of evaluated samples; writes them into the visual layer.
///
/// Ordering contract: for one scroll update, `begin` is called once, then
/// `apply` once per element in record order, then `end`.
pub trait Renderer {
    /// Called before the first sample of a scroll update.
    fn begin(&mut self, _scroll: f64) -> ScrollcueResult<()> {
        Ok(())
    }
    /// Apply one element's sample.
    fn apply(&mut self, sample: &ElementSample) -> ScrollcueResult<()>;
    /// Called after the last sample of a scroll update.
    fn end(&mut self) -> ScrollcueResult<()> {
        Ok(())
    }
}

/// In-memory renderer for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryRenderer {
    scroll: Option<f64>,
    samples: Vec<ElementSample>,
}

impl InMemoryRenderer {
    /// Create an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll position of the last update, if any.
    pub fn scroll(&self) -> Option<f64> {
        self.scroll
    }

    /// Samples of the last update.
    pub fn samples(&self) -> &[ElementSample] {
        &self.samples
    }
}

impl Renderer for InMemoryRenderer {
    fn begin(&mut self, scroll: f64) -> ScrollcueResult<()> {
        self.scroll = Some(scroll);
        self.samples.clear();
        Ok(())
    }

    fn apply(&mut self, sample: &ElementSample) -> ScrollcueResult<()> {
        self.samples.push(sample.clone());
        Ok(())
    }
}

/// Writes one `id visible x y opacity` line per element.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn apply(&mut self, s: &ElementSample) -> ScrollcueResult<()> {
        let shown = if s.visible { "visible" } else { "hidden" };
        writeln!(
            self.out,
            "{} {shown} x={} y={} opacity={}",
            s.id, s.x, s.y, s.opacity
        )
        .map_err(|e| ScrollcueError::Other(e.into()))
    }

    fn end(&mut self) -> ScrollcueResult<()> {
        self.out
            .flush()
            .map_err(|e| ScrollcueError::Other(e.into()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
