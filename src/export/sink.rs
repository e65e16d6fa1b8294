use crate::foundation::error::SlideforgeResult;

/// Configuration provided to a [`SlideSink`] at the start of an export.
#[derive(Debug, Clone, Copy)]
pub struct SinkConfig {
    /// Slide width in pixels.
    pub width: u32,
    /// Slide height in pixels.
    pub height: u32,
    /// Number of slides the export will push.
    pub slide_count: u32,
}

/// Sink contract for consuming encoded slides in deck order.
///
/// Ordering contract: `push_slide` is called with strictly increasing
/// 1-based slide numbers, `1..=slide_count`. The export pipeline only
/// begins pushing once every slide in the batch has encoded successfully.
pub trait SlideSink {
    /// Called once before any slides are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SlideforgeResult<()>;
    /// Push one encoded PNG. `number` is the 1-based slide position.
    fn push_slide(&mut self, number: u32, png: &[u8]) -> SlideforgeResult<()>;
    /// Called once after the last slide is pushed.
    fn finish(&mut self) -> SlideforgeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Encoded slides in deck order.
    pub(crate) slides: Vec<(u32, Vec<u8>)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured slides.
    pub fn slides(&self) -> &[(u32, Vec<u8>)] {
        &self.slides
    }
}

impl SlideSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SlideforgeResult<()> {
        self.cfg = Some(cfg);
        self.slides.clear();
        Ok(())
    }

    fn push_slide(&mut self, number: u32, png: &[u8]) -> SlideforgeResult<()> {
        self.slides.push((number, png.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> SlideforgeResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
