use crate::deck::chunker::{ChunkMode, chunk, resplit};
use crate::deck::model::{RenderConfig, SlideChunk};
use crate::export::pipeline::{ExportOpts, build_thread_pool, export_zip};
use crate::export::zip::ExportArchive;
use crate::foundation::error::SlideforgeResult;
use crate::render::slide::SlideRenderer;
use crate::render::surface::SurfaceRGBA;
use crate::text::fonts::FontLibrary;
use rayon::prelude::*;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x51d3_f0c9_e417_ab62;

/// Options controlling deck rendering behavior.
#[derive(Clone, Debug, Default)]
pub struct DeckSessionOpts {
    /// Render slides on a rayon pool when `true`.
    pub parallel: bool,
    /// Override the number of worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Deck render counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckStats {
    /// Slides produced by the most recent render pass.
    pub slides_total: u64,
    /// Slides rasterized across the session lifetime.
    pub slides_rendered: u64,
    /// Full render passes executed. Config and text changes each force a
    /// new pass; unchanged decks reuse the cached surfaces.
    pub render_passes: u64,
}

/// Session-oriented pipeline: raw document in, rendered deck and archive
/// out.
///
/// The session owns the document, regenerates the chunk sequence wholesale
/// on every edit, and discards every rendered surface whenever the deck
/// fingerprint (config + chunk texts + canvas) changes. Stale surfaces are
/// never mixed with fresh ones, and surfaces are never patched in place.
pub struct DeckSession {
    fonts: FontLibrary,
    config: RenderConfig,
    opts: DeckSessionOpts,
    raw_text: String,
    chunks: Vec<SlideChunk>,
    surfaces: Vec<SurfaceRGBA>,
    rendered_fingerprint: Option<DeckFingerprint>,
    stats: DeckStats,
    renderer: SlideRenderer,
}

impl DeckSession {
    /// Create a session over `fonts` with a validated config.
    ///
    /// The render path assumes validated ranges, so the config is checked
    /// once here (and again on every [`DeckSession::set_config`]).
    pub fn new(
        fonts: FontLibrary,
        config: RenderConfig,
        opts: DeckSessionOpts,
    ) -> SlideforgeResult<Self> {
        config.validate()?;
        let renderer = SlideRenderer::new(fonts.clone());
        Ok(Self {
            fonts,
            config,
            opts,
            raw_text: String::new(),
            chunks: Vec::new(),
            surfaces: Vec::new(),
            rendered_fingerprint: None,
            stats: DeckStats::default(),
            renderer,
        })
    }

    /// Replace the raw document; chunks regenerate wholesale in paragraph
    /// mode.
    pub fn set_text(&mut self, raw: impl Into<String>) {
        self.raw_text = raw.into();
        self.chunks = chunk(&self.raw_text, ChunkMode::Paragraph);
    }

    /// Smart-split the current document in place.
    ///
    /// Rewrites the raw text as a blank-line-delimited document, so later
    /// edits keep flowing through paragraph mode.
    pub fn resplit(&mut self, limit: usize) {
        self.raw_text = resplit(&self.raw_text, limit);
        self.chunks = chunk(&self.raw_text, ChunkMode::Paragraph);
    }

    /// Replace the render config after validating it.
    pub fn set_config(&mut self, config: RenderConfig) -> SlideforgeResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The current raw document.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The current render config.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Current ordered chunk sequence.
    pub fn chunks(&self) -> &[SlideChunk] {
        &self.chunks
    }

    /// Render counters accumulated by this session.
    pub fn stats(&self) -> DeckStats {
        self.stats
    }

    /// Render every slide, reusing the cached surfaces when nothing
    /// changed.
    ///
    /// Slide renders are independent (the config is read-only), so the
    /// parallel path renders them in any completion order; the returned
    /// ordering is imposed by chunk index, with `surfaces[i]` corresponding
    /// to `chunks()[i]`.
    #[tracing::instrument(skip_all, fields(slides = self.chunks.len()))]
    pub fn render_deck(&mut self) -> SlideforgeResult<&[SurfaceRGBA]> {
        let fingerprint = self.fingerprint();
        if self.rendered_fingerprint == Some(fingerprint) {
            return Ok(&self.surfaces);
        }

        // Any change invalidates the whole pass; prior surfaces are
        // discarded before the first new one exists.
        self.surfaces = Vec::new();
        self.rendered_fingerprint = None;

        let total = self.chunks.len() as u32;
        let rendered = if self.opts.parallel {
            let pool = build_thread_pool(self.opts.threads)?;
            let fonts = self.fonts.clone();
            let config = self.config.clone();
            let chunks = &self.chunks;
            let results: Vec<SlideforgeResult<SurfaceRGBA>> = pool.install(|| {
                chunks
                    .par_iter()
                    .map_init(
                        || SlideRenderer::new(fonts.clone()),
                        |worker, c| worker.render(c, total, &config),
                    )
                    .collect()
            });
            let mut out = Vec::with_capacity(results.len());
            for result in results {
                out.push(result?);
            }
            out
        } else {
            let mut out = Vec::with_capacity(self.chunks.len());
            for c in &self.chunks {
                out.push(self.renderer.render(c, total, &self.config)?);
            }
            out
        };

        self.stats.slides_total = rendered.len() as u64;
        self.stats.slides_rendered += rendered.len() as u64;
        self.stats.render_passes += 1;
        self.surfaces = rendered;
        self.rendered_fingerprint = Some(fingerprint);
        Ok(&self.surfaces)
    }

    /// Render (if stale) and bundle the deck into a ZIP archive.
    pub fn export_zip(&mut self) -> SlideforgeResult<ExportArchive> {
        let opts = ExportOpts {
            threads: self.opts.threads,
        };
        self.render_deck()?;
        export_zip(&self.surfaces, &opts)
    }

    fn fingerprint(&self) -> DeckFingerprint {
        let mut h = StableHasher::new();
        let canvas = self.renderer.canvas();
        h.write_u32(canvas.width);
        h.write_u32(canvas.height);
        h.write_u32(self.config.font_size_px);
        h.write_str(&self.config.font_family);
        h.write_str(&self.config.signature);
        h.write_u8(u8::from(self.config.tier.is_watermarked()));
        h.write_u32(self.chunks.len() as u32);
        for c in &self.chunks {
            h.write_str(&c.text);
        }
        h.finish()
    }
}

/// 128-bit digest of everything a render pass depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DeckFingerprint {
    hi: u64,
    lo: u64,
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> DeckFingerprint {
        let v = self.inner.digest128();
        DeckFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/deck_session.rs"]
mod tests;
