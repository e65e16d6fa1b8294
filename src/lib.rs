//! Slideforge turns a block of free-form text into a fixed sequence of
//! square raster slides and packages them for download.
//!
//! The pipeline flows strictly forward: raw text → chunker → per-slide text
//! → line breaker → slide renderer → export pipeline → ZIP archive. Each
//! slide render is pure given its inputs, so renders parallelize freely and
//! re-render wholesale on any config or text change.
//!
//! The public API is session-oriented:
//!
//! - Register typefaces in a [`FontLibrary`]
//! - Create a [`DeckSession`] from a validated [`RenderConfig`]
//! - Feed it text, then [`DeckSession::render_deck`] and
//!   [`DeckSession::export_zip`]
//!
//! The lower-level pieces ([`chunk`], [`wrap`], [`SlideRenderer`],
//! [`export_deck`]) are exposed for callers that orchestrate their own
//! pipeline.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Boundary data model and pagination.
pub mod deck;
/// Export pipeline: PNG encoding, sinks, ZIP assembly.
pub mod export;
/// Slide rasterization.
pub mod render;
/// Session-oriented orchestration API.
pub mod session;
/// Font registry, shaping and line breaking.
pub mod text;

pub use crate::foundation::core::{Canvas, Rgba8};
pub use crate::foundation::error::{SlideforgeError, SlideforgeResult};

pub use crate::deck::chunker::{ChunkMode, DEFAULT_SMART_LIMIT, chunk, resplit};
pub use crate::deck::model::{
    MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX, RenderConfig, SlideChunk, Tier,
};
pub use crate::export::pipeline::{ExportOpts, export_deck, export_zip};
pub use crate::export::sink::{InMemorySink, SinkConfig, SlideSink};
pub use crate::export::zip::{ExportArchive, ZipSink, entry_name};
pub use crate::render::slide::SlideRenderer;
pub use crate::render::surface::SurfaceRGBA;
pub use crate::session::deck_session::{DeckSession, DeckSessionOpts, DeckStats};
pub use crate::text::fonts::{FontFace, FontLibrary};
pub use crate::text::shaper::TextShaper;
pub use crate::text::wrap::{LineLayout, wrap};
