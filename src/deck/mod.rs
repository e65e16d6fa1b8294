//! Boundary data model and pagination.
//!
//! A deck is an ordered sequence of [`model::SlideChunk`]s produced
//! wholesale from the raw document by the [`chunker`]; chunks are never
//! patched incrementally.

/// Pagination of raw text into slide chunks.
pub mod chunker;
/// Chunk, tier and render-config types.
pub mod model;
