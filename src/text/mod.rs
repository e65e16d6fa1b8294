//! Font registry, shaping/measurement, and line breaking.
//!
//! Measurement and drawing must share one font resolution path, or wrapping
//! silently desyncs from drawn width; [`shaper::TextShaper`] is that single
//! path.

/// Font registry populated at the boundary.
pub mod fonts;
/// Parley-backed shaping and pixel measurement.
pub mod shaper;
/// Greedy word wrap and vertical block layout.
pub mod wrap;
