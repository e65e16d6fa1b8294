//! Export pipeline: PNG encoding, sinks, and ZIP assembly.
//!
//! Encodes run as an all-or-nothing batch: a fan-out over all surfaces, a
//! strict join barrier, then ordered sink pushes. A failed batch produces no
//! partial archive.

/// Concurrent encode fan-out and ordered sink assembly.
pub mod pipeline;
/// In-memory PNG encoding.
pub mod png;
/// Sink contract and built-in sinks.
pub mod sink;
/// ZIP archive sink.
pub mod zip;
