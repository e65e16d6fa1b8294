use crate::export::png::encode_png;
use crate::export::sink::{SinkConfig, SlideSink};
use crate::export::zip::{ExportArchive, ZipSink};
use crate::foundation::error::{SlideforgeError, SlideforgeResult};
use crate::render::surface::SurfaceRGBA;
use rayon::prelude::*;

/// Concurrency options for [`export_deck`].
#[derive(Clone, Debug, Default)]
pub struct ExportOpts {
    /// Optional explicit worker thread count for the encode fan-out.
    /// `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Encode every surface to PNG concurrently, then push the results into
/// `sink` in deck order.
///
/// Fan-out/fan-in: all encodes run with no mutual ordering, and a strict
/// barrier joins the full set before the first sink push — entry order is
/// imposed by index at assembly time, never by encode completion order. Any
/// single encode failure fails the whole batch: nothing reaches the sink,
/// and a caller wanting the export must retry the full set.
#[tracing::instrument(skip_all, fields(slides = surfaces.len()))]
pub fn export_deck(
    surfaces: &[SurfaceRGBA],
    sink: &mut dyn SlideSink,
    opts: &ExportOpts,
) -> SlideforgeResult<()> {
    let Some(first) = surfaces.first() else {
        return Err(SlideforgeError::validation("cannot export an empty deck"));
    };

    let pool = build_thread_pool(opts.threads)?;
    let encoded: Vec<SlideforgeResult<Vec<u8>>> =
        pool.install(|| surfaces.par_iter().map(encode_png).collect());

    // Join barrier: every encode has resolved before anything is assembled.
    let mut blobs = Vec::with_capacity(encoded.len());
    for result in encoded {
        blobs.push(result?);
    }

    sink.begin(SinkConfig {
        width: first.width,
        height: first.height,
        slide_count: surfaces.len() as u32,
    })?;
    for (i, png) in blobs.iter().enumerate() {
        sink.push_slide(i as u32 + 1, png)?;
    }
    sink.finish()
}

/// Export straight to an in-memory ZIP archive.
pub fn export_zip(surfaces: &[SurfaceRGBA], opts: &ExportOpts) -> SlideforgeResult<ExportArchive> {
    let mut sink = ZipSink::new();
    export_deck(surfaces, &mut sink, opts)?;
    sink.into_archive()
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> SlideforgeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlideforgeError::validation(
            "worker 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlideforgeError::render(format!("failed to build rayon thread pool: {e}")))
}
