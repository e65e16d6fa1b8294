use crate::export::sink::{SinkConfig, SlideSink};
use crate::foundation::error::{SlideforgeError, SlideforgeResult};
use std::io::{Cursor, Write as _};
use zip::write::SimpleFileOptions;

/// Stable name of archive entry `number` (1-based).
pub fn entry_name(number: u32) -> String {
    format!("slide-{number}.png")
}

/// The bundled result of one export: ZIP bytes plus ordered entry names.
///
/// The archive is a transient download payload; callers write or transmit
/// the blob and drop it. The outer file name (`<prefix>-<timestamp>.zip`
/// upstream) is a caller concern — only the internal entry naming is part
/// of the engine contract.
#[derive(Debug, Clone)]
pub struct ExportArchive {
    /// ZIP file bytes.
    pub blob: Vec<u8>,
    /// Entry names in archive order (`slide-1.png`, `slide-2.png`, ...).
    pub entry_names: Vec<String>,
}

/// Sink assembling `slide-{n}.png` entries into an in-memory ZIP archive.
pub struct ZipSink {
    writer: Option<zip::ZipWriter<Cursor<Vec<u8>>>>,
    entry_names: Vec<String>,
    last_number: u32,
    archive: Option<ExportArchive>,
}

impl ZipSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            writer: None,
            entry_names: Vec::new(),
            last_number: 0,
            archive: None,
        }
    }

    /// Take the assembled archive after [`SlideSink::finish`].
    pub fn into_archive(self) -> SlideforgeResult<ExportArchive> {
        self.archive
            .ok_or_else(|| SlideforgeError::encode("zip sink was not finished"))
    }
}

impl Default for ZipSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideSink for ZipSink {
    fn begin(&mut self, cfg: SinkConfig) -> SlideforgeResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SlideforgeError::validation(
                "zip sink width/height must be non-zero",
            ));
        }
        self.writer = Some(zip::ZipWriter::new(Cursor::new(Vec::new())));
        self.entry_names.clear();
        self.last_number = 0;
        self.archive = None;
        Ok(())
    }

    fn push_slide(&mut self, number: u32, png: &[u8]) -> SlideforgeResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(SlideforgeError::encode("push_slide called before begin"));
        };
        if number != self.last_number + 1 {
            return Err(SlideforgeError::encode(format!(
                "slides must be pushed in order: got {number} after {}",
                self.last_number
            )));
        }

        let name = entry_name(number);
        let opts =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        writer
            .start_file(name.clone(), opts)
            .map_err(|e| SlideforgeError::encode(format!("zip entry '{name}': {e}")))?;
        writer
            .write_all(png)
            .map_err(|e| SlideforgeError::encode(format!("zip write '{name}': {e}")))?;

        self.entry_names.push(name);
        self.last_number = number;
        Ok(())
    }

    fn finish(&mut self) -> SlideforgeResult<()> {
        let Some(writer) = self.writer.take() else {
            return Err(SlideforgeError::encode("finish called before begin"));
        };
        let cursor = writer
            .finish()
            .map_err(|e| SlideforgeError::encode(format!("zip finalize: {e}")))?;
        self.archive = Some(ExportArchive {
            blob: cursor.into_inner(),
            entry_names: std::mem::take(&mut self.entry_names),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/zip.rs"]
mod tests;
