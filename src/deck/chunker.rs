use crate::deck::model::SlideChunk;

/// Default character budget for one smart-split chunk.
pub const DEFAULT_SMART_LIMIT: usize = 220;

/// Extra characters the smart splitter may inspect past the limit when
/// hunting for a sentence boundary.
const SMART_LOOKAHEAD: usize = 20;

/// Pagination strategy for [`chunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkMode {
    /// Split on blank-line runs; no length bounding. Overly long paragraphs
    /// overflow the canvas instead of auto-splitting.
    Paragraph,
    /// Punctuation-aware greedy split bounded by a character budget.
    Smart {
        /// Character budget per chunk.
        limit: usize,
    },
}

/// Paginate a raw document into ordered slide chunks.
///
/// Empty or whitespace-only input yields an empty vector: the canonical
/// "no content" state, not an error.
pub fn chunk(raw: &str, mode: ChunkMode) -> Vec<SlideChunk> {
    let pieces = match mode {
        ChunkMode::Paragraph => paragraph_pieces(raw),
        ChunkMode::Smart { limit } => smart_pieces(raw, limit),
    };
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, text)| SlideChunk {
            index: i as u32,
            text,
        })
        .collect()
}

/// Smart-split the whole document and rejoin the chunks with blank lines.
///
/// The result is a paragraph-delimited document: feeding it back through
/// [`ChunkMode::Paragraph`] reproduces the smart chunks one-to-one, so
/// later edits keep flowing through the default paragraph mode.
pub fn resplit(raw: &str, limit: usize) -> String {
    smart_pieces(raw, limit).join("\n\n")
}

/// Split on runs of two-or-more consecutive line breaks, trim each piece
/// and drop the empty ones.
fn paragraph_pieces(raw: &str) -> Vec<String> {
    // CRLF documents normalize to plain newlines before the blank-line scan.
    let raw = raw.replace('\r', "");
    let bytes = raw.as_bytes();

    let mut pieces = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let run_start = i;
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] == b'\n' {
                j += 1;
            }
            if j - run_start >= 2 {
                pieces.push(&raw[start..run_start]);
                start = j;
            }
            i = j;
        } else {
            i += 1;
        }
    }
    pieces.push(&raw[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Greedy length-bounded walk over the flattened document.
///
/// Positions are character positions, not bytes, so multi-byte text never
/// splits inside a scalar value. Each iteration consumes at least one
/// character, so the walk terminates in `O(len / limit)` iterations.
fn smart_pieces(raw: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);

    // All line breaks collapse to single spaces before the walk.
    let flat = raw.replace('\r', " ").replace('\n', " ");
    let chars: Vec<char> = flat.trim().chars().collect();

    let mut out = Vec::new();
    let mut rest: &[char] = &chars;
    loop {
        rest = trim_chars(rest);
        if rest.is_empty() {
            break;
        }
        if rest.len() <= limit {
            out.push(collect_trimmed(rest));
            break;
        }

        let window = &rest[..(limit + SMART_LOOKAHEAD).min(rest.len())];
        let last_punct = window
            .iter()
            .rposition(|c| matches!(c, '.' | '!' | '?'));

        // Sentence boundaries win over spaces, but only in the second half
        // of the lookback window; earlier marks would leave a stub chunk.
        let cut = match last_punct {
            Some(p) if p > limit / 2 => p + 1,
            _ => match rest[..=limit].iter().rposition(|c| *c == ' ') {
                Some(s) => s,
                // Hard failover: no boundary in range, split mid-word.
                None => limit,
            },
        };

        out.push(collect_trimmed(&rest[..cut]));
        rest = &rest[cut..];
    }
    out
}

fn trim_chars(s: &[char]) -> &[char] {
    let start = s
        .iter()
        .position(|c| !c.is_whitespace())
        .unwrap_or(s.len());
    let end = s
        .iter()
        .rposition(|c| !c.is_whitespace())
        .map_or(start, |e| e + 1);
    &s[start..end]
}

fn collect_trimmed(s: &[char]) -> String {
    trim_chars(s).iter().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/deck/chunker.rs"]
mod tests;
