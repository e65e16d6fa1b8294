use super::*;

fn texts(chunks: &[SlideChunk]) -> Vec<&str> {
    chunks.iter().map(|c| c.text.as_str()).collect()
}

fn normalized(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn single_line_yields_one_chunk() {
    let chunks = chunk("HELLO WORLD", ChunkMode::Paragraph);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[0].text, "HELLO WORLD");
}

#[test]
fn blank_line_separates_chunks() {
    let chunks = chunk("A.\n\nB.", ChunkMode::Paragraph);
    assert_eq!(texts(&chunks), vec!["A.", "B."]);
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[1].index, 1);
}

#[test]
fn longer_blank_runs_are_one_separator() {
    let chunks = chunk("a\n\n\n\nb\n\n\nc", ChunkMode::Paragraph);
    assert_eq!(texts(&chunks), vec!["a", "b", "c"]);
}

#[test]
fn single_newlines_stay_inside_a_chunk() {
    let chunks = chunk("line one\nline two\n\nnext", ChunkMode::Paragraph);
    assert_eq!(texts(&chunks), vec!["line one\nline two", "next"]);
}

#[test]
fn pieces_are_trimmed_and_empties_dropped() {
    let chunks = chunk("  first  \n\n   \n\n second ", ChunkMode::Paragraph);
    assert_eq!(texts(&chunks), vec!["first", "second"]);
}

#[test]
fn empty_and_whitespace_input_yield_zero_chunks() {
    assert!(chunk("", ChunkMode::Paragraph).is_empty());
    assert!(chunk("   \n\n \n ", ChunkMode::Paragraph).is_empty());
    assert!(chunk("", ChunkMode::Smart { limit: 220 }).is_empty());
    assert!(chunk("  \n ", ChunkMode::Smart { limit: 220 }).is_empty());
}

#[test]
fn crlf_documents_split_like_lf_documents() {
    let chunks = chunk("A.\r\n\r\nB.", ChunkMode::Paragraph);
    assert_eq!(texts(&chunks), vec!["A.", "B."]);
}

#[test]
fn paragraph_chunks_rejoin_to_the_collapsed_original() {
    let raw = "  alpha beta\n\n\ngamma\ndelta\n\n  epsilon  ";
    let chunks = chunk(raw, ChunkMode::Paragraph);
    let rejoined = texts(&chunks).join("\n\n");
    assert_eq!(rejoined, "alpha beta\n\ngamma\ndelta\n\nepsilon");
    // Re-chunking the rejoined document is a fixed point.
    assert_eq!(texts(&chunk(&rejoined, ChunkMode::Paragraph)), texts(&chunks));
}

#[test]
fn smart_split_cuts_near_boundaries_never_mid_word() {
    let raw = "This is a test sentence.";
    let chunks = chunk(raw, ChunkMode::Smart { limit: 10 });
    // The terminal period sits inside the lookahead window, so the cut
    // lands after it and the sentence stays whole.
    assert_eq!(texts(&chunks), vec![raw]);
    for c in &chunks {
        // No cut may land mid-word: every chunk is a run of whole words.
        for word in c.text.split(' ') {
            assert!(raw.contains(word), "chunk split mid-word: {:?}", c.text);
        }
        assert!(c.text.chars().count() <= 10 + 20);
    }
}

#[test]
fn smart_split_respects_length_budget() {
    let raw = "one two three four five six seven eight nine ten. \
               eleven twelve thirteen fourteen fifteen sixteen!"
        .repeat(8);
    let limit = 60;
    let chunks = chunk(&raw, ChunkMode::Smart { limit });
    assert!(chunks.len() > 1);
    for c in &chunks {
        assert!(
            c.text.chars().count() <= limit + 20,
            "chunk exceeds budget: {} chars",
            c.text.chars().count()
        );
    }
}

#[test]
fn smart_split_rejoins_to_the_flattened_original() {
    let raw = "First sentence here. Second one follows!\nAnd a third\nacross lines? Plus a tail without punctuation";
    let chunks = chunk(raw, ChunkMode::Smart { limit: 30 });
    let rejoined = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(normalized(&rejoined), normalized(raw));
}

#[test]
fn smart_split_prefers_sentence_boundaries() {
    // The period sits in the second half of the lookback window, so the cut
    // lands right after it rather than at the last space.
    let raw = "aaaa bbbb cccc. dddd eeee ffff gggg";
    let chunks = chunk(raw, ChunkMode::Smart { limit: 16 });
    assert_eq!(chunks[0].text, "aaaa bbbb cccc.");
}

#[test]
fn early_punctuation_defers_to_space_cut() {
    // The period lands in the first half of the window; cutting there would
    // leave a stub chunk, so the split falls back to the last space.
    let raw = "ab. cdef ghij klmno pqrst uvwxy";
    let chunks = chunk(raw, ChunkMode::Smart { limit: 20 });
    assert!(chunks[0].text.chars().count() > 3, "{:?}", chunks[0].text);
    assert!(!chunks[0].text.ends_with("ab."));
}

#[test]
fn unbroken_text_hard_cuts_at_the_limit() {
    let raw = "x".repeat(50);
    let chunks = chunk(&raw, ChunkMode::Smart { limit: 20 });
    assert_eq!(texts(&chunks), vec!["x".repeat(20), "x".repeat(20), "x".repeat(10)]);
}

#[test]
fn smart_split_counts_characters_not_bytes() {
    // Multi-byte scalars: a hard cut at the limit must not land inside one.
    let raw = "é".repeat(50);
    let chunks = chunk(&raw, ChunkMode::Smart { limit: 20 });
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].text.chars().count(), 20);
    assert_eq!(chunks[2].text.chars().count(), 10);
}

#[test]
fn smart_split_flattens_line_breaks_to_spaces() {
    let raw = "short\nlines\nthat\nfit";
    let chunks = chunk(raw, ChunkMode::Smart { limit: 220 });
    assert_eq!(texts(&chunks), vec!["short lines that fit"]);
}

#[test]
fn resplit_reenters_paragraph_mode_one_to_one() {
    let raw = "First sentence here. Second one follows! And a third across lines? Plus more text to push past the limit.";
    let limit = 40;
    let document = resplit(raw, limit);
    let direct = chunk(raw, ChunkMode::Smart { limit });
    let reentered = chunk(&document, ChunkMode::Paragraph);
    assert_eq!(texts(&reentered), texts(&direct));
}

#[test]
fn short_documents_resplit_to_themselves() {
    assert_eq!(resplit("tiny note", 220), "tiny note");
}
