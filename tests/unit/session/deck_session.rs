use super::*;

fn stub_fonts() -> FontLibrary {
    let mut lib = FontLibrary::new();
    // Resolvable but not shapeable; fine for tests that never render.
    lib.register("Montserrat", vec![0; 4]);
    lib
}

/// Resolve a real font file from `assets/` for raster-dependent tests.
fn raster_fonts() -> Option<FontLibrary> {
    let mut paths: Vec<_> = std::fs::read_dir("assets")
        .ok()?
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|x| x.to_str()),
                Some("ttf" | "otf")
            )
        })
        .collect();
    paths.sort();
    let bytes = std::fs::read(paths.first()?).ok()?;
    let mut lib = FontLibrary::new();
    lib.register("Montserrat", bytes);
    Some(lib)
}

#[test]
fn new_rejects_invalid_configs() {
    let config = RenderConfig {
        font_size_px: 10,
        ..RenderConfig::default()
    };
    assert!(DeckSession::new(stub_fonts(), config, DeckSessionOpts::default()).is_err());
}

#[test]
fn set_text_regenerates_chunks_wholesale() {
    let mut session = DeckSession::new(
        stub_fonts(),
        RenderConfig::default(),
        DeckSessionOpts::default(),
    )
    .unwrap();

    session.set_text("A.\n\nB.");
    assert_eq!(session.chunks().len(), 2);
    assert_eq!(session.chunks()[0].text, "A.");
    assert_eq!(session.chunks()[1].text, "B.");

    session.set_text("just one");
    assert_eq!(session.chunks().len(), 1);
    assert_eq!(session.chunks()[0].index, 0);
}

#[test]
fn empty_document_is_the_no_content_state() {
    let mut session = DeckSession::new(
        stub_fonts(),
        RenderConfig::default(),
        DeckSessionOpts::default(),
    )
    .unwrap();
    session.set_text("   \n\n  ");
    assert!(session.chunks().is_empty());
    // Zero slides render to zero surfaces without error.
    assert!(session.render_deck().unwrap().is_empty());
}

#[test]
fn resplit_rewrites_the_document_in_place() {
    let mut session = DeckSession::new(
        stub_fonts(),
        RenderConfig::default(),
        DeckSessionOpts::default(),
    )
    .unwrap();
    session.set_text("First sentence goes here. Second sentence follows it closely!");
    session.resplit(30);

    assert!(session.raw_text().contains("\n\n"));
    assert!(session.chunks().len() > 1);
}

#[test]
fn set_config_validates() {
    let mut session = DeckSession::new(
        stub_fonts(),
        RenderConfig::default(),
        DeckSessionOpts::default(),
    )
    .unwrap();
    let bad = RenderConfig {
        font_size_px: 500,
        ..RenderConfig::default()
    };
    assert!(session.set_config(bad).is_err());
}

#[test]
fn unchanged_deck_reuses_the_render_pass() {
    let Some(fonts) = raster_fonts() else {
        return;
    };
    let mut session =
        DeckSession::new(fonts, RenderConfig::default(), DeckSessionOpts::default()).unwrap();
    session.set_text("HELLO WORLD");

    session.render_deck().unwrap();
    session.render_deck().unwrap();
    let stats = session.stats();
    assert_eq!(stats.render_passes, 1);
    assert_eq!(stats.slides_rendered, 1);
}

#[test]
fn config_change_invalidates_every_surface() {
    let Some(fonts) = raster_fonts() else {
        return;
    };
    let mut session =
        DeckSession::new(fonts, RenderConfig::default(), DeckSessionOpts::default()).unwrap();
    session.set_text("A.\n\nB.");

    session.render_deck().unwrap();
    let mut config = session.config().clone();
    config.font_size_px = 120;
    session.set_config(config).unwrap();
    session.render_deck().unwrap();

    let stats = session.stats();
    assert_eq!(stats.render_passes, 2);
    assert_eq!(stats.slides_rendered, 4);
}

#[test]
fn text_change_invalidates_every_surface() {
    let Some(fonts) = raster_fonts() else {
        return;
    };
    let mut session =
        DeckSession::new(fonts, RenderConfig::default(), DeckSessionOpts::default()).unwrap();

    session.set_text("ONE");
    session.render_deck().unwrap();
    session.set_text("TWO");
    session.render_deck().unwrap();

    assert_eq!(session.stats().render_passes, 2);
}
