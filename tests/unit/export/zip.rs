use super::*;

fn cfg(count: u32) -> SinkConfig {
    SinkConfig {
        width: 8,
        height: 8,
        slide_count: count,
    }
}

#[test]
fn entry_names_are_one_based_pngs() {
    assert_eq!(entry_name(1), "slide-1.png");
    assert_eq!(entry_name(12), "slide-12.png");
}

#[test]
fn archive_contains_entries_in_push_order() {
    let mut sink = ZipSink::new();
    sink.begin(cfg(3)).unwrap();
    sink.push_slide(1, b"one").unwrap();
    sink.push_slide(2, b"two").unwrap();
    sink.push_slide(3, b"three").unwrap();
    sink.finish().unwrap();
    let archive = sink.into_archive().unwrap();

    assert_eq!(
        archive.entry_names,
        vec!["slide-1.png", "slide-2.png", "slide-3.png"]
    );

    let mut zip = zip::ZipArchive::new(Cursor::new(archive.blob)).unwrap();
    assert_eq!(zip.len(), 3);
    for (i, expected) in ["slide-1.png", "slide-2.png", "slide-3.png"]
        .iter()
        .enumerate()
    {
        let entry = zip.by_index(i).unwrap();
        assert_eq!(&entry.name(), expected);
    }
}

#[test]
fn zip_entries_round_trip_bytes() {
    let mut sink = ZipSink::new();
    sink.begin(cfg(1)).unwrap();
    sink.push_slide(1, b"payload bytes").unwrap();
    sink.finish().unwrap();
    let archive = sink.into_archive().unwrap();

    let mut zip = zip::ZipArchive::new(Cursor::new(archive.blob)).unwrap();
    let mut entry = zip.by_index(0).unwrap();
    let mut out = Vec::new();
    std::io::Read::read_to_end(&mut entry, &mut out).unwrap();
    assert_eq!(out, b"payload bytes");
}

#[test]
fn out_of_order_pushes_are_rejected() {
    let mut sink = ZipSink::new();
    sink.begin(cfg(2)).unwrap();
    sink.push_slide(1, b"one").unwrap();
    let err = sink.push_slide(3, b"three").unwrap_err();
    assert!(matches!(err, SlideforgeError::Encode(_)));
}

#[test]
fn push_before_begin_is_rejected() {
    let mut sink = ZipSink::new();
    assert!(sink.push_slide(1, b"one").is_err());
    assert!(sink.finish().is_err());
}

#[test]
fn unfinished_sink_yields_no_archive() {
    let mut sink = ZipSink::new();
    sink.begin(cfg(1)).unwrap();
    sink.push_slide(1, b"one").unwrap();
    assert!(sink.into_archive().is_err());
}

#[test]
fn zero_dimension_config_is_rejected() {
    let mut sink = ZipSink::new();
    let degenerate = SinkConfig {
        width: 0,
        height: 0,
        slide_count: 1,
    };
    assert!(sink.begin(degenerate).is_err());
}
