use super::*;

#[test]
fn in_memory_sink_captures_config_and_slides() {
    let mut sink = InMemorySink::new();
    assert!(sink.config().is_none());

    sink.begin(SinkConfig {
        width: 1080,
        height: 1080,
        slide_count: 2,
    })
    .unwrap();
    sink.push_slide(1, &[1, 2]).unwrap();
    sink.push_slide(2, &[3]).unwrap();
    sink.finish().unwrap();

    let cfg = sink.config().unwrap();
    assert_eq!(cfg.slide_count, 2);
    assert_eq!(sink.slides().len(), 2);
    assert_eq!(sink.slides()[0], (1, vec![1, 2]));
    assert_eq!(sink.slides()[1], (2, vec![3]));
}

#[test]
fn begin_resets_previously_captured_slides() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 8,
        height: 8,
        slide_count: 1,
    };
    sink.begin(cfg).unwrap();
    sink.push_slide(1, &[7]).unwrap();
    sink.finish().unwrap();

    sink.begin(cfg).unwrap();
    assert!(sink.slides().is_empty());
}
