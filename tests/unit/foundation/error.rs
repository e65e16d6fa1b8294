use super::*;

#[test]
fn constructor_helpers_pick_matching_variants() {
    assert!(matches!(
        SlideforgeError::validation("x"),
        SlideforgeError::Validation(_)
    ));
    assert!(matches!(
        SlideforgeError::layout("x"),
        SlideforgeError::Layout(_)
    ));
    assert!(matches!(
        SlideforgeError::render("x"),
        SlideforgeError::Render(_)
    ));
    assert!(matches!(
        SlideforgeError::encode("x"),
        SlideforgeError::Encode(_)
    ));
}

#[test]
fn display_includes_category_and_message() {
    let e = SlideforgeError::validation("font_size_px out of range");
    assert_eq!(e.to_string(), "validation error: font_size_px out of range");

    let e = SlideforgeError::encode("png encode failed");
    assert_eq!(e.to_string(), "encode error: png encode failed");
}

#[test]
fn anyhow_errors_pass_through() {
    let e: SlideforgeError = anyhow::anyhow!("downstream broke").into();
    assert!(matches!(e, SlideforgeError::Other(_)));
    assert_eq!(e.to_string(), "downstream broke");
}
