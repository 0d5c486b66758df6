use scanlate_typeset::typeset::{
    Alignment, FixedMetrics, LayoutOptions, RecordingCanvas, Region, draw_text_in_box, fit,
    layout_lines,
};

fn options() -> LayoutOptions {
    LayoutOptions {
        font_size: 28,
        min_font_size: 8,
        margin: 4,
        align: Alignment::Center,
    }
}

fn texts(lines: &[scanlate_typeset::typeset::MeasuredLine]) -> Vec<&str> {
    lines.iter().map(|line| line.text.as_str()).collect()
}

#[test]
fn hello_world_fits_the_box() {
    let metrics = FixedMetrics::new(10, 20);
    let region = Region::new(0, 0, 200, 100);
    let result = fit(&metrics, "HELLO WORLD", &region, &options()).unwrap();
    assert!(result.fitted);
    assert!(result.lines.len() <= 2);
    assert!(result.max_line_width() <= 192);
    assert!(result.block_height <= 92);
}

#[test]
fn unbreakable_overflow_renders_at_min_size() {
    let metrics = FixedMetrics::new(10, 20);
    let region = Region::new(0, 0, 50, 50);
    let mut canvas = RecordingCanvas::default();
    let result = draw_text_in_box(
        &mut canvas,
        &metrics,
        &region,
        "SUPERCALIFRAGILISTIC",
        &options(),
    )
    .unwrap();
    assert_eq!(result.size, 8);
    assert!(!result.fitted);
    assert_eq!(canvas.calls.len(), result.lines.len());
    let joined: String = result.lines.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(joined, "SUPERCALIFRAGILISTIC");
}

#[test]
fn empty_string_is_one_empty_line() {
    let metrics = FixedMetrics::new(10, 20);
    let region = Region::new(0, 0, 200, 100);
    let mut canvas = RecordingCanvas::default();
    let result = draw_text_in_box(&mut canvas, &metrics, &region, "", &options()).unwrap();
    assert_eq!(texts(&result.lines), vec![""]);
    assert_eq!(result.block_height, 20);
    assert!(canvas.calls.is_empty());
}

#[test]
fn paragraph_break_gives_two_lines() {
    let metrics = FixedMetrics::new(10, 20);
    let region = Region::new(0, 0, 400, 200);
    let result = fit(&metrics, "Line one\nLine two", &region, &options()).unwrap();
    assert_eq!(texts(&result.lines), vec!["Line one", "Line two"]);
}

#[test]
fn alignment_moves_lines_horizontally() {
    let metrics = FixedMetrics::new(10, 20);
    let region = Region::new(100, 0, 300, 100);
    let result = fit(&metrics, "wide line\nnarrow", &region, &options()).unwrap();

    let left = layout_lines(&region, &result, Alignment::Left, 4);
    let center = layout_lines(&region, &result, Alignment::Center, 4);
    let right = layout_lines(&region, &result, Alignment::Right, 4);

    assert_eq!(left[1].x, 104);
    assert_eq!(center[1].x, 104 + (192 - 60) / 2);
    assert_eq!(right[1].x, 300 - 4 - 60);
    for placed in [&left, &center, &right] {
        assert_eq!(placed[0].y, left[0].y);
        assert_eq!(placed[1].y, left[1].y);
    }
}
