//! Integration Tests für Matrix-Muster, Text-Layout und Display-Ausgabe

mod common;

use common::{DisplayOp, MockDisplay, MockLedWriter};
use occupancy_core::matrix::{FULL_PATTERN, LED_COUNT, MATRIX_SIZE, NORMAL_PATTERN, pattern};
use occupancy_core::{
    AlarmPulse, CAPACITY, CapacityState, DisplayRenderer, LinkStatus, MatrixRenderer,
    RenderFrame, TextLayout, led_index,
};
use rgb::RGB8;

// ============================================================================
// Tests: Matrix
// ============================================================================

#[test]
fn test_pattern_depends_only_on_full() {
    for count in 0..CAPACITY {
        assert_eq!(
            CapacityState::of(count, CAPACITY),
            CapacityState::Normal,
            "count {}",
            count
        );
    }
    assert_eq!(CapacityState::of(CAPACITY, CAPACITY), CapacityState::Full);
    assert_eq!(pattern(CapacityState::Normal), &NORMAL_PATTERN);
    assert_eq!(pattern(CapacityState::Full), &FULL_PATTERN);
}

#[test]
fn test_full_pattern_is_red_x() {
    let frame = RenderFrame::for_state(CapacityState::Full);
    let red = RGB8::new(255, 0, 0);
    for i in 0..MATRIX_SIZE {
        assert_eq!(frame.at(i, i), red);
        assert_eq!(frame.at(i, MATRIX_SIZE - 1 - i), red);
    }
    let lit = frame.pixels().iter().filter(|p| **p != RGB8::default()).count();
    assert_eq!(lit, 9);
}

#[test]
fn test_normal_pattern_is_green_only() {
    let frame = RenderFrame::for_state(CapacityState::Normal);
    let lit: Vec<_> = frame
        .pixels()
        .iter()
        .filter(|p| **p != RGB8::default())
        .collect();
    assert_eq!(lit.len(), 5);
    assert!(lit.iter().all(|p| **p == RGB8::new(0, 255, 0)));
}

#[test]
fn test_frame_is_in_strip_order() {
    let frame = RenderFrame::for_state(CapacityState::Normal);
    // Zeile 1, Spalte 0 liegt auf Strip-Index 15
    assert_eq!(led_index(1, 0), 15);
    assert_eq!(frame.pixels()[15], RGB8::new(0, 255, 0));
    assert_eq!(frame.pixels().len(), LED_COUNT);
}

#[test]
fn test_matrix_renderer_alarm_only_on_transition() {
    let mut led = MockLedWriter::new();
    let mut renderer = MatrixRenderer::new(255);

    assert_eq!(renderer.render(CapacityState::Normal, &mut led).alarm, None);
    assert_eq!(
        renderer.render(CapacityState::Full, &mut led).alarm,
        Some(AlarmPulse::CAPACITY_REACHED)
    );
    assert_eq!(renderer.render(CapacityState::Full, &mut led).alarm, None);
    assert_eq!(renderer.render(CapacityState::Normal, &mut led).alarm, None);
    assert_eq!(
        renderer.render(CapacityState::Full, &mut led).alarm,
        Some(AlarmPulse::CAPACITY_REACHED)
    );
    assert_eq!(led.write_count, 5);
}

#[test]
fn test_matrix_renderer_applies_brightness() {
    let mut led = MockLedWriter::new();
    let mut renderer = MatrixRenderer::new(10);
    let outcome = renderer.render(CapacityState::Full, &mut led);
    assert_eq!(outcome.written, Ok(()));

    let frame = led.last_frame.expect("frame written");
    assert_eq!(frame[led_index(0, 0)], RGB8::new(10, 0, 0));
}

// ============================================================================
// Tests: TextLayout
// ============================================================================

#[test]
fn test_wrap_produces_ceil_rows() {
    let layout = TextLayout::new(21, 8);
    let text = "The quick brown fox jumps over the lazy dog";
    let lines: Vec<_> = layout.lines(text).collect();

    let expected_rows = text.len().div_ceil(21);
    assert_eq!(lines.len(), expected_rows);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.x, 0);
        assert_eq!(line.y, i as i32 * 8);
        assert!(line.text.len() <= 21);
    }
    assert_eq!(lines.last().map(|l| l.text), Some("g"));

    let joined: String = lines.iter().map(|l| l.text).collect();
    assert_eq!(joined, text);
}

#[test]
fn test_short_text_single_row() {
    let layout = TextLayout::for_display(128, 6, 8);
    let lines: Vec<_> = layout.lines("Occupancy: 10").collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].y, 0);
}

// ============================================================================
// Tests: DisplayRenderer
// ============================================================================

#[test]
fn test_display_render_sequence() {
    let mut display = MockDisplay::new();
    let renderer = DisplayRenderer::default();

    renderer
        .render(&mut display, 7, LinkStatus::Online)
        .expect("render");

    assert_eq!(
        display.ops,
        vec![
            DisplayOp::Clear,
            DisplayOp::Text(0, 0, "Occupancy: 7".to_string()),
            DisplayOp::Flush,
        ]
    );
}

#[test]
fn test_display_render_wraps_on_narrow_layout() {
    let mut display = MockDisplay::new();
    let renderer = DisplayRenderer::new(TextLayout::new(5, 8), 24);

    renderer
        .render(&mut display, 3, LinkStatus::Pending)
        .expect("render");

    assert_eq!(
        display.screen(),
        vec![
            (0, 0, "Occup".to_string()),
            (0, 8, "ancy:".to_string()),
            (0, 16, " 3".to_string()),
        ]
    );
}

#[test]
fn test_display_error_propagates() {
    let mut display = MockDisplay::new();
    display.fail_flush = true;
    let renderer = DisplayRenderer::default();
    assert!(renderer.render(&mut display, 1, LinkStatus::Online).is_err());
}
