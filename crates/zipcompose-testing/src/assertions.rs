//! Assertion helpers for geometry and recorded output.

use zipcompose_core::layout_node::DrawCommand;
use zipcompose_ui_graphics::Rect;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{msg}: expected {expected} (±{tolerance}), got {actual} (diff: {diff})"
    );
}

pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{msg} - x"));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{msg} - y"));
    assert_approx_eq(actual.width, expected.width, tolerance, &format!("{msg} - width"));
    assert_approx_eq(actual.height, expected.height, tolerance, &format!("{msg} - height"));
}

pub fn assert_rect_contains_point(rect: Rect, x: f32, y: f32, msg: &str) {
    assert!(rect.contains(x, y), "{msg}: point ({x}, {y}) not in rect {rect:?}");
}

pub fn assert_contains_text(texts: &[String], fragment: &str, msg: &str) {
    assert!(
        texts.iter().any(|text| text.contains(fragment)),
        "{msg}: text '{fragment}' not found in {texts:?}"
    );
}

/// Assert that push/pop pairs in `commands` nest properly.
pub fn assert_balanced(commands: &[DrawCommand]) {
    let mut stack = Vec::new();
    for (index, command) in commands.iter().enumerate() {
        match command {
            DrawCommand::PushClip { .. } => stack.push("clip"),
            DrawCommand::PushScale { .. } => stack.push("transform"),
            DrawCommand::PopClip => {
                assert_eq!(stack.pop(), Some("clip"), "unmatched PopClip at {index}")
            }
            DrawCommand::PopTransform => {
                assert_eq!(stack.pop(), Some("transform"), "unmatched PopTransform at {index}")
            }
            _ => {}
        }
    }
    assert!(stack.is_empty(), "unclosed {stack:?} at end of frame");
}
