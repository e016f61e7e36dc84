//! Spacer widget implementation

#![allow(non_snake_case)]

use super::Layout;
use crate::layout::LeafPolicy;
use zipcompose_core::{ComposeResult, Composer, Modifier};
use zipcompose_ui_graphics::Size;

/// Empty node taking up `size`.
pub fn Spacer(composer: &Composer, size: Size) -> ComposeResult {
    Layout(composer, "Spacer", Modifier::empty(), LeafPolicy::new(size), |_| Ok(()))
}
