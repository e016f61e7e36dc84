//! Box widget implementation

#![allow(non_snake_case)]

use super::Layout;
use crate::layout::{Alignment, BoxPolicy};
use zipcompose_core::{ComposeResult, Composer, Modifier};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxSpec {
    pub content_alignment: Alignment,
    pub propagate_min_constraints: bool,
}

impl BoxSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_alignment(mut self, alignment: Alignment) -> Self {
        self.content_alignment = alignment;
        self
    }

    pub fn propagate_min_constraints(mut self, propagate: bool) -> Self {
        self.propagate_min_constraints = propagate;
        self
    }
}

/// Overlays its children, aligned inside the largest one.
pub fn Box(
    composer: &Composer,
    modifier: Modifier,
    spec: BoxSpec,
    content: impl FnOnce(&Composer) -> ComposeResult,
) -> ComposeResult {
    let policy = BoxPolicy {
        alignment: spec.content_alignment,
        propagate_min_constraints: spec.propagate_min_constraints,
    };
    Layout(composer, "Box", modifier, policy, content)
}
