//! Row widget implementation

#![allow(non_snake_case)]

use super::Layout;
use crate::layout::{LinearArrangement, LinearPolicy, VerticalAlignment};
use zipcompose_core::{ComposeResult, Composer, Modifier};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowSpec {
    pub horizontal_arrangement: LinearArrangement,
    pub vertical_alignment: VerticalAlignment,
}

impl RowSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizontal_arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.horizontal_arrangement = arrangement;
        self
    }

    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }
}

pub fn Row(
    composer: &Composer,
    modifier: Modifier,
    spec: RowSpec,
    content: impl FnOnce(&Composer) -> ComposeResult,
) -> ComposeResult {
    let policy = LinearPolicy::row(spec.horizontal_arrangement, spec.vertical_alignment);
    Layout(composer, "Row", modifier, policy, content)
}
