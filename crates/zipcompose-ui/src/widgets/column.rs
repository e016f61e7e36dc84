//! Column widget implementation

#![allow(non_snake_case)]

use super::Layout;
use crate::layout::{HorizontalAlignment, LinearArrangement, LinearPolicy};
use zipcompose_core::{ComposeResult, Composer, Modifier};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnSpec {
    pub vertical_arrangement: LinearArrangement,
    pub horizontal_alignment: HorizontalAlignment,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertical_arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.vertical_arrangement = arrangement;
        self
    }

    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }
}

pub fn Column(
    composer: &Composer,
    modifier: Modifier,
    spec: ColumnSpec,
    content: impl FnOnce(&Composer) -> ComposeResult,
) -> ComposeResult {
    let policy = LinearPolicy::column(spec.vertical_arrangement, spec.horizontal_alignment);
    Layout(composer, "Column", modifier, policy, content)
}
