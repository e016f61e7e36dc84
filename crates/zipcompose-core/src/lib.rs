#![doc = r"Composition runtime for zipcompose."]
//!
//! A [`Composition`] runs a root composable every frame with a reused
//! [`Composer`]. The composer assigns each block a stable [`Identifier`],
//! matches it against the previous frame's [`LayoutNode`] tree, and keeps
//! state, remembered values and modifier behaviors attached to nodes whose
//! identity survives. The committed tree is then laid out, hit tested and
//! drawn by the [`NodeCoordinator`].

pub mod collections;
pub mod composable;
mod composer;
mod composition;
mod composition_local;
mod error;
pub mod hash;
mod identity;
pub mod layout_node;
pub mod modifier;
pub mod owned;
mod state;

pub use composable::Composable;
pub use composer::{Composer, ComposerConfig, FrameStats, NodePath};
pub use composition::Composition;
pub use composition_local::{
    composition_local_of, static_composition_local_of, CompositionLocal,
    CompositionLocalProvider, ProvidedValue,
};
pub use error::{ComposeError, ComposeResult};
pub use identity::{empty_identifier, IdentityManager, IdentitySource, Identifier};
pub use layout_node::{
    dump_tree, ChildMeasurer, DrawCommand, DrawScope, FromSlot, IdentityWidget, LayoutNode,
    Lifecycle, NodeCoordinator, NodeHandle, NodeTree, PointerEvent, PointerEventKind,
    ReconcileOutcome, SlotValue, Widget, WidgetConstructor,
};
pub use modifier::{
    modifier_element, Capability, DrawBehavior, ElementKey, ElementStore, FoldStats,
    InspectorInfo, LayoutBehavior, LayoutModification, Measurable, Modifier, ModifierBehavior,
    ModifierElement, NodeCapabilities, PointerBehavior,
};
pub use owned::Owned;
pub use state::{DrawGuard, MutableValue, PersistentState};

pub use zipcompose_ui_graphics as graphics;

#[cfg(test)]
#[path = "tests/composer_tests.rs"]
mod composer_tests;

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;

#[cfg(test)]
#[path = "tests/modifier_tests.rs"]
mod modifier_tests;

#[cfg(test)]
#[path = "tests/layout_node_tests.rs"]
mod layout_node_tests;

#[cfg(test)]
#[path = "tests/composition_local_tests.rs"]
mod composition_local_tests;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
