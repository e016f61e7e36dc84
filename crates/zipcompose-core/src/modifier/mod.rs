//! Modifier chains: ordered, diffable lists of behavior descriptions.
//!
//! A [`Modifier`] is an immutable list of type-erased elements. Nodes keep
//! the chain they were last composed with and fold it into their
//! [`ElementStore`] only when a newly composed chain compares unequal.

mod element;
mod element_store;
mod fold;

pub use element::{
    modifier_element, AnyModifierElement, AsAny, DynModifierElement, ModifierBehavior,
    ModifierElement,
};
pub use element_store::{ElementKey, ElementStore, SharedBehavior, StoredBehavior};
pub use fold::{fold_modifier, FoldStats};

use crate::error::ComposeError;
use crate::layout_node::{DrawScope, PointerEvent};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::rc::Rc;
use zipcompose_ui_graphics::{Constraints, Point, Rect, Size};

/// Phase a modifier element attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Layout,
    Pointer,
    Draw,
}

impl Capability {
    pub const fn flag(self) -> NodeCapabilities {
        match self {
            Capability::Layout => NodeCapabilities::LAYOUT,
            Capability::Pointer => NodeCapabilities::POINTER_INPUT,
            Capability::Draw => NodeCapabilities::DRAW,
        }
    }
}

/// Set of phases a node supports.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeCapabilities(u8);

impl NodeCapabilities {
    pub const NONE: Self = Self(0);
    pub const LAYOUT: Self = Self(1 << 0);
    pub const POINTER_INPUT: Self = Self(1 << 1);
    pub const DRAW: Self = Self(1 << 2);
    pub const ALL: Self = Self(Self::LAYOUT.0 | Self::POINTER_INPUT.0 | Self::DRAW.0);

    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn supports(self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for NodeCapabilities {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Debug for NodeCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCapabilities")
            .field("layout", &self.contains(Self::LAYOUT))
            .field("pointer_input", &self.contains(Self::POINTER_INPUT))
            .field("draw", &self.contains(Self::DRAW))
            .finish()
    }
}

impl BitOr for NodeCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for NodeCapabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// The content wrapped by a layout behavior.
pub trait Measurable {
    fn measure(&mut self, constraints: Constraints) -> Result<Size, ComposeError>;
}

/// Outcome of a layout behavior: its own size and where the wrapped content
/// sits inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutModification {
    pub size: Size,
    pub content_offset: Point,
}

impl LayoutModification {
    pub fn with_size(size: Size) -> Self {
        Self {
            size,
            content_offset: Point::ZERO,
        }
    }
}

pub trait LayoutBehavior {
    fn measure(
        &self,
        measurable: &mut dyn Measurable,
        constraints: Constraints,
    ) -> Result<LayoutModification, ComposeError>;
}

/// Draw behaviors run outermost first before the node's content and in
/// reverse order after it. `bounds` is the region of the layout level the
/// behavior sits at, in absolute coordinates.
pub trait DrawBehavior {
    fn draw(&self, scope: &mut DrawScope, bounds: Rect);

    fn draw_after(&self, _scope: &mut DrawScope, _bounds: Rect) {}
}

pub trait PointerBehavior {
    /// Returns true when the event was consumed.
    fn on_pointer_event(&mut self, event: &PointerEvent, bounds: Rect) -> bool;
}

/// Inspector metadata of one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectorInfo {
    pub name: &'static str,
    pub properties: Vec<(&'static str, String)>,
}

impl fmt::Display for InspectorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        if self.properties.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (index, (name, value)) in self.properties.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

/// Immutable, cheaply cloned chain of modifier elements.
#[derive(Clone, Default)]
pub struct Modifier {
    elements: Rc<Vec<DynModifierElement>>,
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_element<E: ModifierElement>(element: E) -> Self {
        Self {
            elements: Rc::new(vec![modifier_element(element)]),
        }
    }

    /// Appends a single element to the end of the chain.
    pub fn element<E: ModifierElement>(self, element: E) -> Self {
        self.then(Self::from_element(element))
    }

    /// Concatenates `next` after this chain.
    pub fn then(&self, next: Modifier) -> Modifier {
        if next.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return next;
        }
        let mut elements = Vec::with_capacity(self.len() + next.len());
        elements.extend(self.elements.iter().cloned());
        elements.extend(next.elements.iter().cloned());
        Modifier {
            elements: Rc::new(elements),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[DynModifierElement] {
        &self.elements
    }

    /// Folds elements head to tail.
    pub fn fold_in<R>(&self, initial: R, mut f: impl FnMut(R, &dyn AnyModifierElement) -> R) -> R {
        self.elements
            .iter()
            .fold(initial, |acc, element| f(acc, element.as_ref()))
    }

    /// Folds elements tail to head.
    pub fn fold_out<R>(
        &self,
        initial: R,
        mut f: impl FnMut(R, &dyn AnyModifierElement) -> R,
    ) -> R {
        self.elements
            .iter()
            .rev()
            .fold(initial, |acc, element| f(acc, element.as_ref()))
    }

    pub fn any(&self, mut predicate: impl FnMut(&dyn AnyModifierElement) -> bool) -> bool {
        self.elements.iter().any(|element| predicate(element.as_ref()))
    }

    pub fn all(&self, mut predicate: impl FnMut(&dyn AnyModifierElement) -> bool) -> bool {
        self.elements.iter().all(|element| predicate(element.as_ref()))
    }

    pub fn inspect(&self) -> Vec<InspectorInfo> {
        self.elements
            .iter()
            .map(|element| {
                let mut properties = Vec::new();
                element.record_inspector_properties(&mut |name, value| {
                    properties.push((name, value));
                });
                InspectorInfo {
                    name: element.inspector_name(),
                    properties,
                }
            })
            .collect()
    }
}

impl PartialEq for Modifier {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.elements, &other.elements) {
            return true;
        }
        self.len() == other.len()
            && self
                .elements
                .iter()
                .zip(other.elements.iter())
                .all(|(a, b)| a.equals_element(b.as_ref()))
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, info) in self.inspect().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{info}")?;
        }
        f.write_str("]")
    }
}
