use super::{Capability, DrawBehavior, LayoutBehavior, PointerBehavior};
use crate::error::ComposeError;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::rc::Rc;

/// Upcast helper implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Runtime object attached to a node on behalf of a modifier element.
///
/// A behavior implements the phase interface matching its element's
/// [`Capability`] and reports it through the matching `as_*` accessor.
pub trait ModifierBehavior: AsAny {
    fn on_attach(&mut self) {}

    fn on_detach(&mut self) {}

    fn as_layout(&self) -> Option<&dyn LayoutBehavior> {
        None
    }

    fn as_draw(&self) -> Option<&dyn DrawBehavior> {
        None
    }

    fn as_pointer_mut(&mut self) -> Option<&mut dyn PointerBehavior> {
        None
    }
}

/// Declarative, value-comparable description of a behavior.
pub trait ModifierElement: fmt::Debug + PartialEq + 'static {
    type Behavior: ModifierBehavior;

    /// Phase this element participates in.
    fn capability(&self) -> Capability;

    fn create(&self) -> Self::Behavior;

    /// Brings an existing behavior up to date with this element.
    fn update(&self, behavior: &mut Self::Behavior);

    fn inspector_name(&self) -> &'static str {
        type_name::<Self>()
    }

    fn inspector_properties(&self, _inspector: &mut dyn FnMut(&'static str, String)) {}
}

/// Type-erased element stored in a [`Modifier`](super::Modifier).
pub trait AnyModifierElement: fmt::Debug {
    fn element_type(&self) -> TypeId;

    fn capability(&self) -> Capability;

    fn create_behavior(&self) -> Box<dyn ModifierBehavior>;

    fn update_behavior(&self, behavior: &mut dyn ModifierBehavior) -> Result<(), ComposeError>;

    fn equals_element(&self, other: &dyn AnyModifierElement) -> bool;

    fn inspector_name(&self) -> &'static str;

    fn record_inspector_properties(&self, visitor: &mut dyn FnMut(&'static str, String));

    fn as_any(&self) -> &dyn Any;
}

struct TypedModifierElement<E: ModifierElement> {
    element: E,
}

impl<E: ModifierElement> fmt::Debug for TypedModifierElement<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.element.fmt(f)
    }
}

impl<E: ModifierElement> AnyModifierElement for TypedModifierElement<E> {
    fn element_type(&self) -> TypeId {
        TypeId::of::<E>()
    }

    fn capability(&self) -> Capability {
        self.element.capability()
    }

    fn create_behavior(&self) -> Box<dyn ModifierBehavior> {
        Box::new(self.element.create())
    }

    fn update_behavior(&self, behavior: &mut dyn ModifierBehavior) -> Result<(), ComposeError> {
        let typed = behavior
            .as_any_mut()
            .downcast_mut::<E::Behavior>()
            .ok_or_else(|| ComposeError::TypeMismatch {
                key: self.element.inspector_name().to_owned(),
                expected: type_name::<E::Behavior>(),
            })?;
        self.element.update(typed);
        Ok(())
    }

    fn equals_element(&self, other: &dyn AnyModifierElement) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|typed| typed.element == self.element)
    }

    fn inspector_name(&self) -> &'static str {
        self.element.inspector_name()
    }

    fn record_inspector_properties(&self, visitor: &mut dyn FnMut(&'static str, String)) {
        self.element.inspector_properties(visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared, type-erased modifier element.
pub type DynModifierElement = Rc<dyn AnyModifierElement>;

/// Erases a concrete element so it can be stored in a chain.
pub fn modifier_element<E: ModifierElement>(element: E) -> DynModifierElement {
    Rc::new(TypedModifierElement { element })
}
