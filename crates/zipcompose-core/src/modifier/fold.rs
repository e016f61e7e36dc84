use super::{
    AnyModifierElement, Capability, ElementKey, ElementStore, Modifier, ModifierBehavior,
    NodeCapabilities,
};
use crate::error::ComposeError;
use crate::identity::Identifier;
use std::ops::AddAssign;
use std::rc::Rc;

/// What a fold did to a node's element store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoldStats {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub detached: usize,
}

impl AddAssign for FoldStats {
    fn add_assign(&mut self, rhs: Self) {
        self.created += rhs.created;
        self.updated += rhs.updated;
        self.unchanged += rhs.unchanged;
        self.detached += rhs.detached;
    }
}

/// Reconciles `store` with `chain`.
///
/// Each element is keyed by `(capability, ordinal)`. A behavior under the same
/// key created from the same element type is reused and updated only when the
/// element compares unequal; any other behavior under that key is detached
/// and replaced. Keys the chain no longer produces are detached.
pub fn fold_modifier(
    node: Identifier,
    chain: &Modifier,
    store: &mut ElementStore,
    supported: NodeCapabilities,
) -> Result<FoldStats, ComposeError> {
    let mut previous = std::mem::take(&mut store.entries);
    let mut next = ElementStore::new();
    let mut ordinals = [0u32; 3];
    let mut layout_depth = 0;
    let mut stats = FoldStats::default();

    for element in chain.elements() {
        let capability = element.capability();
        if !supported.supports(capability) {
            abandon(previous, next);
            return Err(ComposeError::MissingCapability { node, capability });
        }
        let ordinal = &mut ordinals[capability as usize];
        let key = ElementKey::new(capability, *ordinal);
        *ordinal += 1;

        match previous.swap_remove(&key) {
            Some(mut stored) if stored.element.element_type() == element.element_type() => {
                if stored.element.equals_element(element.as_ref()) {
                    stats.unchanged += 1;
                } else {
                    let updated = element.update_behavior(&mut **stored.behavior.borrow_mut());
                    if let Err(err) = updated {
                        stored.detach();
                        abandon(previous, next);
                        return Err(err);
                    }
                    stats.updated += 1;
                }
                stored.element = Rc::clone(element);
                stored.layout_depth = layout_depth;
                next.entries.insert(key, stored);
            }
            stale => {
                if let Some(stale) = stale {
                    log::trace!(
                        "node {node}: {} replaces {} at {key:?}",
                        element.inspector_name(),
                        stale.element.inspector_name()
                    );
                    stale.detach();
                    stats.detached += 1;
                }
                let behavior = match create_checked(node, element.as_ref()) {
                    Ok(behavior) => behavior,
                    Err(err) => {
                        abandon(previous, next);
                        return Err(err);
                    }
                };
                next.set_element(key, Rc::clone(element), behavior, layout_depth);
                stats.created += 1;
            }
        }

        if capability == Capability::Layout {
            layout_depth += 1;
        }
    }

    for (_, stale) in previous.drain(..) {
        stale.detach();
        stats.detached += 1;
    }
    *store = next;
    Ok(stats)
}

fn create_checked(
    node: Identifier,
    element: &dyn AnyModifierElement,
) -> Result<Box<dyn ModifierBehavior>, ComposeError> {
    let mut behavior = element.create_behavior();
    let capability = element.capability();
    let implemented = match capability {
        Capability::Layout => behavior.as_layout().is_some(),
        Capability::Draw => behavior.as_draw().is_some(),
        Capability::Pointer => behavior.as_pointer_mut().is_some(),
    };
    if implemented {
        Ok(behavior)
    } else {
        Err(ComposeError::MissingCapability { node, capability })
    }
}

fn abandon(
    mut previous: crate::collections::OrderedMap<ElementKey, super::StoredBehavior>,
    mut next: ElementStore,
) {
    for (_, stale) in previous.drain(..) {
        stale.detach();
    }
    next.detach_all();
}
