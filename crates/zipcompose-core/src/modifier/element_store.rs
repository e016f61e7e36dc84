use super::{Capability, DynModifierElement, ModifierBehavior};
use crate::collections::OrderedMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Key of an attached behavior: its phase and its ordinal among the
/// elements of that phase in the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey {
    pub capability: Capability,
    pub ordinal: u32,
}

impl ElementKey {
    pub const fn new(capability: Capability, ordinal: u32) -> Self {
        Self {
            capability,
            ordinal,
        }
    }
}

pub type SharedBehavior = Rc<RefCell<Box<dyn ModifierBehavior>>>;

/// A behavior together with the element it was last created or updated from.
#[derive(Clone)]
pub struct StoredBehavior {
    pub(crate) element: DynModifierElement,
    pub(crate) behavior: SharedBehavior,
    pub(crate) layout_depth: usize,
}

impl StoredBehavior {
    pub fn element(&self) -> &DynModifierElement {
        &self.element
    }

    pub fn behavior(&self) -> &SharedBehavior {
        &self.behavior
    }

    /// Number of layout behaviors wrapping this one.
    pub fn layout_depth(&self) -> usize {
        self.layout_depth
    }

    pub(crate) fn detach(&self) {
        self.behavior.borrow_mut().on_detach();
    }
}

impl fmt::Debug for StoredBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredBehavior")
            .field("element", &self.element)
            .field("layout_depth", &self.layout_depth)
            .finish()
    }
}

/// Per-node map from [`ElementKey`] to the attached runtime behavior,
/// iterated in chain order.
#[derive(Default)]
pub struct ElementStore {
    pub(crate) entries: OrderedMap<ElementKey, StoredBehavior>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `behavior` under `key`. The last attach for a key wins; the
    /// behavior it replaces is detached and returned.
    pub fn set_element(
        &mut self,
        key: ElementKey,
        element: DynModifierElement,
        mut behavior: Box<dyn ModifierBehavior>,
        layout_depth: usize,
    ) -> Option<StoredBehavior> {
        behavior.on_attach();
        let stored = StoredBehavior {
            element,
            behavior: Rc::new(RefCell::new(behavior)),
            layout_depth,
        };
        let replaced = self.entries.insert(key, stored);
        if let Some(old) = &replaced {
            old.detach();
        }
        replaced
    }

    pub fn get_element(&self, key: ElementKey) -> Option<&StoredBehavior> {
        self.entries.get(&key)
    }

    /// Detaches and drops the behavior under `key`.
    pub fn remove(&mut self, key: ElementKey) -> bool {
        match self.entries.shift_remove(&key) {
            Some(stored) => {
                stored.detach();
                true
            }
            None => false,
        }
    }

    /// Detaches every behavior, returning how many were attached.
    pub fn detach_all(&mut self) -> usize {
        let count = self.entries.len();
        for (_, stored) in self.entries.drain(..) {
            stored.detach();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = ElementKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementKey, &StoredBehavior)> + '_ {
        self.entries.iter().map(|(key, stored)| (*key, stored))
    }

    fn of_capability(&self, capability: Capability) -> Vec<StoredBehavior> {
        self.entries
            .iter()
            .filter(|(key, _)| key.capability == capability)
            .map(|(_, stored)| stored.clone())
            .collect()
    }

    pub fn layout_behaviors(&self) -> Vec<StoredBehavior> {
        self.of_capability(Capability::Layout)
    }

    pub fn draw_behaviors(&self) -> Vec<StoredBehavior> {
        self.of_capability(Capability::Draw)
    }

    pub fn pointer_behaviors(&self) -> Vec<StoredBehavior> {
        self.of_capability(Capability::Pointer)
    }
}

impl fmt::Debug for ElementStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, stored)| (key, &stored.element)))
            .finish()
    }
}
