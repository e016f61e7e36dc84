//! Persistent key/value state that survives across frames.
//!
//! The store is independent of tree shape: the composer namespaces keys by
//! the owning node and removes them when that node leaves the tree.

use crate::collections::map::HashMap;
use crate::error::ComposeError;
use std::any::{type_name, Any};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type ChangeCallback = Rc<dyn Fn()>;

struct StoreInner {
    cells: RefCell<HashMap<String, Rc<dyn AnyCell>>>,
    on_change: RefCell<Option<ChangeCallback>>,
    drawing: Cell<bool>,
}

impl StoreInner {
    fn notify(&self, key: &str) {
        debug_assert!(
            !self.drawing.get(),
            "state `{key}` written during the draw phase"
        );
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            log::trace!("state `{key}` changed");
            callback();
        }
    }
}

trait AnyCell {
    fn dispose(&self);
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
    fn value_type(&self) -> &'static str;
}

struct StateCell<T> {
    key: String,
    value: RefCell<T>,
    disposed: Cell<bool>,
    store: Weak<StoreInner>,
}

impl<T: 'static> AnyCell for StateCell<T> {
    fn dispose(&self) {
        self.disposed.set(true);
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }

    fn value_type(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Typed handle to one cell of a [`PersistentState`] store.
pub struct MutableValue<T> {
    cell: Rc<StateCell<T>>,
}

impl<T> Clone for MutableValue<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T> PartialEq for MutableValue<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableValue")
            .field("key", &self.cell.key)
            .field("value", &*self.cell.value.borrow())
            .field("disposed", &self.cell.disposed.get())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> MutableValue<T> {
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    /// Stores `value`; the change callback fires only when it differs from
    /// the current value and the cell is still part of its store.
    pub fn set(&self, value: T) {
        let changed = {
            let mut current = self.cell.value.borrow_mut();
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        };
        if !changed {
            return;
        }
        if self.cell.disposed.get() {
            log::debug!("write to disposed state `{}` ignored", self.cell.key);
            return;
        }
        if let Some(store) = self.cell.store.upgrade() {
            store.notify(&self.cell.key);
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    pub fn is_disposed(&self) -> bool {
        self.cell.disposed.get()
    }

    pub fn key(&self) -> &str {
        &self.cell.key
    }
}

/// Cheap, cloneable handle to a state store.
#[derive(Clone)]
pub struct PersistentState {
    inner: Rc<StoreInner>,
}

impl Default for PersistentState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PersistentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentState")
            .field("cells", &self.len())
            .finish()
    }
}

impl PersistentState {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StoreInner {
                cells: RefCell::new(HashMap::default()),
                on_change: RefCell::new(None),
                drawing: Cell::new(false),
            }),
        }
    }

    /// Returns the cell stored under `key`, creating it from `init` on first use.
    pub fn get_state<T: Clone + PartialEq + 'static>(
        &self,
        key: &str,
        init: impl FnOnce() -> T,
    ) -> Result<MutableValue<T>, ComposeError> {
        let existing = self.inner.cells.borrow().get(key).cloned();
        if let Some(cell) = existing {
            let stored = cell.value_type();
            return cell
                .into_any()
                .downcast::<StateCell<T>>()
                .map(|cell| MutableValue { cell })
                .map_err(|_| {
                    log::warn!("state `{key}` holds {stored}, requested {}", type_name::<T>());
                    ComposeError::TypeMismatch {
                        key: key.to_owned(),
                        expected: type_name::<T>(),
                    }
                });
        }
        let initial = init();
        let cell = Rc::new(StateCell {
            key: key.to_owned(),
            value: RefCell::new(initial),
            disposed: Cell::new(false),
            store: Rc::downgrade(&self.inner),
        });
        self.inner
            .cells
            .borrow_mut()
            .insert(key.to_owned(), Rc::clone(&cell) as Rc<dyn AnyCell>);
        Ok(MutableValue { cell })
    }

    /// Registers the single change callback, replacing any previous one.
    pub fn set_on_state_change(&self, callback: impl Fn() + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn clear_on_state_change(&self) {
        self.inner.on_change.borrow_mut().take();
    }

    /// Removes `key`, marking any outstanding handles as disposed.
    pub fn remove(&self, key: &str) -> bool {
        let removed = self.inner.cells.borrow_mut().remove(key);
        match removed {
            Some(cell) => {
                cell.dispose();
                true
            }
            None => false,
        }
    }

    /// Disposes every cell.
    pub fn clear(&self) {
        let cells = std::mem::take(&mut *self.inner.cells.borrow_mut());
        for cell in cells.values() {
            cell.dispose();
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.cells.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.cells.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently stored, sorted for stable output.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.cells.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn is_drawing(&self) -> bool {
        self.inner.drawing.get()
    }

    /// Marks the draw phase active until the returned guard drops.
    pub fn draw_guard(&self) -> DrawGuard {
        let previous = self.inner.drawing.replace(true);
        DrawGuard {
            inner: Rc::clone(&self.inner),
            previous,
        }
    }
}

/// Keeps the store in draw mode for as long as it lives.
pub struct DrawGuard {
    inner: Rc<StoreInner>,
    previous: bool,
}

impl Drop for DrawGuard {
    fn drop(&mut self) {
        self.inner.drawing.set(self.previous);
    }
}
