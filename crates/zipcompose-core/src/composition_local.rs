//! Values passed implicitly down the tree.
//!
//! Providers push a frame of bindings for the duration of their content;
//! reads walk the frames innermost first and fall back to the local's
//! default. Frames are tied to block nesting, so sibling subtrees never see
//! each other's bindings.

use crate::collections::map::HashMap;
use crate::composer::Composer;
use crate::error::ComposeResult;
use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) type LocalKey = usize;
pub(crate) type LocalFrame = HashMap<LocalKey, Rc<dyn Any>>;

static NEXT_LOCAL_KEY: AtomicUsize = AtomicUsize::new(1);

fn next_local_key() -> LocalKey {
    NEXT_LOCAL_KEY.fetch_add(1, Ordering::Relaxed)
}

/// A binding produced by [`CompositionLocal::provides`].
#[derive(Clone)]
pub struct ProvidedValue {
    key: LocalKey,
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl ProvidedValue {
    pub(crate) fn into_entry(self) -> (LocalKey, Rc<dyn Any>) {
        (self.key, self.value)
    }
}

impl fmt::Debug for ProvidedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvidedValue")
            .field("key", &self.key)
            .field("type", &self.type_name)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LocalKind {
    Dynamic,
    Static,
}

#[derive(Clone)]
pub struct CompositionLocal<T: Clone + 'static> {
    key: LocalKey,
    kind: LocalKind,
    default: Rc<dyn Fn() -> T>,
}

impl<T: Clone + 'static> PartialEq for CompositionLocal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T: Clone + 'static> Eq for CompositionLocal<T> {}

impl<T: Clone + 'static> fmt::Debug for CompositionLocal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionLocal")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("type", &type_name::<T>())
            .finish()
    }
}

impl<T: Clone + 'static> CompositionLocal<T> {
    pub fn provides(&self, value: T) -> ProvidedValue {
        ProvidedValue {
            key: self.key,
            value: Rc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Innermost provided value, or the default when nothing provides one.
    pub fn current(&self, composer: &Composer) -> T {
        composer
            .read_local(self.key)
            .and_then(|value| value.downcast_ref::<T>().cloned())
            .unwrap_or_else(|| self.default_value())
    }

    pub fn default_value(&self) -> T {
        (self.default)()
    }

    /// Whether the local was declared with [`static_composition_local_of`].
    pub fn is_static(&self) -> bool {
        self.kind == LocalKind::Static
    }
}

pub fn composition_local_of<T: Clone + 'static>(
    default: impl Fn() -> T + 'static,
) -> CompositionLocal<T> {
    CompositionLocal {
        key: next_local_key(),
        kind: LocalKind::Dynamic,
        default: Rc::new(default),
    }
}

/// Declares a local for values that rarely change. Reads behave exactly like
/// [`composition_local_of`] since every frame recomposes the whole tree.
pub fn static_composition_local_of<T: Clone + 'static>(
    default: impl Fn() -> T + 'static,
) -> CompositionLocal<T> {
    CompositionLocal {
        key: next_local_key(),
        kind: LocalKind::Static,
        default: Rc::new(default),
    }
}

/// Makes `values` visible to everything composed inside `content`.
#[allow(non_snake_case)]
pub fn CompositionLocalProvider(
    composer: &Composer,
    values: impl IntoIterator<Item = ProvidedValue>,
    content: impl FnOnce(&Composer) -> ComposeResult,
) -> ComposeResult {
    composer.with_composition_locals(values, content)
}
