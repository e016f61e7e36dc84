#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::hash_map::Entry;
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
    pub use std::collections::hash_map::Entry;
}

/// Insertion-ordered map used where iteration order is observable.
#[cfg(feature = "std-hash")]
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V>;

/// Insertion-ordered map used where iteration order is observable.
#[cfg(not(feature = "std-hash"))]
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
