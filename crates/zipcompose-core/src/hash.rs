//! Hashing used for identifiers and key seeds.
//!
//! The default build hashes with `ahash` using fixed keys so identifiers are
//! reproducible across runs; `std-hash` falls back to the standard hasher.

use std::hash::{Hash, Hasher};

#[cfg(feature = "std-hash")]
pub mod default {
    pub use std::collections::hash_map::DefaultHasher;

    #[inline]
    pub fn new() -> DefaultHasher {
        DefaultHasher::new()
    }
}

#[cfg(not(feature = "std-hash"))]
pub mod default {
    pub use ahash::AHasher as DefaultHasher;
    use std::hash::BuildHasher;

    #[inline]
    pub fn new() -> DefaultHasher {
        ahash::RandomState::with_seeds(
            0x243f_6a88_85a3_08d3,
            0x1319_8a2e_0370_7344,
            0xa409_3822_299f_31d0,
            0x082e_fa98_ec4e_6c89,
        )
        .build_hasher()
    }
}

/// Hashes any value into a 64-bit seed.
pub fn hash_value<K: Hash + ?Sized>(value: &K) -> u64 {
    let mut hasher = default::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Combines a parent identifier, a tag that names the derivation and a
/// discriminator into a new 64-bit value.
pub fn mix(parent: u64, tag: u8, discriminator: u64) -> u64 {
    let mut hasher = default::new();
    parent.hash(&mut hasher);
    tag.hash(&mut hasher);
    discriminator.hash(&mut hasher);
    hasher.finish()
}
