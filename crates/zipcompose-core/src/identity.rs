//! Deterministic identifiers for composition positions.
//!
//! Identifiers are derived from the enclosing scope's identifier, so two
//! positions never share one even when they sit under different parents.
//! Positional identifiers come from a per-scope counter; keyed identifiers
//! come from hashing a caller supplied seed and do not touch the counter.

use crate::error::ComposeError;
use crate::hash::{hash_value, mix};
use std::fmt;
use std::hash::Hash;

const CHILD_TAG: u8 = 1;
const KEYED_TAG: u8 = 2;
const KEYED_SIBLING_TAG: u8 = 3;
const BRANCH_TAG: u8 = 4;

/// Opaque, totally ordered name of a composition position.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identifier(u64);

impl Identifier {
    /// Sentinel naming the scope above the root node.
    pub const ROOT: Identifier = Identifier(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({:016x})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

pub fn empty_identifier() -> Identifier {
    Identifier::ROOT
}

/// How an identifier was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentitySource {
    /// Nth position in its scope, counting from one.
    Positional(u32),
    /// Hash of an explicit key seed.
    Keyed(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScopeKind {
    Block,
    Keyed { seed: u64, claimed: bool },
}

#[derive(Debug)]
struct IdentityScope {
    base: Identifier,
    counter: u32,
    kind: ScopeKind,
}

impl IdentityScope {
    fn block(base: Identifier) -> Self {
        Self {
            base,
            counter: 0,
            kind: ScopeKind::Block,
        }
    }
}

/// Stack of identity scopes owned by a single composer.
#[derive(Debug, Default)]
pub struct IdentityManager {
    scopes: Vec<IdentityScope>,
}

impl IdentityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every open scope and starts over from the root with a zero counter.
    pub fn reset_key_counter(&mut self) {
        self.scopes.clear();
        self.scopes.push(IdentityScope::block(Identifier::ROOT));
    }

    /// Forgets all scopes; later requests fail until the next reset.
    pub fn clear(&mut self) {
        self.scopes.clear();
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current_scope(&self) -> Option<Identifier> {
        self.scopes.last().map(|scope| scope.base)
    }

    /// Next positional identifier in the current scope.
    pub fn generate_id(&mut self) -> Result<Identifier, ComposeError> {
        self.generate().map(|(id, _)| id)
    }

    fn generate(&mut self) -> Result<(Identifier, IdentitySource), ComposeError> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or(ComposeError::UnscopedIdentity)?;
        scope.counter += 1;
        let tag = match scope.kind {
            ScopeKind::Block => CHILD_TAG,
            ScopeKind::Keyed { .. } => KEYED_SIBLING_TAG,
        };
        let id = Identifier(mix(scope.base.0, tag, u64::from(scope.counter)));
        Ok((id, IdentitySource::Positional(scope.counter)))
    }

    /// Identifier for `seed` in the current scope. Independent of call order.
    pub fn create_id<K: Hash + ?Sized>(&self, seed: &K) -> Result<Identifier, ComposeError> {
        self.create_id_hashed(hash_value(seed))
    }

    fn create_id_hashed(&self, seed: u64) -> Result<Identifier, ComposeError> {
        let scope = self.scopes.last().ok_or(ComposeError::UnscopedIdentity)?;
        Ok(Identifier(mix(scope.base.0, KEYED_TAG, seed)))
    }

    /// Identity for the next block: the pending key of an unclaimed keyed
    /// region if there is one, a positional identifier otherwise.
    pub fn next_block_id(&mut self) -> Result<(Identifier, IdentitySource), ComposeError> {
        if let Some(scope) = self.scopes.last_mut() {
            if let ScopeKind::Keyed {
                seed,
                claimed: false,
            } = scope.kind
            {
                scope.kind = ScopeKind::Keyed {
                    seed,
                    claimed: true,
                };
                return Ok((scope.base, IdentitySource::Keyed(seed)));
            }
        }
        self.generate()
    }

    /// Opens a keyed region. The first block opened inside it is named by
    /// `create_id(seed)`; later ones are positional relative to that name.
    pub fn enter_key<K: Hash + ?Sized>(&mut self, seed: &K) -> Result<Identifier, ComposeError> {
        let seed = hash_value(seed);
        let base = self.create_id_hashed(seed)?;
        self.scopes.push(IdentityScope {
            base,
            counter: 0,
            kind: ScopeKind::Keyed {
                seed,
                claimed: false,
            },
        });
        Ok(base)
    }

    /// Opens a keyed region for one arm of a conditional. The position itself
    /// consumes one positional identifier so siblings after the conditional
    /// keep theirs whichever arm runs.
    pub fn enter_branch(&mut self, arm: bool) -> Result<Identifier, ComposeError> {
        let position = self.generate_id()?;
        let seed = u64::from(arm);
        let base = Identifier(mix(position.0, BRANCH_TAG, seed));
        self.scopes.push(IdentityScope {
            base,
            counter: 0,
            kind: ScopeKind::Keyed {
                seed,
                claimed: false,
            },
        });
        Ok(base)
    }

    pub fn exit_key(&mut self) {
        match self.scopes.pop() {
            Some(IdentityScope {
                kind: ScopeKind::Keyed { .. },
                ..
            }) => {}
            other => panic!("exit_key without a matching keyed region (found {other:?})"),
        }
    }

    /// Opens the child scope of a freshly started block.
    pub fn push_scope(&mut self, id: Identifier) {
        self.scopes.push(IdentityScope::block(id));
    }

    pub fn pop_scope(&mut self) {
        match self.scopes.pop() {
            Some(IdentityScope {
                kind: ScopeKind::Block,
                ..
            }) => {}
            other => panic!("block closed while a keyed region is still open (found {other:?})"),
        }
    }
}
