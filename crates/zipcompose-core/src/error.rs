use crate::identity::Identifier;
use crate::modifier::Capability;

/// Recoverable failures surfaced by composition and the node phases.
///
/// Structural corruption of the tree (unbalanced blocks, identity collisions,
/// leaked provider frames) is a programming error and panics instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// An identifier was requested while no identity scope was open.
    UnscopedIdentity,
    /// A state cell or remembered value exists under `key` with another type.
    TypeMismatch { key: String, expected: &'static str },
    /// A slot is present on a node but holds a different kind of value.
    SlotTypeMismatch { name: String, expected: &'static str },
    /// A modifier element needs a phase the hosting node or its behavior lacks.
    MissingCapability {
        node: Identifier,
        capability: Capability,
    },
    /// An operation needed a composed tree or an open block and found none.
    NotComposed,
    /// Pointer or draw was requested before layout ran for the current tree.
    LayoutPending,
}

impl std::fmt::Display for ComposeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComposeError::UnscopedIdentity => {
                write!(f, "identifier requested outside of any identity scope")
            }
            ComposeError::TypeMismatch { key, expected } => {
                write!(f, "value stored under `{key}` type mismatch; expected {expected}")
            }
            ComposeError::SlotTypeMismatch { name, expected } => {
                write!(f, "slot `{name}` type mismatch; expected {expected}")
            }
            ComposeError::MissingCapability { node, capability } => {
                write!(f, "node {node} cannot host a {capability:?} modifier")
            }
            ComposeError::NotComposed => write!(f, "no composition in progress"),
            ComposeError::LayoutPending => {
                write!(f, "layout has not run for the current tree")
            }
        }
    }
}

impl std::error::Error for ComposeError {}

/// Result of running a composable or a composer operation that can fail.
pub type ComposeResult<T = ()> = Result<T, ComposeError>;
