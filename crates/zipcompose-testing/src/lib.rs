//! Testing utilities and harness for zipcompose

pub mod assertions;
pub mod rule;

pub use rule::{ComposeTestRule, NodeFinder, MAX_SETTLE_FRAMES};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::rule::{ComposeTestRule, NodeFinder};
}

#[cfg(test)]
#[path = "tests/rule_tests.rs"]
mod rule_tests;
