//! Alignment, arrangement and the measure policies used by the layout
//! primitives.

mod alignment;
mod arrangement;
pub mod policies;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use arrangement::LinearArrangement;
pub use policies::{Axis, BoxPolicy, CrossAlignment, LeafPolicy, LinearPolicy};
