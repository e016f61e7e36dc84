//! Pure math/data for geometry, color, shapes & units in zipcompose
//!
//! This crate contains the value types shared by the composition runtime and
//! the modifier library: points, sizes, insets, constraints, colors, shapes
//! and density-independent units. Nothing in here knows about the node tree.

mod color;
mod constraints;
mod geometry;
mod shape;
mod take_or_else;
mod unit;

pub use color::*;
pub use constraints::*;
pub use geometry::*;
pub use shape::*;
pub use take_or_else::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::constraints::Constraints;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::shape::{CornerRadii, Shape};
    pub use crate::take_or_else::TakeOrElse;
    pub use crate::unit::Dp;
}
