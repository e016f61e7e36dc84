//! Layout primitives. Every primitive is a plain function taking the
//! composer first, so it composes like any other content closure.

pub mod box_widget;
pub mod button;
pub mod column;
pub mod layout;
pub mod row;
pub mod spacer;
pub mod surface;
pub mod text;

pub use box_widget::*;
pub use button::*;
pub use column::*;
pub use layout::*;
pub use row::*;
pub use spacer::*;
pub use surface::*;
pub use text::*;
