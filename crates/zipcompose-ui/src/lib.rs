//! Modifier elements, layout primitives and theming built on
//! `zipcompose-core`.
//!
//! ```ignore
//! use zipcompose_ui::prelude::*;
//!
//! fn greeting(composer: &Composer) -> ComposeResult {
//!     Column(composer, Modifier::empty().padding(8.0), ColumnSpec::new(), |composer| {
//!         Text(composer, "Hello", Modifier::empty())?;
//!         Spacer(composer, Size::new(0.0, 4.0))
//!     })
//! }
//! ```

pub mod layout;
pub mod modifier;
pub mod text;
pub mod theme;
pub mod widgets;

pub use zipcompose_ui_graphics as graphics;

pub use layout::{Alignment, HorizontalAlignment, LinearArrangement, VerticalAlignment};
pub use modifier::{BorderStroke, ClickHandler, ModifierExt};
pub use text::{measure_text, set_text_measurer, MonospacedTextMeasurer, TextMeasurer, TextMetrics};
pub use theme::{
    current_theme, local_content_color, local_density, local_theme_manager, SurfaceStyle, Theme,
    ThemeManager,
};
pub use widgets::*;

pub mod prelude {
    pub use crate::layout::{Alignment, HorizontalAlignment, LinearArrangement, VerticalAlignment};
    pub use crate::modifier::{BorderStroke, ModifierExt};
    pub use crate::theme::{local_content_color, SurfaceStyle, Theme, ThemeManager};
    pub use crate::widgets::{
        Box, BoxSpec, Button, Column, ColumnSpec, Row, RowSpec, Spacer, Surface, Text,
    };
    pub use zipcompose_core::{ComposeResult, Composer, Composition, Modifier};
    pub use zipcompose_ui_graphics::prelude::*;
}

#[cfg(test)]
#[path = "tests/modifier_tests.rs"]
mod modifier_tests;

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod layout_tests;

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod theme_tests;
