//! Modifier elements shipped with the UI crate and the builder methods that
//! append them to a [`Modifier`] chain.
//!
//! ```ignore
//! let modifier = Modifier::empty()
//!     .padding(8.0)
//!     .background(Color::WHITE)
//!     .clickable(|at| log::info!("clicked at {at:?}"));
//! ```

mod background;
mod border;
mod clickable;
mod clip;
mod offset;
mod padding;
mod scale;
mod size;

pub use background::{BackgroundBehavior, BackgroundElement};
pub use border::{BorderBehavior, BorderElement, BorderStroke};
pub use clickable::{ClickHandler, ClickableBehavior, ClickableElement};
pub use clip::{ClipBehavior, ClipElement};
pub use offset::{OffsetBehavior, OffsetElement};
pub use padding::{PaddingBehavior, PaddingElement};
pub use scale::{ScaleBehavior, ScaleElement};
pub use size::{SizeBehavior, SizeElement};

pub use zipcompose_core::Modifier;

use zipcompose_ui_graphics::{Color, EdgeInsets, Point, Shape};

/// Builder methods for the elements in this module.
pub trait ModifierExt: Sized {
    /// Pads all four sides by the same amount.
    fn padding(self, all: f32) -> Modifier;

    fn padding_symmetric(self, horizontal: f32, vertical: f32) -> Modifier;

    fn padding_each(self, left: f32, top: f32, right: f32, bottom: f32) -> Modifier;

    fn padding_insets(self, insets: EdgeInsets) -> Modifier;

    /// Requests an exact size, clamped to the incoming constraints.
    fn size(self, width: f32, height: f32) -> Modifier;

    fn width(self, width: f32) -> Modifier;

    fn height(self, height: f32) -> Modifier;

    /// Moves the content without affecting the node's measured size.
    fn offset(self, x: f32, y: f32) -> Modifier;

    fn clip(self, shape: Shape) -> Modifier;

    fn background(self, color: Color) -> Modifier;

    fn background_shape(self, color: Color, shape: Shape) -> Modifier;

    fn border(self, stroke: BorderStroke, shape: Shape) -> Modifier;

    fn scale(self, scale: f32) -> Modifier;

    fn scale_xy(self, scale_x: f32, scale_y: f32) -> Modifier;

    /// Make the component clickable.
    ///
    /// Example: `Modifier::empty().clickable(|pt| println!("Clicked at {:?}", pt))`
    fn clickable(self, on_click: impl Fn(Point) + 'static) -> Modifier;

    fn clickable_handler(self, on_click: ClickHandler) -> Modifier;
}

impl ModifierExt for Modifier {
    fn padding(self, all: f32) -> Modifier {
        self.padding_insets(EdgeInsets::uniform(all))
    }

    fn padding_symmetric(self, horizontal: f32, vertical: f32) -> Modifier {
        self.padding_insets(EdgeInsets::symmetric(horizontal, vertical))
    }

    fn padding_each(self, left: f32, top: f32, right: f32, bottom: f32) -> Modifier {
        self.padding_insets(EdgeInsets::from_components(left, top, right, bottom))
    }

    fn padding_insets(self, insets: EdgeInsets) -> Modifier {
        self.element(PaddingElement::new(insets))
    }

    fn size(self, width: f32, height: f32) -> Modifier {
        self.element(SizeElement::new(Some(width), Some(height)))
    }

    fn width(self, width: f32) -> Modifier {
        self.element(SizeElement::new(Some(width), None))
    }

    fn height(self, height: f32) -> Modifier {
        self.element(SizeElement::new(None, Some(height)))
    }

    fn offset(self, x: f32, y: f32) -> Modifier {
        self.element(OffsetElement::new(x, y))
    }

    fn clip(self, shape: Shape) -> Modifier {
        self.element(ClipElement::new(shape))
    }

    fn background(self, color: Color) -> Modifier {
        self.background_shape(color, Shape::Rectangle)
    }

    fn background_shape(self, color: Color, shape: Shape) -> Modifier {
        self.element(BackgroundElement::new(color, shape))
    }

    fn border(self, stroke: BorderStroke, shape: Shape) -> Modifier {
        self.element(BorderElement::new(stroke, shape))
    }

    fn scale(self, scale: f32) -> Modifier {
        self.scale_xy(scale, scale)
    }

    fn scale_xy(self, scale_x: f32, scale_y: f32) -> Modifier {
        self.element(ScaleElement::new(scale_x, scale_y))
    }

    fn clickable(self, on_click: impl Fn(Point) + 'static) -> Modifier {
        self.element(ClickableElement::new(on_click))
    }

    fn clickable_handler(self, on_click: ClickHandler) -> Modifier {
        self.element(ClickableElement::with_handler(on_click))
    }
}
