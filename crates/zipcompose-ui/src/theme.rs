//! Theme values and the thread-safe manager that hosts share with the
//! composition through root-level locals.
//!
//! ```ignore
//! let manager = ThemeManager::new(Theme::dark());
//! composition.provide_root(local_theme_manager().provides(manager.clone()));
//! ```

use crate::modifier::BorderStroke;
use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use zipcompose_core::{composition_local_of, Composer, CompositionLocal};
use zipcompose_ui_graphics::{Color, Dp, Shape, TakeOrElse};

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub on_primary: Color,
    pub background: Color,
    pub surface: Color,
    pub on_surface: Color,
    pub outline: Color,
    pub corner_radius: Dp,
    pub spacing: Dp,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            primary: Color::from_rgb_u8(0x3f, 0x51, 0xb5),
            on_primary: Color::WHITE,
            background: Color::from_rgb_u8(0xfa, 0xfa, 0xfa),
            surface: Color::WHITE,
            on_surface: Color::BLACK,
            outline: Color::from_rgb_u8(0xbd, 0xbd, 0xbd),
            corner_radius: Dp(4.0),
            spacing: Dp(8.0),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::from_rgb_u8(0x9f, 0xa8, 0xda),
            on_primary: Color::BLACK,
            background: Color::from_rgb_u8(0x12, 0x12, 0x12),
            surface: Color::from_rgb_u8(0x1e, 0x1e, 0x1e),
            on_surface: Color::WHITE,
            outline: Color::from_rgb_u8(0x5f, 0x5f, 0x5f),
            corner_radius: Dp(4.0),
            spacing: Dp(8.0),
        }
    }

    /// Fully specified surface style at `density`.
    pub fn surface_style(&self, density: f32) -> SurfaceStyle {
        SurfaceStyle {
            color: Some(self.surface),
            content_color: Some(self.on_surface),
            border: Some(BorderStroke::new(Dp(1.0).to_px(density), self.outline)),
            shape: Some(Shape::rounded(self.corner_radius.to_px(density))),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Per-call surface overrides. Unset fields come from the theme.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceStyle {
    pub color: Option<Color>,
    pub content_color: Option<Color>,
    pub border: Option<BorderStroke>,
    pub shape: Option<Shape>,
}

impl SurfaceStyle {
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn content_color(mut self, color: Color) -> Self {
        self.content_color = Some(color);
        self
    }

    pub fn border(mut self, border: BorderStroke) -> Self {
        self.border = Some(border);
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }
}

impl TakeOrElse for SurfaceStyle {
    fn take_or_else(self, fallback: impl FnOnce() -> Self) -> Self {
        let fallback = fallback();
        SurfaceStyle {
            color: self.color.or(fallback.color),
            content_color: self.content_color.or(fallback.content_color),
            border: self.border.or(fallback.border),
            shape: self.shape.or(fallback.shape),
        }
    }
}

/// Shared, thread-safe holder of the active [`Theme`].
///
/// Writers on other threads only change what the next frame reads; the host
/// is responsible for scheduling that frame.
#[derive(Clone, Default)]
pub struct ThemeManager {
    inner: Arc<RwLock<Theme>>,
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        Self {
            inner: Arc::new(RwLock::new(theme)),
        }
    }

    pub fn current(&self) -> Theme {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, theme: Theme) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = theme;
    }

    pub fn update(&self, f: impl FnOnce(&mut Theme)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

impl fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeManager")
            .field("theme", &self.current())
            .finish()
    }
}

struct Locals {
    theme_manager: CompositionLocal<ThemeManager>,
    content_color: CompositionLocal<Color>,
    density: CompositionLocal<f32>,
}

thread_local! {
    static LOCALS: RefCell<Option<Locals>> = const { RefCell::new(None) };
}

fn with_locals<R>(f: impl FnOnce(&Locals) -> R) -> R {
    LOCALS.with(|cell| {
        let mut slot = cell.borrow_mut();
        let locals = slot.get_or_insert_with(|| Locals {
            theme_manager: composition_local_of(ThemeManager::default),
            content_color: composition_local_of(|| Color::BLACK),
            density: composition_local_of(|| 1.0),
        });
        f(locals)
    })
}

/// Theme manager visible at the current position.
pub fn local_theme_manager() -> CompositionLocal<ThemeManager> {
    with_locals(|locals| locals.theme_manager.clone())
}

/// Preferred color for text and icons drawn on the enclosing surface.
pub fn local_content_color() -> CompositionLocal<Color> {
    with_locals(|locals| locals.content_color.clone())
}

/// Pixels per [`Dp`].
pub fn local_density() -> CompositionLocal<f32> {
    with_locals(|locals| locals.density.clone())
}

/// Snapshot of the theme in effect at the current position.
pub fn current_theme(composer: &Composer) -> Theme {
    local_theme_manager().current(composer).current()
}
