//! Button widget implementation

#![allow(non_snake_case)]

use super::Surface;
use crate::modifier::ModifierExt;
use crate::theme::{current_theme, local_density, SurfaceStyle};
use zipcompose_core::{ComposeResult, Composer, Modifier};
use zipcompose_ui_graphics::Point;

/// Primary-colored surface that runs `on_click` when released over.
pub fn Button(
    composer: &Composer,
    modifier: Modifier,
    on_click: impl Fn(Point) + 'static,
    content: impl FnOnce(&Composer) -> ComposeResult,
) -> ComposeResult {
    let theme = current_theme(composer);
    let density = local_density().current(composer);
    let style = SurfaceStyle::default()
        .color(theme.primary)
        .content_color(theme.on_primary);
    let chain = modifier
        .clickable(on_click)
        .padding_symmetric(theme.spacing.to_px(density) * 2.0, theme.spacing.to_px(density));
    Surface(composer, chain, style, content)
}
