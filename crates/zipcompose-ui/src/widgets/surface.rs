//! Surface widget implementation

#![allow(non_snake_case)]

use super::{Box, BoxSpec};
use crate::modifier::ModifierExt;
use crate::theme::{current_theme, local_content_color, local_density, SurfaceStyle};
use zipcompose_core::{CompositionLocalProvider, ComposeResult, Composer, Modifier};
use zipcompose_ui_graphics::{Shape, TakeOrElse};

/// Themed container: clips to its shape, paints the surface color, outlines
/// it and makes its content color available to descendants.
pub fn Surface(
    composer: &Composer,
    modifier: Modifier,
    style: SurfaceStyle,
    content: impl FnOnce(&Composer) -> ComposeResult,
) -> ComposeResult {
    let density = local_density().current(composer);
    let theme = current_theme(composer);
    let style = style.take_or_else(|| theme.surface_style(density));

    let shape = style.shape.unwrap_or(Shape::Rectangle);
    let mut chain = Modifier::empty().clip(shape);
    if let Some(color) = style.color {
        chain = chain.background_shape(color, shape);
    }
    if let Some(border) = style.border {
        chain = chain.border(border, shape);
    }
    let chain = chain.then(modifier);

    let mut provided = Vec::new();
    if let Some(color) = style.content_color {
        provided.push(local_content_color().provides(color));
    }
    Box(composer, chain, BoxSpec::default(), |composer| {
        CompositionLocalProvider(composer, provided, content)
    })
}
