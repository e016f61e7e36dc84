//! Text widget implementation

#![allow(non_snake_case)]

use crate::text::measure_text;
use crate::theme::local_content_color;
use std::rc::Rc;
use zipcompose_core::layout_node::{ChildMeasurer, DrawScope, LayoutNode, Widget, WidgetConstructor};
use zipcompose_core::{ComposeError, ComposeResult, Composer, Modifier};
use zipcompose_ui_graphics::{Color, Constraints, Rect, Size};

const TEXT_SLOT: &str = "text";
const COLOR_SLOT: &str = "color";

/// Single run of text measured with the global text measurer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextWidget {
    pub text: String,
    pub color: Color,
}

impl TextWidget {
    fn from_node(node: &LayoutNode) -> Result<Self, ComposeError> {
        let text = node.typed_slot::<String>(TEXT_SLOT)?;
        let color = node.typed_slot::<Color>(COLOR_SLOT)?;
        Ok(Self {
            text: text.unwrap_or_default(),
            color: color.unwrap_or(Color::BLACK),
        })
    }
}

impl Widget for TextWidget {
    fn layout(
        &self,
        constraints: Constraints,
        _children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        let metrics = measure_text(&self.text);
        let (width, height) = constraints.constrain(metrics.width, metrics.height);
        Ok(Size::new(width, height))
    }

    fn draw(&self, scope: &mut DrawScope, bounds: Rect) {
        if !self.text.is_empty() {
            scope.draw_text(bounds.origin(), self.text.as_str(), self.color);
        }
    }
}

/// Draws `text` in the content color provided by the enclosing surface.
pub fn Text(composer: &Composer, text: &str, modifier: Modifier) -> ComposeResult {
    let color = local_content_color().current(composer);
    composer.block("Text", |composer| {
        composer.set_modifier(modifier)?;
        composer.emit_slot(TEXT_SLOT, text)?;
        composer.emit_slot(COLOR_SLOT, color)?;
        composer.set_widget_constructor(WidgetConstructor::try_with_inputs("Text", |node| {
            Ok(Rc::new(TextWidget::from_node(node)?) as Rc<dyn Widget>)
        }))
    })
}
