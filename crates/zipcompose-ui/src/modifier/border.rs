use zipcompose_core::layout_node::DrawScope;
use zipcompose_core::modifier::{Capability, DrawBehavior, ModifierBehavior, ModifierElement};
use zipcompose_ui_graphics::{Color, Rect, Shape};

/// Width and color of an outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderStroke {
    pub width: f32,
    pub color: Color,
}

impl BorderStroke {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[derive(Debug)]
pub struct BorderBehavior {
    stroke: BorderStroke,
    shape: Shape,
}

impl ModifierBehavior for BorderBehavior {
    fn as_draw(&self) -> Option<&dyn DrawBehavior> {
        Some(self)
    }
}

impl DrawBehavior for BorderBehavior {
    fn draw(&self, _scope: &mut DrawScope, _bounds: Rect) {}

    // Outlines go on top of the content.
    fn draw_after(&self, scope: &mut DrawScope, bounds: Rect) {
        if self.stroke.width <= 0.0 {
            return;
        }
        scope.stroke(bounds, self.stroke.width, self.stroke.color, self.shape);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorderElement {
    stroke: BorderStroke,
    shape: Shape,
}

impl BorderElement {
    pub fn new(stroke: BorderStroke, shape: Shape) -> Self {
        Self { stroke, shape }
    }
}

impl ModifierElement for BorderElement {
    type Behavior = BorderBehavior;

    fn capability(&self) -> Capability {
        Capability::Draw
    }

    fn create(&self) -> BorderBehavior {
        BorderBehavior {
            stroke: self.stroke,
            shape: self.shape,
        }
    }

    fn update(&self, behavior: &mut BorderBehavior) {
        behavior.stroke = self.stroke;
        behavior.shape = self.shape;
    }

    fn inspector_name(&self) -> &'static str {
        "border"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        inspector("width", self.stroke.width.to_string());
    }
}
