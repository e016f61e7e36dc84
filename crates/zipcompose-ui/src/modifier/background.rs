use zipcompose_core::layout_node::DrawScope;
use zipcompose_core::modifier::{Capability, DrawBehavior, ModifierBehavior, ModifierElement};
use zipcompose_ui_graphics::{Color, Rect, Shape};

#[derive(Debug)]
pub struct BackgroundBehavior {
    color: Color,
    shape: Shape,
}

impl BackgroundBehavior {
    pub fn color(&self) -> Color {
        self.color
    }
}

impl ModifierBehavior for BackgroundBehavior {
    fn as_draw(&self) -> Option<&dyn DrawBehavior> {
        Some(self)
    }
}

impl DrawBehavior for BackgroundBehavior {
    fn draw(&self, scope: &mut DrawScope, bounds: Rect) {
        scope.fill(bounds, self.color, self.shape);
    }
}

/// Paints a solid shape behind the content.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundElement {
    color: Color,
    shape: Shape,
}

impl BackgroundElement {
    pub fn new(color: Color, shape: Shape) -> Self {
        Self { color, shape }
    }
}

impl ModifierElement for BackgroundElement {
    type Behavior = BackgroundBehavior;

    fn capability(&self) -> Capability {
        Capability::Draw
    }

    fn create(&self) -> BackgroundBehavior {
        BackgroundBehavior {
            color: self.color,
            shape: self.shape,
        }
    }

    fn update(&self, behavior: &mut BackgroundBehavior) {
        behavior.color = self.color;
        behavior.shape = self.shape;
    }

    fn inspector_name(&self) -> &'static str {
        "background"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        let Color(r, g, b, a) = self.color;
        inspector("color", format!("rgba({r}, {g}, {b}, {a})"));
        if self.shape != Shape::Rectangle {
            inspector("shape", format!("{:?}", self.shape));
        }
    }
}
