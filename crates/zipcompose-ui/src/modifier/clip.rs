use zipcompose_core::layout_node::DrawScope;
use zipcompose_core::modifier::{Capability, DrawBehavior, ModifierBehavior, ModifierElement};
use zipcompose_ui_graphics::{Rect, Shape};

/// Restricts everything drawn inside it to `shape`.
#[derive(Debug)]
pub struct ClipBehavior {
    shape: Shape,
}

impl ModifierBehavior for ClipBehavior {
    fn as_draw(&self) -> Option<&dyn DrawBehavior> {
        Some(self)
    }
}

impl DrawBehavior for ClipBehavior {
    fn draw(&self, scope: &mut DrawScope, bounds: Rect) {
        scope.push_clip(bounds, self.shape);
    }

    fn draw_after(&self, scope: &mut DrawScope, _bounds: Rect) {
        scope.pop_clip();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipElement {
    shape: Shape,
}

impl ClipElement {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }
}

impl ModifierElement for ClipElement {
    type Behavior = ClipBehavior;

    fn capability(&self) -> Capability {
        Capability::Draw
    }

    fn create(&self) -> ClipBehavior {
        ClipBehavior { shape: self.shape }
    }

    fn update(&self, behavior: &mut ClipBehavior) {
        behavior.shape = self.shape;
    }

    fn inspector_name(&self) -> &'static str {
        "clip"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        inspector("shape", format!("{:?}", self.shape));
    }
}
