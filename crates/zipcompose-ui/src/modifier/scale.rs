use zipcompose_core::layout_node::DrawScope;
use zipcompose_core::modifier::{Capability, DrawBehavior, ModifierBehavior, ModifierElement};
use zipcompose_ui_graphics::Rect;

/// Scales drawing around the center of its bounds. Layout and hit testing
/// are unaffected.
#[derive(Debug)]
pub struct ScaleBehavior {
    scale_x: f32,
    scale_y: f32,
}

impl ModifierBehavior for ScaleBehavior {
    fn as_draw(&self) -> Option<&dyn DrawBehavior> {
        Some(self)
    }
}

impl DrawBehavior for ScaleBehavior {
    fn draw(&self, scope: &mut DrawScope, bounds: Rect) {
        let pivot = bounds.origin() + bounds.size().center();
        scope.push_scale(pivot, self.scale_x, self.scale_y);
    }

    fn draw_after(&self, scope: &mut DrawScope, _bounds: Rect) {
        scope.pop_transform();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaleElement {
    scale_x: f32,
    scale_y: f32,
}

impl ScaleElement {
    pub fn new(scale_x: f32, scale_y: f32) -> Self {
        Self { scale_x, scale_y }
    }
}

impl ModifierElement for ScaleElement {
    type Behavior = ScaleBehavior;

    fn capability(&self) -> Capability {
        Capability::Draw
    }

    fn create(&self) -> ScaleBehavior {
        ScaleBehavior {
            scale_x: self.scale_x,
            scale_y: self.scale_y,
        }
    }

    fn update(&self, behavior: &mut ScaleBehavior) {
        behavior.scale_x = self.scale_x;
        behavior.scale_y = self.scale_y;
    }

    fn inspector_name(&self) -> &'static str {
        "scale"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        inspector("scaleX", self.scale_x.to_string());
        inspector("scaleY", self.scale_y.to_string());
    }
}
