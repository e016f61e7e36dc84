use zipcompose_core::modifier::{
    Capability, LayoutBehavior, LayoutModification, Measurable, ModifierBehavior, ModifierElement,
};
use zipcompose_core::ComposeError;
use zipcompose_ui_graphics::{Constraints, EdgeInsets, Point, Size};

/// Insets its content on every side.
#[derive(Debug)]
pub struct PaddingBehavior {
    padding: EdgeInsets,
}

impl PaddingBehavior {
    pub fn padding(&self) -> EdgeInsets {
        self.padding
    }
}

impl ModifierBehavior for PaddingBehavior {
    fn as_layout(&self) -> Option<&dyn LayoutBehavior> {
        Some(self)
    }
}

impl LayoutBehavior for PaddingBehavior {
    fn measure(
        &self,
        measurable: &mut dyn Measurable,
        constraints: Constraints,
    ) -> Result<LayoutModification, ComposeError> {
        let horizontal = self.padding.horizontal_sum();
        let vertical = self.padding.vertical_sum();

        let inner = measurable.measure(constraints.deflate(horizontal, vertical))?;
        let (width, height) = constraints.constrain(inner.width + horizontal, inner.height + vertical);
        Ok(LayoutModification {
            size: Size::new(width, height),
            content_offset: Point::new(self.padding.left, self.padding.top),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaddingElement {
    padding: EdgeInsets,
}

impl PaddingElement {
    pub fn new(padding: EdgeInsets) -> Self {
        Self { padding }
    }
}

impl ModifierElement for PaddingElement {
    type Behavior = PaddingBehavior;

    fn capability(&self) -> Capability {
        Capability::Layout
    }

    fn create(&self) -> PaddingBehavior {
        PaddingBehavior {
            padding: self.padding,
        }
    }

    fn update(&self, behavior: &mut PaddingBehavior) {
        behavior.padding = self.padding;
    }

    fn inspector_name(&self) -> &'static str {
        "padding"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        inspector("paddingLeft", self.padding.left.to_string());
        inspector("paddingTop", self.padding.top.to_string());
        inspector("paddingRight", self.padding.right.to_string());
        inspector("paddingBottom", self.padding.bottom.to_string());
    }
}
