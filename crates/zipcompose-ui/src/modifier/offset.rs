use zipcompose_core::modifier::{
    Capability, LayoutBehavior, LayoutModification, Measurable, ModifierBehavior, ModifierElement,
};
use zipcompose_core::ComposeError;
use zipcompose_ui_graphics::{Constraints, Point};

/// Shifts its content without changing the size it reports.
#[derive(Debug)]
pub struct OffsetBehavior {
    offset: Point,
}

impl ModifierBehavior for OffsetBehavior {
    fn as_layout(&self) -> Option<&dyn LayoutBehavior> {
        Some(self)
    }
}

impl LayoutBehavior for OffsetBehavior {
    fn measure(
        &self,
        measurable: &mut dyn Measurable,
        constraints: Constraints,
    ) -> Result<LayoutModification, ComposeError> {
        let size = measurable.measure(constraints)?;
        Ok(LayoutModification {
            size,
            content_offset: self.offset,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OffsetElement {
    offset: Point,
}

impl OffsetElement {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            offset: Point::new(x, y),
        }
    }
}

impl ModifierElement for OffsetElement {
    type Behavior = OffsetBehavior;

    fn capability(&self) -> Capability {
        Capability::Layout
    }

    fn create(&self) -> OffsetBehavior {
        OffsetBehavior {
            offset: self.offset,
        }
    }

    fn update(&self, behavior: &mut OffsetBehavior) {
        behavior.offset = self.offset;
    }

    fn inspector_name(&self) -> &'static str {
        "offset"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        inspector("x", self.offset.x.to_string());
        inspector("y", self.offset.y.to_string());
    }
}
