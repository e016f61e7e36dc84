use zipcompose_core::modifier::{
    Capability, LayoutBehavior, LayoutModification, Measurable, ModifierBehavior, ModifierElement,
};
use zipcompose_core::ComposeError;
use zipcompose_ui_graphics::{Constraints, Size};

/// Forces a width and/or height onto its content, within the incoming bounds.
#[derive(Debug)]
pub struct SizeBehavior {
    width: Option<f32>,
    height: Option<f32>,
}

impl ModifierBehavior for SizeBehavior {
    fn as_layout(&self) -> Option<&dyn LayoutBehavior> {
        Some(self)
    }
}

impl LayoutBehavior for SizeBehavior {
    fn measure(
        &self,
        measurable: &mut dyn Measurable,
        constraints: Constraints,
    ) -> Result<LayoutModification, ComposeError> {
        let width = self
            .width
            .map(|value| value.clamp(constraints.min_width, constraints.max_width));
        let height = self
            .height
            .map(|value| value.clamp(constraints.min_height, constraints.max_height));

        let inner_constraints = Constraints {
            min_width: width.unwrap_or(constraints.min_width),
            max_width: width.unwrap_or(constraints.max_width),
            min_height: height.unwrap_or(constraints.min_height),
            max_height: height.unwrap_or(constraints.max_height),
        };
        let measured = measurable.measure(inner_constraints)?;

        Ok(LayoutModification::with_size(Size::new(
            width.unwrap_or(measured.width),
            height.unwrap_or(measured.height),
        )))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeElement {
    width: Option<f32>,
    height: Option<f32>,
}

impl SizeElement {
    pub fn new(width: Option<f32>, height: Option<f32>) -> Self {
        Self { width, height }
    }
}

impl ModifierElement for SizeElement {
    type Behavior = SizeBehavior;

    fn capability(&self) -> Capability {
        Capability::Layout
    }

    fn create(&self) -> SizeBehavior {
        SizeBehavior {
            width: self.width,
            height: self.height,
        }
    }

    fn update(&self, behavior: &mut SizeBehavior) {
        behavior.width = self.width;
        behavior.height = self.height;
    }

    fn inspector_name(&self) -> &'static str {
        "size"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        if let Some(width) = self.width {
            inspector("width", width.to_string());
        }
        if let Some(height) = self.height {
            inspector("height", height.to_string());
        }
    }
}
