//! Outline shapes used by clip, background and border modifiers.

use crate::{Rect, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Clamps every radius so no corner exceeds half of the shorter side.
    pub fn resolve(&self, size: Size) -> CornerRadii {
        let limit = (size.width.min(size.height) / 2.0).max(0.0);
        CornerRadii {
            top_left: self.top_left.clamp(0.0, limit),
            top_right: self.top_right.clamp(0.0, limit),
            bottom_right: self.bottom_right.clamp(0.0, limit),
            bottom_left: self.bottom_left.clamp(0.0, limit),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Shape {
    #[default]
    Rectangle,
    Circle,
    RoundedCorner(CornerRadii),
    CutCorner(CornerRadii),
}

impl Shape {
    pub fn rounded(radius: f32) -> Self {
        Shape::RoundedCorner(CornerRadii::uniform(radius))
    }

    pub fn cut(size: f32) -> Self {
        Shape::CutCorner(CornerRadii::uniform(size))
    }

    /// Resolves corner geometry against the concrete bounds the shape is applied to.
    pub fn resolve(&self, bounds: Rect) -> ResolvedShape {
        let size = bounds.size();
        match self {
            Shape::Rectangle => ResolvedShape::Rect(bounds),
            Shape::Circle => ResolvedShape::Ellipse(bounds),
            Shape::RoundedCorner(radii) => ResolvedShape::RoundRect(bounds, radii.resolve(size)),
            Shape::CutCorner(radii) => ResolvedShape::CutRect(bounds, radii.resolve(size)),
        }
    }

    /// Hit test against a shape laid out in `bounds`.
    pub fn contains(&self, bounds: Rect, x: f32, y: f32) -> bool {
        if !bounds.contains(x, y) {
            return false;
        }
        match self {
            Shape::Circle => {
                let rx = bounds.width / 2.0;
                let ry = bounds.height / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (x - (bounds.x + rx)) / rx;
                let dy = (y - (bounds.y + ry)) / ry;
                dx * dx + dy * dy <= 1.0
            }
            _ => true,
        }
    }
}

/// A shape with its geometry resolved for a particular rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolvedShape {
    Rect(Rect),
    Ellipse(Rect),
    RoundRect(Rect, CornerRadii),
    CutRect(Rect, CornerRadii),
}
