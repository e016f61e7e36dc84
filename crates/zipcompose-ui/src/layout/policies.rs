//! Widgets that lay out children: the measure policies behind `Box`,
//! `Column`, `Row` and `Spacer`.

use super::{Alignment, HorizontalAlignment, LinearArrangement, VerticalAlignment};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use zipcompose_core::layout_node::{ChildMeasurer, Widget};
use zipcompose_core::ComposeError;
use zipcompose_ui_graphics::{Constraints, Point, Size};

/// Main axis of a linear layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn main(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    fn cross(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }

    fn max_main(self, constraints: &Constraints) -> f32 {
        match self {
            Axis::Horizontal => constraints.max_width,
            Axis::Vertical => constraints.max_height,
        }
    }

    fn max_cross(self, constraints: &Constraints) -> f32 {
        match self {
            Axis::Horizontal => constraints.max_height,
            Axis::Vertical => constraints.max_width,
        }
    }
}

/// Cross-axis placement shared by rows and columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CrossAlignment {
    #[default]
    Start,
    Center,
    End,
}

impl CrossAlignment {
    fn align(self, available: f32, child: f32) -> f32 {
        let free = (available - child).max(0.0);
        match self {
            CrossAlignment::Start => 0.0,
            CrossAlignment::Center => free / 2.0,
            CrossAlignment::End => free,
        }
    }
}

impl From<HorizontalAlignment> for CrossAlignment {
    fn from(value: HorizontalAlignment) -> Self {
        match value {
            HorizontalAlignment::Start => CrossAlignment::Start,
            HorizontalAlignment::CenterHorizontally => CrossAlignment::Center,
            HorizontalAlignment::End => CrossAlignment::End,
        }
    }
}

impl From<VerticalAlignment> for CrossAlignment {
    fn from(value: VerticalAlignment) -> Self {
        match value {
            VerticalAlignment::Top => CrossAlignment::Start,
            VerticalAlignment::CenterVertically => CrossAlignment::Center,
            VerticalAlignment::Bottom => CrossAlignment::End,
        }
    }
}

/// Stacks children on top of each other and aligns each one inside the
/// largest child's bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoxPolicy {
    pub alignment: Alignment,
    /// Passes the incoming minimum size on to children instead of loosening it.
    pub propagate_min_constraints: bool,
}

impl Widget for BoxPolicy {
    fn layout(
        &self,
        constraints: Constraints,
        children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        let child_constraints = if self.propagate_min_constraints {
            constraints
        } else {
            constraints.loosen()
        };

        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        for index in 0..children.len() {
            let size = children.measure(index, child_constraints)?;
            width = width.max(size.width);
            height = height.max(size.height);
        }

        let (width, height) = constraints.constrain(width, height);
        let space = Size::new(width, height);
        for index in 0..children.len() {
            let child = children.size(index);
            children.place(index, self.alignment.align(space, child));
        }
        Ok(space)
    }
}

/// Places children one after another along `axis`.
#[derive(Clone, Copy, Debug, PartialEq, Hash)]
pub struct LinearPolicy {
    pub axis: Axis,
    pub arrangement: LinearArrangement,
    pub cross_alignment: CrossAlignment,
}

impl LinearPolicy {
    pub fn column(arrangement: LinearArrangement, alignment: HorizontalAlignment) -> Self {
        Self {
            axis: Axis::Vertical,
            arrangement,
            cross_alignment: alignment.into(),
        }
    }

    pub fn row(arrangement: LinearArrangement, alignment: VerticalAlignment) -> Self {
        Self {
            axis: Axis::Horizontal,
            arrangement,
            cross_alignment: alignment.into(),
        }
    }
}

impl Widget for LinearPolicy {
    fn layout(
        &self,
        constraints: Constraints,
        children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        let axis = self.axis;
        let count = children.len();
        let max_main = axis.max_main(&constraints);
        let max_cross = axis.max_cross(&constraints);

        // Each child gets whatever main-axis space its predecessors left over.
        let mut used = self.arrangement.fixed_spacing(count);
        let mut cross: f32 = 0.0;
        let mut sizes: SmallVec<[f32; 8]> = SmallVec::with_capacity(count);
        for index in 0..count {
            let remaining = (max_main - used).max(0.0);
            let bounds = axis.size(remaining, max_cross);
            let size = children.measure(index, Constraints::loose(bounds.width, bounds.height))?;
            used += axis.main(size);
            cross = cross.max(axis.cross(size));
            sizes.push(axis.main(size));
        }

        let mut main = used;
        if self.arrangement.fills_main_axis() && max_main.is_finite() {
            main = main.max(max_main);
        }
        let natural = axis.size(main, cross);
        let (width, height) = constraints.constrain(natural.width, natural.height);
        let own = Size::new(width, height);

        let mut positions: SmallVec<[f32; 8]> = SmallVec::from_elem(0.0, count);
        self.arrangement
            .arrange(axis.main(own), &sizes, &mut positions);
        for (index, main_position) in positions.into_iter().enumerate() {
            let child_cross = axis.cross(children.size(index));
            let cross_position = self.cross_alignment.align(axis.cross(own), child_cross);
            children.place(index, axis.point(main_position, cross_position));
        }
        Ok(own)
    }
}

/// Childless widget with a fixed preferred size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafPolicy {
    pub size: Size,
}

impl LeafPolicy {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Hash for LeafPolicy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.width.to_bits().hash(state);
        self.size.height.to_bits().hash(state);
    }
}

impl Widget for LeafPolicy {
    fn layout(
        &self,
        constraints: Constraints,
        _children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        let (width, height) = constraints.constrain(self.size.width, self.size.height);
        Ok(Size::new(width, height))
    }
}
