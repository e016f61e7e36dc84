use zipcompose_ui_graphics::{Point, Size};

/// Placement of a child along the horizontal axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    #[default]
    Start,
    CenterHorizontally,
    End,
}

impl HorizontalAlignment {
    /// Offset of a `child`-wide item inside `available` width.
    pub fn align(&self, available: f32, child: f32) -> f32 {
        let free = (available - child).max(0.0);
        match self {
            HorizontalAlignment::Start => 0.0,
            HorizontalAlignment::CenterHorizontally => free / 2.0,
            HorizontalAlignment::End => free,
        }
    }
}

/// Placement of a child along the vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    #[default]
    Top,
    CenterVertically,
    Bottom,
}

impl VerticalAlignment {
    pub fn align(&self, available: f32, child: f32) -> f32 {
        let free = (available - child).max(0.0);
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::CenterVertically => free / 2.0,
            VerticalAlignment::Bottom => free,
        }
    }
}

/// Two-axis alignment used by `Box`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl Alignment {
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const TOP_START: Self = Self::new(HorizontalAlignment::Start, VerticalAlignment::Top);
    pub const TOP_END: Self = Self::new(HorizontalAlignment::End, VerticalAlignment::Top);
    pub const CENTER: Self = Self::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::CenterVertically,
    );
    pub const BOTTOM_START: Self = Self::new(HorizontalAlignment::Start, VerticalAlignment::Bottom);
    pub const BOTTOM_END: Self = Self::new(HorizontalAlignment::End, VerticalAlignment::Bottom);

    /// Position of `child` inside `available`.
    pub fn align(&self, available: Size, child: Size) -> Point {
        Point::new(
            self.horizontal.align(available.width, child.width),
            self.vertical.align(available.height, child.height),
        )
    }
}
