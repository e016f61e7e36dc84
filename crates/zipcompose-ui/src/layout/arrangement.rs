use std::hash::{Hash, Hasher};

/// How children share the main axis of a `Row` or `Column`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LinearArrangement {
    /// Packed against the leading edge.
    #[default]
    Start,
    /// Packed against the trailing edge.
    End,
    /// Packed and centered as a block.
    Center,
    /// Free space split evenly between children, none at the edges.
    SpaceBetween,
    /// Fixed gap between consecutive children.
    SpacedBy(f32),
}

impl LinearArrangement {
    pub fn spaced_by(spacing: f32) -> Self {
        Self::SpacedBy(spacing.max(0.0))
    }

    /// Whether the arrangement wants the whole main axis when it is bounded.
    pub fn fills_main_axis(&self) -> bool {
        !matches!(self, Self::Start | Self::SpacedBy(_))
    }

    /// Space the arrangement adds between `count` children on its own.
    pub fn fixed_spacing(&self, count: usize) -> f32 {
        match *self {
            Self::SpacedBy(gap) if count > 1 => gap * (count - 1) as f32,
            _ => 0.0,
        }
    }

    /// Writes the main-axis offset of each child into `positions`.
    pub fn arrange(&self, total: f32, sizes: &[f32], positions: &mut [f32]) {
        debug_assert_eq!(sizes.len(), positions.len());
        if sizes.is_empty() {
            return;
        }
        let free = (total - sizes.iter().sum::<f32>()).max(0.0);
        let (start, gap) = match *self {
            Self::Start => (0.0, 0.0),
            Self::End => (free, 0.0),
            Self::Center => (free / 2.0, 0.0),
            Self::SpaceBetween if sizes.len() > 1 => (0.0, free / (sizes.len() - 1) as f32),
            Self::SpaceBetween => (0.0, 0.0),
            Self::SpacedBy(gap) => (0.0, gap),
        };
        let mut cursor = start;
        for (size, position) in sizes.iter().zip(positions.iter_mut()) {
            *position = cursor;
            cursor += size + gap;
        }
    }
}

impl Hash for LinearArrangement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Self::SpacedBy(gap) = self {
            gap.to_bits().hash(state);
        }
    }
}
