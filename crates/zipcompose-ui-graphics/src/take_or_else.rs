//! Merge helper for optional style fields.
//!
//! Values that may be left unset are plain `Option`s; `take_or_else` keeps the
//! receiver when it is set and otherwise falls back lazily. Style structs
//! implement it field by field so partially specified styles can be layered.

pub trait TakeOrElse: Sized {
    fn take_or_else(self, fallback: impl FnOnce() -> Self) -> Self;
}

impl<T> TakeOrElse for Option<T> {
    fn take_or_else(self, fallback: impl FnOnce() -> Self) -> Self {
        match self {
            Some(value) => Some(value),
            None => fallback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn keeps_specified_value() {
        let color = Some(Color::RED).take_or_else(|| Some(Color::BLUE));
        assert_eq!(color, Some(Color::RED));
    }

    #[test]
    fn falls_back_when_unspecified() {
        let mut called = false;
        let color: Option<Color> = None.take_or_else(|| {
            called = true;
            Some(Color::BLUE)
        });
        assert!(called);
        assert_eq!(color, Some(Color::BLUE));
    }
}
