use std::fmt;
use std::rc::Rc;
use zipcompose_ui_graphics::{Color, Dp, EdgeInsets, Size};

/// Named auxiliary value attached to a node during composition.
#[derive(Clone)]
pub enum SlotValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Text(String),
    Color(Color),
    Dp(Dp),
    Size(Size),
    Insets(EdgeInsets),
    Callback(Rc<dyn Fn()>),
}

impl SlotValue {
    pub fn kind(&self) -> &'static str {
        match self {
            SlotValue::Bool(_) => "bool",
            SlotValue::Int(_) => "int",
            SlotValue::Float(_) => "float",
            SlotValue::Text(_) => "text",
            SlotValue::Color(_) => "color",
            SlotValue::Dp(_) => "dp",
            SlotValue::Size(_) => "size",
            SlotValue::Insets(_) => "insets",
            SlotValue::Callback(_) => "callback",
        }
    }
}

impl PartialEq for SlotValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SlotValue::Bool(a), SlotValue::Bool(b)) => a == b,
            (SlotValue::Int(a), SlotValue::Int(b)) => a == b,
            (SlotValue::Float(a), SlotValue::Float(b)) => a == b,
            (SlotValue::Text(a), SlotValue::Text(b)) => a == b,
            (SlotValue::Color(a), SlotValue::Color(b)) => a == b,
            (SlotValue::Dp(a), SlotValue::Dp(b)) => a == b,
            (SlotValue::Size(a), SlotValue::Size(b)) => a == b,
            (SlotValue::Insets(a), SlotValue::Insets(b)) => a == b,
            (SlotValue::Callback(a), SlotValue::Callback(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Bool(value) => write!(f, "{value}"),
            SlotValue::Int(value) => write!(f, "{value}"),
            SlotValue::Float(value) => write!(f, "{value}"),
            SlotValue::Text(value) => write!(f, "{value:?}"),
            SlotValue::Color(value) => write!(f, "{value:?}"),
            SlotValue::Dp(value) => write!(f, "{}dp", value.0),
            SlotValue::Size(value) => write!(f, "{}x{}", value.width, value.height),
            SlotValue::Insets(value) => write!(
                f,
                "insets({}, {}, {}, {})",
                value.left, value.top, value.right, value.bottom
            ),
            SlotValue::Callback(_) => f.write_str("<callback>"),
        }
    }
}

macro_rules! slot_conversions {
    ($($ty:ty => $variant:ident, $kind:literal;)*) => {
        $(
            impl From<$ty> for SlotValue {
                fn from(value: $ty) -> Self {
                    SlotValue::$variant(value)
                }
            }

            impl FromSlot for $ty {
                const KIND: &'static str = $kind;

                fn from_slot(value: &SlotValue) -> Option<Self> {
                    match value {
                        SlotValue::$variant(inner) => Some(inner.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

/// Types a slot can be read back as.
pub trait FromSlot: Sized {
    const KIND: &'static str;

    fn from_slot(value: &SlotValue) -> Option<Self>;
}

slot_conversions! {
    bool => Bool, "bool";
    i64 => Int, "int";
    f32 => Float, "float";
    String => Text, "text";
    Color => Color, "color";
    Dp => Dp, "dp";
    Size => Size, "size";
    EdgeInsets => Insets, "insets";
    Rc<dyn Fn()> => Callback, "callback";
}

impl From<&str> for SlotValue {
    fn from(value: &str) -> Self {
        SlotValue::Text(value.to_owned())
    }
}

impl From<i32> for SlotValue {
    fn from(value: i32) -> Self {
        SlotValue::Int(i64::from(value))
    }
}

impl From<usize> for SlotValue {
    fn from(value: usize) -> Self {
        SlotValue::Int(value as i64)
    }
}
