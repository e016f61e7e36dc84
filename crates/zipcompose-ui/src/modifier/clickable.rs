use std::fmt;
use std::rc::Rc;
use zipcompose_core::layout_node::{PointerEvent, PointerEventKind};
use zipcompose_core::modifier::{Capability, ModifierBehavior, ModifierElement, PointerBehavior};
use zipcompose_ui_graphics::{Point, Rect, Shape};

/// Click handler receiving the release position relative to the clicked
/// node's bounds.
pub type ClickHandler = Rc<dyn Fn(Point)>;

pub struct ClickableBehavior {
    on_click: ClickHandler,
    shape: Shape,
    pressed: bool,
}

impl ClickableBehavior {
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl ModifierBehavior for ClickableBehavior {
    fn as_pointer_mut(&mut self) -> Option<&mut dyn PointerBehavior> {
        Some(self)
    }
}

impl PointerBehavior for ClickableBehavior {
    fn on_pointer_event(&mut self, event: &PointerEvent, bounds: Rect) -> bool {
        let position = event.position;
        let inside = self.shape.contains(bounds, position.x, position.y);
        match event.kind {
            PointerEventKind::Down => {
                self.pressed = inside;
                inside
            }
            PointerEventKind::Move => self.pressed,
            PointerEventKind::Up => {
                let was_pressed = std::mem::replace(&mut self.pressed, false);
                if was_pressed && inside {
                    log::trace!("click at ({}, {})", position.x, position.y);
                    (self.on_click)(position - bounds.origin());
                }
                was_pressed
            }
            PointerEventKind::Cancel => std::mem::replace(&mut self.pressed, false),
        }
    }
}

/// Invokes a handler when a press is released inside its shape.
#[derive(Clone)]
pub struct ClickableElement {
    on_click: ClickHandler,
    shape: Shape,
}

impl ClickableElement {
    pub fn new(on_click: impl Fn(Point) + 'static) -> Self {
        Self::with_handler(Rc::new(on_click))
    }

    pub fn with_handler(on_click: ClickHandler) -> Self {
        Self {
            on_click,
            shape: Shape::Rectangle,
        }
    }

    /// Restricts hits to `shape` instead of the full bounds.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }
}

impl fmt::Debug for ClickableElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickableElement")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ClickableElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.on_click, &other.on_click) && self.shape == other.shape
    }
}

impl ModifierElement for ClickableElement {
    type Behavior = ClickableBehavior;

    fn capability(&self) -> Capability {
        Capability::Pointer
    }

    fn create(&self) -> ClickableBehavior {
        ClickableBehavior {
            on_click: self.on_click.clone(),
            shape: self.shape,
            pressed: false,
        }
    }

    // Keeps the press in flight when only the handler changes.
    fn update(&self, behavior: &mut ClickableBehavior) {
        behavior.on_click = self.on_click.clone();
        behavior.shape = self.shape;
    }

    fn inspector_name(&self) -> &'static str {
        "clickable"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        inspector("onClick", "provided".to_owned());
    }
}
