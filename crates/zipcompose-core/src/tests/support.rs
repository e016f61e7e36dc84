//! Small elements and widgets shared by the unit tests.

use crate::layout_node::{ChildMeasurer, DrawScope, PointerEvent, PointerEventKind, Widget, WidgetConstructor};
use crate::modifier::{
    Capability, DrawBehavior, LayoutBehavior, LayoutModification, Measurable, ModifierBehavior,
    ModifierElement, PointerBehavior,
};
use crate::{ComposeError, ComposeResult, Composer, MutableValue};
use std::cell::RefCell;
use std::rc::Rc;
use zipcompose_ui_graphics::{Color, Constraints, Point, Rect, Size};

thread_local! {
    static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

pub(crate) fn record(event: impl Into<String>) {
    EVENTS.with(|events| events.borrow_mut().push(event.into()));
}

pub(crate) fn take_events() -> Vec<String> {
    EVENTS.with(|events| std::mem::take(&mut *events.borrow_mut()))
}

/// Layout element insetting its content by the same amount on every side.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Inset(pub f32);

pub(crate) struct InsetBehavior {
    amount: f32,
}

impl ModifierBehavior for InsetBehavior {
    fn on_attach(&mut self) {
        record(format!("attach inset {}", self.amount));
    }

    fn on_detach(&mut self) {
        record(format!("detach inset {}", self.amount));
    }

    fn as_layout(&self) -> Option<&dyn LayoutBehavior> {
        Some(self)
    }
}

impl LayoutBehavior for InsetBehavior {
    fn measure(
        &self,
        measurable: &mut dyn Measurable,
        constraints: Constraints,
    ) -> Result<LayoutModification, ComposeError> {
        let twice = self.amount * 2.0;
        let inner = measurable.measure(constraints.deflate(twice, twice))?;
        let (width, height) = constraints.constrain(inner.width + twice, inner.height + twice);
        Ok(LayoutModification {
            size: Size::new(width, height),
            content_offset: Point::new(self.amount, self.amount),
        })
    }
}

impl ModifierElement for Inset {
    type Behavior = InsetBehavior;

    fn capability(&self) -> Capability {
        Capability::Layout
    }

    fn create(&self) -> InsetBehavior {
        InsetBehavior { amount: self.0 }
    }

    fn update(&self, behavior: &mut InsetBehavior) {
        behavior.amount = self.0;
    }

    fn inspector_name(&self) -> &'static str {
        "Inset"
    }

    fn inspector_properties(&self, inspector: &mut dyn FnMut(&'static str, String)) {
        inspector("amount", self.0.to_string());
    }
}

/// Draw element that fills its bounds.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Fill(pub Color);

pub(crate) struct FillBehavior {
    color: Color,
}

impl ModifierBehavior for FillBehavior {
    fn as_draw(&self) -> Option<&dyn DrawBehavior> {
        Some(self)
    }
}

impl DrawBehavior for FillBehavior {
    fn draw(&self, scope: &mut DrawScope, bounds: Rect) {
        scope.fill_rect(bounds, self.color);
    }
}

impl ModifierElement for Fill {
    type Behavior = FillBehavior;

    fn capability(&self) -> Capability {
        Capability::Draw
    }

    fn create(&self) -> FillBehavior {
        FillBehavior { color: self.0 }
    }

    fn update(&self, behavior: &mut FillBehavior) {
        behavior.color = self.0;
    }
}

/// Draw element writing `<name` before the content and `>name` after it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Bracket(pub &'static str);

pub(crate) struct BracketBehavior(&'static str);

impl ModifierBehavior for BracketBehavior {
    fn as_draw(&self) -> Option<&dyn DrawBehavior> {
        Some(self)
    }
}

impl DrawBehavior for BracketBehavior {
    fn draw(&self, scope: &mut DrawScope, bounds: Rect) {
        scope.draw_text(bounds.origin(), format!("<{}", self.0), Color::BLACK);
    }

    fn draw_after(&self, scope: &mut DrawScope, bounds: Rect) {
        scope.draw_text(bounds.origin(), format!(">{}", self.0), Color::BLACK);
    }
}

impl ModifierElement for Bracket {
    type Behavior = BracketBehavior;

    fn capability(&self) -> Capability {
        Capability::Draw
    }

    fn create(&self) -> BracketBehavior {
        BracketBehavior(self.0)
    }

    fn update(&self, behavior: &mut BracketBehavior) {
        behavior.0 = self.0;
    }
}

/// Pointer element counting releases into a state cell.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Tap(pub MutableValue<i32>);

pub(crate) struct TapBehavior {
    taps: MutableValue<i32>,
}

impl ModifierBehavior for TapBehavior {
    fn as_pointer_mut(&mut self) -> Option<&mut dyn PointerBehavior> {
        Some(self)
    }
}

impl PointerBehavior for TapBehavior {
    fn on_pointer_event(&mut self, event: &PointerEvent, _bounds: Rect) -> bool {
        if event.kind == PointerEventKind::Up {
            self.taps.update(|taps| *taps += 1);
        }
        true
    }
}

impl ModifierElement for Tap {
    type Behavior = TapBehavior;

    fn capability(&self) -> Capability {
        Capability::Pointer
    }

    fn create(&self) -> TapBehavior {
        TapBehavior {
            taps: self.0.clone(),
        }
    }

    fn update(&self, behavior: &mut TapBehavior) {
        behavior.taps = self.0.clone();
    }
}

/// Claims the draw phase but never exposes a draw behavior.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Hollow;

pub(crate) struct HollowBehavior;

impl ModifierBehavior for HollowBehavior {}

impl ModifierElement for Hollow {
    type Behavior = HollowBehavior;

    fn capability(&self) -> Capability {
        Capability::Draw
    }

    fn create(&self) -> HollowBehavior {
        HollowBehavior
    }

    fn update(&self, _behavior: &mut HollowBehavior) {}
}

/// Fixed-size widget painting its content rectangle.
pub(crate) struct Leaf {
    pub size: Size,
    pub color: Color,
}

impl Widget for Leaf {
    fn layout(
        &self,
        constraints: Constraints,
        _children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        let (width, height) = constraints.constrain(self.size.width, self.size.height);
        Ok(Size::new(width, height))
    }

    fn draw(&self, scope: &mut DrawScope, bounds: Rect) {
        scope.fill_rect(bounds, self.color);
    }
}

/// Stacks children top to bottom.
pub(crate) struct Stack;

impl Widget for Stack {
    fn layout(
        &self,
        constraints: Constraints,
        children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        let mut width: f32 = 0.0;
        let mut y = 0.0;
        for index in 0..children.len() {
            let size = children.measure(index, constraints.loosen())?;
            children.place(index, Point::new(0.0, y));
            y += size.height;
            width = width.max(size.width);
        }
        let (width, height) = constraints.constrain(width, y);
        Ok(Size::new(width, height))
    }
}

pub(crate) fn leaf_widget(width: f32, height: f32) -> WidgetConstructor {
    WidgetConstructor::with_inputs(&(width.to_bits(), height.to_bits()), move |_| {
        Rc::new(Leaf {
            size: Size::new(width, height),
            color: Color::BLUE,
        }) as Rc<dyn Widget>
    })
}

/// Composes a block holding a [`Leaf`] of the given size.
pub(crate) fn leaf(composer: &Composer, key: &str, width: f32, height: f32) -> ComposeResult {
    composer.block(key, |composer| {
        composer.set_widget_constructor(leaf_widget(width, height))
    })
}

/// Composes a block laying its content out with [`Stack`].
pub(crate) fn stack(
    composer: &Composer,
    key: &str,
    content: impl FnOnce(&Composer) -> ComposeResult,
) -> ComposeResult {
    composer.block(key, |composer| {
        composer.set_widget_constructor(WidgetConstructor::new(|_| Rc::new(Stack) as Rc<dyn Widget>))?;
        content(composer)
    })
}
