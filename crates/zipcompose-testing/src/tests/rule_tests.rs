use crate::assertions::{assert_balanced, assert_rect_approx_eq};
use crate::{ComposeTestRule, MAX_SETTLE_FRAMES};
use std::rc::Rc;
use zipcompose_core::layout_node::{
    ChildMeasurer, DrawCommand, DrawScope, PointerEvent, PointerEventKind, Widget, WidgetConstructor,
};
use zipcompose_core::modifier::{Capability, ModifierBehavior, ModifierElement, PointerBehavior};
use zipcompose_core::{ComposeError, ComposeResult, Composer, MutableValue};
use zipcompose_ui_graphics::{Color, Constraints, Point, Rect, Size};

#[derive(Clone, Debug, PartialEq)]
struct Press(MutableValue<i32>);

struct PressBehavior(MutableValue<i32>);

impl ModifierBehavior for PressBehavior {
    fn as_pointer_mut(&mut self) -> Option<&mut dyn PointerBehavior> {
        Some(self)
    }
}

impl PointerBehavior for PressBehavior {
    fn on_pointer_event(&mut self, event: &PointerEvent, _bounds: Rect) -> bool {
        if event.kind == PointerEventKind::Up {
            self.0.update(|count| *count += 1);
        }
        true
    }
}

impl ModifierElement for Press {
    type Behavior = PressBehavior;

    fn capability(&self) -> Capability {
        Capability::Pointer
    }

    fn create(&self) -> PressBehavior {
        PressBehavior(self.0.clone())
    }

    fn update(&self, behavior: &mut PressBehavior) {
        behavior.0 = self.0.clone();
    }
}

/// Fixed-size widget drawing its `text` slot.
struct Caption {
    text: String,
}

impl Widget for Caption {
    fn layout(
        &self,
        constraints: Constraints,
        _children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        let (width, height) = constraints.constrain(40.0, 20.0);
        Ok(Size::new(width, height))
    }

    fn draw(&self, scope: &mut DrawScope, bounds: Rect) {
        scope.draw_text(bounds.origin(), self.text.as_str(), Color::BLACK);
    }
}

fn caption(composer: &Composer, key: &str, text: &str) -> ComposeResult {
    composer.block(key, |composer| {
        composer.emit_slot("text", text)?;
        composer.set_widget_constructor(WidgetConstructor::try_new(|node| {
            let text = node.typed_slot::<String>("text")?.unwrap_or_default();
            Ok(Rc::new(Caption { text }) as Rc<dyn Widget>)
        }))
    })
}

fn counter(composer: &Composer) -> ComposeResult {
    composer.block("counter", |composer| {
        let count = composer.state("count", || 0)?;
        composer.modifier(|modifier| modifier.element(Press(count.clone())))?;
        caption(composer, "label", &count.get().to_string())
    })
}

#[test]
fn set_content_renders_one_frame() {
    let mut rule = ComposeTestRule::new(100.0, 50.0);
    rule.set_content(counter).unwrap();

    assert_eq!(rule.frame_count(), 1);
    assert_eq!(rule.texts(), vec!["0".to_string()]);
    assert_eq!(rule.last_stats().created, 3);
}

#[test]
fn click_recomposes_until_idle() {
    let mut rule = ComposeTestRule::new(100.0, 50.0);
    rule.set_content(counter).unwrap();

    assert!(rule.find_by_key("label").click().unwrap());
    assert_eq!(rule.frame_count(), 2);
    assert_eq!(rule.texts(), vec!["1".to_string()]);

    assert!(rule.click_at(5.0, 5.0).unwrap());
    assert_eq!(rule.texts(), vec!["2".to_string()]);
    rule.find_by_text("2").assert_exists();
    rule.find_by_text("1").assert_not_exists();
}

#[test]
fn click_outside_the_tree_is_not_consumed() {
    let mut rule = ComposeTestRule::new(100.0, 50.0);
    rule.set_content(counter).unwrap();

    assert!(!rule.click_at(500.0, 500.0).unwrap());
    assert_eq!(rule.frame_count(), 1);
}

#[test]
fn finder_reports_bounds_of_matches() {
    let mut rule = ComposeTestRule::new(100.0, 50.0);
    rule.set_content(|composer| {
        caption(composer, "item", "a")?;
        caption(composer, "item", "b")
    })
    .unwrap();

    let finder = rule.find_by_key("item");
    assert_eq!(finder.count(), 2);
    // The root's default widget stacks its children at the origin.
    let bounds = finder.nth(1).bounds().unwrap();
    assert_rect_approx_eq(bounds, Rect::from_size(Size::new(40.0, 20.0)), 0.01, "item");
    assert!(!rule.find_by_key("missing").exists());
    assert!(!rule.find_by_key("missing").click().unwrap());
}

/// Bumps a counter every time it is measured.
struct Restless(MutableValue<u32>);

impl Widget for Restless {
    fn layout(
        &self,
        constraints: Constraints,
        _children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        self.0.update(|value| *value += 1);
        let (width, height) = constraints.constrain(0.0, 0.0);
        Ok(Size::new(width, height))
    }
}

#[test]
fn layout_writes_keep_the_loop_busy_until_the_settle_limit() {
    let mut rule = ComposeTestRule::new(10.0, 10.0);
    rule.set_content(|composer| {
        composer.block("restless", |composer| {
            let measured = composer.state("measured", || 0u32)?;
            composer.set_widget_constructor(WidgetConstructor::new(move |_| {
                Rc::new(Restless(measured.clone())) as Rc<dyn Widget>
            }))
        })
    })
    .unwrap();

    assert_eq!(rule.frame_count(), 1 + MAX_SETTLE_FRAMES as u64);
    assert!(rule.composition().is_dirty());
}

#[test]
fn writes_during_composition_do_not_schedule_another_frame() {
    let mut rule = ComposeTestRule::new(10.0, 10.0);
    rule.set_content(|composer| {
        composer.block("ticker", |composer| {
            let ticks = composer.state("ticks", || 0u32)?;
            ticks.update(|value| *value += 1);
            Ok(())
        })
    })
    .unwrap();

    assert_eq!(rule.frame_count(), 1);
    assert!(!rule.composition().is_dirty());
}

#[test]
fn drag_delivers_down_move_up() {
    let mut rule = ComposeTestRule::new(100.0, 50.0);
    rule.set_content(counter).unwrap();

    rule.drag(Point::new(1.0, 1.0), Point::new(2.0, 2.0)).unwrap();
    assert_eq!(rule.texts(), vec!["1".to_string()]);
}

#[test]
fn draw_commands_come_from_the_latest_frame() {
    let mut rule = ComposeTestRule::new(100.0, 50.0);
    rule.set_content(counter).unwrap();
    rule.click_at(1.0, 1.0).unwrap();

    let texts: Vec<_> = rule
        .draw_commands()
        .iter()
        .filter(|command| matches!(command, DrawCommand::Text { .. }))
        .collect();
    assert_eq!(texts.len(), 1);
    assert_balanced(rule.draw_commands());
}

#[test]
#[should_panic(expected = "unmatched PopClip")]
fn assert_balanced_rejects_stray_pops() {
    assert_balanced(&[DrawCommand::PopClip]);
}
