use zipcompose_core::layout_node::PointerEvent;
use zipcompose_testing::prelude::*;
use zipcompose_ui::prelude::*;

fn two_buttons(composer: &Composer) -> ComposeResult {
    let a = composer.state("a", || 0)?;
    let b = composer.state("b", || 0)?;
    Column(composer, Modifier::empty(), ColumnSpec::new(), |composer| {
        Text(composer, &format!("a={} b={}", a.get(), b.get()), Modifier::empty())?;
        Row(composer, Modifier::empty(), RowSpec::new(), |composer| {
            composer.block("a", |composer| {
                let a = a.clone();
                Button(composer, Modifier::empty(), move |_| a.update(|n| *n += 1), |composer| {
                    Text(composer, "a", Modifier::empty())
                })
            })?;
            composer.block("b", |composer| {
                let b = b.clone();
                Button(composer, Modifier::empty(), move |_| b.update(|n| *n += 1), |composer| {
                    Text(composer, "b", Modifier::empty())
                })
            })
        })
    })
}

fn center_of(rule: &mut ComposeTestRule, key: &str) -> Point {
    rule.find_by_key(key)
        .center()
        .unwrap_or_else(|| panic!("no node keyed `{key}`"))
}

#[test]
fn press_released_elsewhere_does_not_click_later() {
    let mut rule = ComposeTestRule::new(200.0, 100.0);
    rule.set_content(two_buttons).unwrap();
    let a = center_of(&mut rule, "a");
    let b = center_of(&mut rule, "b");

    rule.send(PointerEvent::down(a.x, a.y)).unwrap();
    rule.send(PointerEvent::up(190.0, 90.0)).unwrap();
    rule.send(PointerEvent::down(b.x, b.y)).unwrap();
    rule.send(PointerEvent::up(a.x, a.y)).unwrap();
    rule.wait_for_idle().unwrap();

    assert_contains_text(&rule.texts(), "a=0 b=0", "no click completed");
}

#[test]
fn release_goes_to_the_pressed_button_wherever_it_lands() {
    let mut rule = ComposeTestRule::new(200.0, 100.0);
    rule.set_content(two_buttons).unwrap();
    let a = center_of(&mut rule, "a");
    let b = center_of(&mut rule, "b");
    let pressed = rule.send(PointerEvent::down(a.x, a.y)).unwrap();
    assert!(pressed.is_some());

    let released = rule.send(PointerEvent::up(b.x, b.y)).unwrap();
    assert_eq!(released, pressed);
    rule.wait_for_idle().unwrap();
    assert_contains_text(&rule.texts(), "a=0 b=0", "release outside the pressed button");

    rule.find_by_key("b").click().unwrap();
    assert_contains_text(&rule.texts(), "a=0 b=1", "plain click still works");
}

#[test]
fn new_press_cancels_the_unfinished_one() {
    let mut rule = ComposeTestRule::new(200.0, 100.0);
    rule.set_content(two_buttons).unwrap();
    let a = center_of(&mut rule, "a");
    let b = center_of(&mut rule, "b");

    rule.send(PointerEvent::down(a.x, a.y)).unwrap();
    rule.send(PointerEvent::down(b.x, b.y)).unwrap();
    rule.send(PointerEvent::up(b.x, b.y)).unwrap();
    rule.send(PointerEvent::up(a.x, a.y)).unwrap();
    rule.wait_for_idle().unwrap();

    assert_contains_text(&rule.texts(), "a=0 b=1", "only the second press clicks");
}
