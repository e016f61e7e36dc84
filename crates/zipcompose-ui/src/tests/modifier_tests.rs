use crate::modifier::{BorderStroke, ModifierExt};
use std::cell::RefCell;
use std::rc::Rc;
use zipcompose_core::layout_node::{DrawCommand, PointerEvent};
use zipcompose_core::{ComposeResult, Composer, Composition, Modifier};
use zipcompose_ui_graphics::{Color, Constraints, Point, Rect, Shape, Size};

fn sized_box(composer: &Composer, modifier: Modifier) -> ComposeResult {
    crate::widgets::Box(composer, modifier, Default::default(), |_| Ok(()))
}

fn render(modifier: Modifier) -> (Composition, Vec<DrawCommand>) {
    let mut composition = Composition::new();
    composition
        .render(move |composer| sized_box(composer, modifier.clone()))
        .unwrap();
    let scope = composition.frame(Constraints::loose(200.0, 200.0)).unwrap();
    (composition, scope.into_commands())
}

fn box_bounds(composition: &Composition) -> Rect {
    let handle = {
        let tree = composition.tree();
        let found = tree
            .handles()
            .into_iter()
            .find(|handle| tree.get(*handle).and_then(|node| node.key()) == Some("Box"));
        found.unwrap()
    };
    composition.bounds_of(handle).unwrap()
}

#[test]
fn padding_grows_the_node_around_its_content() {
    let (composition, commands) =
        render(Modifier::empty().background(Color::RED).padding(4.0).size(10.0, 6.0));

    assert_eq!(box_bounds(&composition), Rect::new(0.0, 0.0, 18.0, 14.0));
    assert_eq!(
        commands,
        vec![DrawCommand::Fill {
            rect: Rect::new(0.0, 0.0, 18.0, 14.0),
            color: Color::RED,
            shape: Shape::Rectangle,
        }]
    );
}

#[test]
fn background_after_padding_covers_only_the_content() {
    let (_composition, commands) =
        render(Modifier::empty().padding_each(1.0, 2.0, 3.0, 4.0).background(Color::BLUE).size(10.0, 10.0));

    assert_eq!(
        commands,
        vec![DrawCommand::Fill {
            rect: Rect::new(1.0, 2.0, 10.0, 10.0),
            color: Color::BLUE,
            shape: Shape::Rectangle,
        }]
    );
}

#[test]
fn size_is_clamped_to_incoming_constraints() {
    let mut composition = Composition::new();
    composition
        .render(|composer| sized_box(composer, Modifier::empty().size(500.0, 20.0)))
        .unwrap();
    composition.layout(Constraints::loose(100.0, 100.0)).unwrap();

    assert_eq!(box_bounds(&composition), Rect::new(0.0, 0.0, 100.0, 20.0));
}

#[test]
fn width_only_leaves_height_to_content() {
    let (composition, _) = render(Modifier::empty().width(30.0).padding_symmetric(0.0, 5.0));

    assert_eq!(box_bounds(&composition).size(), Size::new(30.0, 10.0));
}

#[test]
fn offset_moves_content_without_resizing() {
    let (composition, commands) =
        render(Modifier::empty().size(20.0, 20.0).offset(5.0, 7.0).background(Color::GREEN));

    assert_eq!(box_bounds(&composition).size(), Size::new(20.0, 20.0));
    assert_eq!(
        commands,
        vec![DrawCommand::Fill {
            rect: Rect::new(5.0, 7.0, 20.0, 20.0),
            color: Color::GREEN,
            shape: Shape::Rectangle,
        }]
    );
}

#[test]
fn clip_scale_and_border_wrap_the_content() {
    let shape = Shape::rounded(4.0);
    let (_composition, commands) = render(
        Modifier::empty()
            .size(20.0, 10.0)
            .clip(shape)
            .scale(2.0)
            .border(BorderStroke::new(1.0, Color::BLACK), shape),
    );
    let bounds = Rect::new(0.0, 0.0, 20.0, 10.0);

    assert_eq!(
        commands,
        vec![
            DrawCommand::PushClip { rect: bounds, shape },
            DrawCommand::PushScale {
                pivot: Point::new(10.0, 5.0),
                scale_x: 2.0,
                scale_y: 2.0,
            },
            DrawCommand::Stroke {
                rect: bounds,
                width: 1.0,
                color: Color::BLACK,
                shape,
            },
            DrawCommand::PopTransform,
            DrawCommand::PopClip,
        ]
    );
}

#[test]
fn zero_width_border_draws_nothing() {
    let (_composition, commands) = render(
        Modifier::empty()
            .size(5.0, 5.0)
            .border(BorderStroke::new(0.0, Color::BLACK), Shape::Rectangle),
    );
    assert!(commands.is_empty());
}

#[test]
fn clickable_fires_on_release_with_local_position() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicks);
    let modifier = Modifier::empty()
        .padding(10.0)
        .clickable(move |at| sink.borrow_mut().push(at))
        .size(20.0, 20.0);
    let (composition, _) = render(modifier);

    composition.dispatch_pointer(PointerEvent::down(15.0, 12.0)).unwrap();
    assert!(clicks.borrow().is_empty());
    composition.dispatch_pointer(PointerEvent::up(15.0, 12.0)).unwrap();

    assert_eq!(*clicks.borrow(), vec![Point::new(5.0, 2.0)]);
}

#[test]
fn clickable_ignores_release_without_press() {
    let clicks = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&clicks);
    let (composition, _) =
        render(Modifier::empty().size(20.0, 20.0).clickable(move |_| *sink.borrow_mut() += 1));

    let consumed = composition.dispatch_pointer(PointerEvent::up(5.0, 5.0)).unwrap();
    assert!(consumed.is_none());
    assert_eq!(*clicks.borrow(), 0);
}

#[test]
fn clickable_elements_compare_by_handler_identity() {
    let handler: crate::ClickHandler = Rc::new(|_| {});
    let first = Modifier::empty().clickable_handler(Rc::clone(&handler));
    let second = Modifier::empty().clickable_handler(Rc::clone(&handler));
    let other = Modifier::empty().clickable(|_| {});

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn inspector_describes_each_element() {
    let modifier = Modifier::empty().padding(2.0).size(3.0, 4.0).clickable(|_| {});
    let names: Vec<_> = modifier.inspect().into_iter().map(|info| info.name).collect();

    assert_eq!(names, vec!["padding", "size", "clickable"]);
    assert!(modifier.to_string().contains("paddingLeft=2"));
}
