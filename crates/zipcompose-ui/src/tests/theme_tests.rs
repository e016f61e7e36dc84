use crate::modifier::BorderStroke;
use crate::theme::{
    current_theme, local_content_color, local_density, local_theme_manager, SurfaceStyle, Theme,
    ThemeManager,
};
use crate::widgets::{Surface, Text};
use std::thread;
use zipcompose_core::layout_node::DrawCommand;
use zipcompose_core::{CompositionLocalProvider, Composition, Modifier};
use zipcompose_ui_graphics::{Color, Constraints, Dp, Shape, TakeOrElse};

#[test]
fn surface_style_fills_only_missing_fields() {
    let theme = Theme::light();
    let style = SurfaceStyle::default()
        .color(Color::RED)
        .take_or_else(|| theme.surface_style(2.0));

    assert_eq!(style.color, Some(Color::RED));
    assert_eq!(style.content_color, Some(theme.on_surface));
    assert_eq!(style.border, Some(BorderStroke::new(2.0, theme.outline)));
    assert_eq!(style.shape, Some(Shape::rounded(8.0)));
}

#[test]
fn theme_manager_is_shared_across_threads() {
    let manager = ThemeManager::new(Theme::light());
    let remote = manager.clone();

    thread::spawn(move || remote.update(|theme| theme.spacing = Dp(12.0)))
        .join()
        .unwrap();

    assert_eq!(manager.current().spacing, Dp(12.0));
    manager.set(Theme::dark());
    assert_eq!(manager.current(), Theme::dark());
}

#[test]
fn theme_manager_recovers_from_a_poisoned_lock() {
    let manager = ThemeManager::new(Theme::light());
    let remote = manager.clone();

    let outcome = thread::spawn(move || {
        remote.update(|_| panic!("writer died"));
    })
    .join();

    assert!(outcome.is_err());
    assert_eq!(manager.current(), Theme::light());
}

#[test]
fn root_binding_selects_the_theme() {
    let mut composition = Composition::new();
    let manager = ThemeManager::new(Theme::dark());
    composition.provide_root(local_theme_manager().provides(manager.clone()));

    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = seen.clone();
    let content = move |composer: &zipcompose_core::Composer| {
        sink.borrow_mut().push(current_theme(composer).surface);
        Ok(())
    };

    composition.render(&content).unwrap();
    manager.set(Theme::light());
    composition.render(&content).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![Theme::dark().surface, Theme::light().surface]
    );
}

#[test]
fn surface_paints_with_the_theme_and_provides_content_color() {
    let mut composition = Composition::new();
    composition.provide_root(local_theme_manager().provides(ThemeManager::new(Theme::dark())));
    composition
        .render(|composer| {
            CompositionLocalProvider(composer, [local_density().provides(2.0)], |composer| {
                Surface(composer, Modifier::empty(), SurfaceStyle::default(), |composer| {
                    Text(composer, "hi", Modifier::empty())
                })?;
                Text(composer, "outside", Modifier::empty())
            })
        })
        .unwrap();
    let commands = composition
        .frame(Constraints::loose(200.0, 200.0))
        .unwrap()
        .into_commands();

    let theme = Theme::dark();
    let shape = Shape::rounded(8.0);
    assert!(matches!(
        commands[0],
        DrawCommand::PushClip { shape: clip, .. } if clip == shape
    ));
    assert!(matches!(
        commands[1],
        DrawCommand::Fill { color, .. } if color == theme.surface
    ));
    let text_colors: Vec<_> = commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, color, .. } => Some((text.as_str(), *color)),
            _ => None,
        })
        .collect();
    assert_eq!(
        text_colors,
        vec![("hi", theme.on_surface), ("outside", Color::BLACK)]
    );
    assert!(commands.iter().any(|command| matches!(
        command,
        DrawCommand::Stroke { width, color, .. } if *width == 2.0 && *color == theme.outline
    )));
}

#[test]
fn explicit_content_color_overrides_the_theme() {
    let mut composition = Composition::new();
    composition
        .render(|composer| {
            let style = SurfaceStyle::default().content_color(Color::RED);
            Surface(composer, Modifier::empty(), style, |composer| {
                assert_eq!(local_content_color().current(composer), Color::RED);
                Ok(())
            })?;
            assert_eq!(local_content_color().current(composer), Color::BLACK);
            Ok(())
        })
        .unwrap();
}
