#![allow(non_snake_case)]

use zipcompose_ui::prelude::*;
use zipcompose_ui::{current_theme, local_theme_manager};

/// Counter with increment/decrement buttons, a theme switch and a history
/// panel that only exists while the count is positive.
pub fn counter_app(composer: &Composer) -> ComposeResult {
    let count = composer.state("count", || 0i32)?;
    // Bumped whenever the theme is swapped so a frame gets scheduled.
    let theme_generation = composer.state("theme_generation", || 0u32)?;
    let theme = current_theme(composer);

    Surface(
        composer,
        Modifier::empty().padding(theme.spacing.0),
        SurfaceStyle::default().color(theme.background),
        |composer| {
            Column(
                composer,
                Modifier::empty(),
                ColumnSpec::new()
                    .vertical_arrangement(LinearArrangement::spaced_by(theme.spacing.0))
                    .horizontal_alignment(HorizontalAlignment::CenterHorizontally),
                |composer| {
                    Text(composer, &format!("Count: {}", count.get()), Modifier::empty())?;
                    Row(
                        composer,
                        Modifier::empty(),
                        RowSpec::new().horizontal_arrangement(LinearArrangement::spaced_by(4.0)),
                        |composer| {
                            CounterButton(composer, "decrement", "-", {
                                let count = count.clone();
                                move || count.update(|value| *value -= 1)
                            })?;
                            CounterButton(composer, "increment", "+", {
                                let count = count.clone();
                                move || count.update(|value| *value += 1)
                            })?;
                            let manager = local_theme_manager().current(composer);
                            CounterButton(composer, "theme", "theme", {
                                let generation = theme_generation.clone();
                                move || {
                                    manager.update(|theme| {
                                        *theme = if theme.background == Theme::dark().background {
                                            Theme::light()
                                        } else {
                                            Theme::dark()
                                        };
                                    });
                                    generation.update(|value| *value += 1);
                                }
                            })
                        },
                    )?;
                    let current = count.get();
                    composer.when(current > 0, |composer| History(composer, current))
                },
            )
        },
    )
}

fn CounterButton(
    composer: &Composer,
    key: &str,
    label: &str,
    on_click: impl Fn() + 'static,
) -> ComposeResult {
    composer.block(key, |composer| {
        Button(composer, Modifier::empty(), move |_| on_click(), |composer| {
            Text(composer, label, Modifier::empty())
        })
    })
}

/// Tracks the highest count seen while it stays on screen.
fn History(composer: &Composer, count: i32) -> ComposeResult {
    composer.block("history", |composer| {
        let peak = composer.remember("peak", || 0i32)?;
        let peak = peak.update(|peak| {
            *peak = (*peak).max(count);
            *peak
        });
        Text(
            composer,
            &format!("peak {peak}"),
            Modifier::empty().border(BorderStroke::new(1.0, Color::BLACK), Shape::Rectangle),
        )
    })
}
