#![allow(non_snake_case)]

use std::hash::Hash;
use std::rc::Rc;
use zipcompose_core::layout_node::{Widget, WidgetConstructor};
use zipcompose_core::{ComposeResult, Composer, Modifier};

/// Opens a block named `name` laid out by `policy`.
///
/// The policy doubles as the widget's cache key: the node keeps its built
/// widget for as long as an equal policy is passed in.
pub fn Layout<P>(
    composer: &Composer,
    name: &str,
    modifier: Modifier,
    policy: P,
    content: impl FnOnce(&Composer) -> ComposeResult,
) -> ComposeResult
where
    P: Widget + Hash + Clone + 'static,
{
    composer.block(name, |composer| {
        composer.set_modifier(modifier)?;
        composer.set_widget_constructor(WidgetConstructor::with_inputs(&policy, {
            let policy = policy.clone();
            move |_| Rc::new(policy.clone()) as Rc<dyn Widget>
        }))?;
        content(composer)
    })
}
