//! Combinators that build composables as values.
//!
//! These mirror the [`Composer`] control-flow methods for code that assembles
//! a tree out of reusable pieces before running it. Conditions are captured
//! when the combinator is built.

use crate::composer::Composer;
use crate::error::ComposeResult;
use std::hash::Hash;
use std::rc::Rc;

/// A unit of UI: called once per frame with the composer.
pub type Composable = Rc<dyn Fn(&Composer) -> ComposeResult>;

pub fn composable(content: impl Fn(&Composer) -> ComposeResult + 'static) -> Composable {
    Rc::new(content)
}

pub fn empty() -> Composable {
    Rc::new(|_| Ok(()))
}

/// Wraps `content` in a block named `key`.
pub fn block(key: impl Into<String>, content: Composable) -> Composable {
    let key = key.into();
    Rc::new(move |composer| composer.block(&key, |composer| content(composer)))
}

pub fn sequence(contents: impl IntoIterator<Item = Composable>) -> Composable {
    let contents: Vec<Composable> = contents.into_iter().collect();
    Rc::new(move |composer| composer.sequence(&contents))
}

pub fn if_else(condition: bool, then: Composable, otherwise: Composable) -> Composable {
    Rc::new(move |composer| {
        composer.if_else(condition, |c| then(c), |c| otherwise(c))
    })
}

pub fn when(condition: bool, content: Composable) -> Composable {
    Rc::new(move |composer| composer.when(condition, |c| content(c)))
}

/// Runs `content` only when `condition` is false.
pub fn otherwise(condition: bool, content: Composable) -> Composable {
    Rc::new(move |composer| composer.otherwise(condition, |c| content(c)))
}

pub fn key<K: Hash + 'static>(key: K, content: Composable) -> Composable {
    Rc::new(move |composer| composer.key(&key, |c| content(c)))
}

pub fn range(count: usize, item: impl Fn(usize) -> Composable + 'static) -> Composable {
    Rc::new(move |composer| composer.range(count, |c, index| item(index)(c)))
}
