use crate::composable;
use crate::test_support::{leaf, stack};
use crate::{
    ComposeError, ComposeResult, Composer, ComposerConfig, Composition, Identifier,
    MutableValue, PersistentState, ReconcileOutcome,
};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use zipcompose_ui_graphics::Constraints;

fn keyed_ids(composition: &Composition) -> Vec<(String, Identifier)> {
    let tree = composition.tree();
    let ids = tree
        .handles()
        .into_iter()
        .filter_map(|handle| tree.get(handle))
        .map(|node| (node.key().unwrap_or_default().to_owned(), node.id()))
        .collect();
    ids
}

fn id_of(composition: &Composition, key: &str) -> Option<Identifier> {
    let tree = composition.tree();
    let id = tree
        .find_by_key(key)
        .and_then(|handle| tree.get(handle))
        .map(|node| node.id());
    id
}

fn two_leaves(composer: &Composer) -> ComposeResult {
    stack(composer, "column", |composer| {
        leaf(composer, "a", 1.0, 1.0)?;
        leaf(composer, "b", 1.0, 1.0)
    })
}

#[test]
fn identifiers_are_stable_across_frames() {
    let mut composition = Composition::new();
    let stats = composition.render(two_leaves).unwrap();
    assert_eq!(stats.created, 4);
    let first = keyed_ids(&composition);
    let distinct: HashSet<Identifier> = first.iter().map(|(_, id)| *id).collect();
    assert_eq!(distinct.len(), 4);

    let stats = composition.render(two_leaves).unwrap();
    assert_eq!(keyed_ids(&composition), first);
    assert_eq!(stats.created, 0);
    assert_eq!(stats.updated, 4);
    assert_eq!(stats.moved, 0);
    assert_eq!(stats.pruned, 0);
}

#[test]
fn state_survives_recomposition() {
    let mut composition = Composition::new();
    let mut seen = Vec::new();
    for _ in 0..3 {
        composition
            .render(|composer| {
                composer.block("counter", |composer| {
                    let count = composer.state("count", || 0)?;
                    seen.push(count.get());
                    count.set(count.get() + 1);
                    Ok(())
                })
            })
            .unwrap();
        assert!(!composition.is_dirty());
    }
    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(composition.store().len(), 1);
}

fn branchy(flag: bool, observed: &Cell<i32>) -> impl FnOnce(&Composer) -> ComposeResult + '_ {
    move |composer| {
        composer.if_else(
            flag,
            |composer| {
                composer.block("yes", |composer| {
                    let value = composer.state("value", || 1)?;
                    observed.set(value.get());
                    value.set(5);
                    Ok(())
                })
            },
            |composer| composer.block("no", |_| Ok(())),
        )?;
        composer.block("after", |_| Ok(()))
    }
}

#[test]
fn switching_branches_drops_the_other_arm() {
    let observed = Cell::new(0);
    let mut composition = Composition::new();

    composition.render(branchy(true, &observed)).unwrap();
    assert_eq!(observed.get(), 1);
    composition.render(branchy(true, &observed)).unwrap();
    assert_eq!(observed.get(), 5);
    let yes = id_of(&composition, "yes").unwrap();
    let after = id_of(&composition, "after").unwrap();

    let stats = composition.render(branchy(false, &observed)).unwrap();
    assert_eq!(id_of(&composition, "yes"), None);
    let no = id_of(&composition, "no").unwrap();
    assert_ne!(no, yes);
    assert_eq!(id_of(&composition, "after"), Some(after));
    assert_eq!(stats.pruned, 1);
    assert!(composition.store().is_empty());

    composition.render(branchy(true, &observed)).unwrap();
    assert_eq!(observed.get(), 1);
    assert_eq!(id_of(&composition, "yes"), Some(yes));
}

fn counted_block(name: &'static str, runs: &Rc<Cell<i32>>) -> composable::Composable {
    let runs = Rc::clone(runs);
    composable::composable(move |composer| {
        composer.block(name, |composer| {
            runs.set(runs.get() + 1);
            composer.state(&format!("{name}_value"), || 0).map(|_| ())
        })
    })
}

#[test]
fn untaken_branch_never_creates_its_state() {
    let taken = Rc::new(Cell::new(0));
    let untaken = Rc::new(Cell::new(0));
    let then = counted_block("taken", &taken);
    let otherwise = counted_block("untaken", &untaken);
    let mut composition = Composition::new();

    composition
        .render(|composer| composer.if_else(true, |c| then(c), |c| otherwise(c)))
        .unwrap();
    let built = composable::if_else(true, then.clone(), otherwise.clone());
    composition
        .render(|composer| composer.with_composable(&built))
        .unwrap();

    assert_eq!((taken.get(), untaken.get()), (2, 0));
    assert_eq!(id_of(&composition, "untaken"), None);
    let keys = composition.store().keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].ends_with("/taken_value"));
    assert!(!keys.iter().any(|key| key.ends_with("/untaken_value")));
}

fn child_keys(composition: &Composition) -> Vec<String> {
    keyed_ids(composition)
        .into_iter()
        .skip(1)
        .map(|(key, _)| key)
        .collect()
}

#[test]
fn sequence_composes_left_to_right() {
    let parts = || {
        vec![
            composable::block("first", composable::empty()),
            composable::block("second", composable::empty()),
            composable::block("third", composable::empty()),
        ]
    };
    let mut composition = Composition::new();
    composition
        .render(|composer| composer.sequence(&parts()))
        .unwrap();
    assert_eq!(child_keys(&composition), ["first", "second", "third"]);
    let ids = keyed_ids(&composition);

    let built = composable::sequence(parts());
    let stats = composition
        .render(|composer| composer.with_composable(&built))
        .unwrap();
    assert_eq!(keyed_ids(&composition), ids);
    assert_eq!(stats.created, 0);
}

#[test]
fn range_visits_indices_in_order() {
    let mut visited = Vec::new();
    let mut composition = Composition::new();
    composition
        .render(|composer| {
            composer.range(4, |composer, index| {
                visited.push(index);
                composer.block(&format!("row{index}"), |_| Ok(()))
            })
        })
        .unwrap();
    assert_eq!(visited, [0, 1, 2, 3]);
    assert_eq!(child_keys(&composition), ["row0", "row1", "row2", "row3"]);
    let ids = keyed_ids(&composition);

    let built = composable::range(4, |index| {
        composable::block(format!("row{index}"), composable::empty())
    });
    let stats = composition
        .render(|composer| composer.with_composable(&built))
        .unwrap();
    assert_eq!(keyed_ids(&composition), ids);
    assert_eq!(stats.created, 0);

    let stats = composition
        .render(|composer| composer.range(0, |_, _| unreachable!()))
        .unwrap();
    assert!(child_keys(&composition).is_empty());
    assert_eq!(stats.pruned, 4);
}

#[test]
fn otherwise_runs_only_when_the_condition_is_false() {
    let runs = Rc::new(Cell::new(0));
    let fallback = counted_block("fallback", &runs);
    let mut composition = Composition::new();

    composition
        .render(|composer| composer.otherwise(true, |c| fallback(c)))
        .unwrap();
    let built = composable::otherwise(true, fallback.clone());
    composition
        .render(|composer| composer.with_composable(&built))
        .unwrap();
    assert_eq!(runs.get(), 0);
    assert_eq!(id_of(&composition, "fallback"), None);

    composition
        .render(|composer| composer.otherwise(false, |c| fallback(c)))
        .unwrap();
    let built = composable::otherwise(false, fallback.clone());
    composition
        .render(|composer| composer.with_composable(&built))
        .unwrap();
    assert_eq!(runs.get(), 2);
    assert!(id_of(&composition, "fallback").is_some());
}

fn compose_items(
    composer: &Composer,
    items: &[&str],
    keyed: bool,
    out: &mut Vec<String>,
) -> ComposeResult {
    for item in items {
        let mut item_block = |composer: &Composer| {
            composer.block("item", |composer| {
                let label = composer.state("label", || item.to_string())?;
                out.push(label.get());
                Ok(())
            })
        };
        if keyed {
            composer.key(*item, item_block)?;
        } else {
            item_block(composer)?;
        }
    }
    Ok(())
}

#[test]
fn keyed_items_carry_state_when_reordered() {
    let mut composition = Composition::new();
    let mut out = Vec::new();
    composition
        .render(|composer| compose_items(composer, &["a", "b", "c"], true, &mut out))
        .unwrap();
    assert_eq!(out, ["a", "b", "c"]);

    out.clear();
    let stats = composition
        .render(|composer| compose_items(composer, &["c", "b", "a"], true, &mut out))
        .unwrap();
    assert_eq!(out, ["c", "b", "a"]);
    assert_eq!(stats.created, 0);
    assert_eq!(stats.moved, 2);
    assert_eq!(stats.pruned, 0);

    let tree = composition.tree();
    let root = tree.root().unwrap();
    let outcomes: Vec<ReconcileOutcome> = tree
        .children(root)
        .iter()
        .map(|handle| tree.get(*handle).unwrap().outcome())
        .collect();
    assert_eq!(
        outcomes,
        [
            ReconcileOutcome::Moved,
            ReconcileOutcome::Updated,
            ReconcileOutcome::Moved
        ]
    );
}

#[test]
fn unkeyed_items_keep_state_by_position() {
    let mut composition = Composition::new();
    let mut out = Vec::new();
    composition
        .render(|composer| compose_items(composer, &["a", "b", "c"], false, &mut out))
        .unwrap();

    out.clear();
    let stats = composition
        .render(|composer| compose_items(composer, &["c", "b", "a"], false, &mut out))
        .unwrap();
    assert_eq!(out, ["a", "b", "c"]);
    assert_eq!(stats.moved, 0);
}

#[test]
fn pruned_node_starts_over() {
    let mut composition = Composition::new();
    let mut first: Option<MutableValue<i32>> = None;
    let mut compose = |include: bool, first: &mut Option<MutableValue<i32>>| {
        composition.render(|composer| {
            leaf(composer, "a", 1.0, 1.0)?;
            if include {
                composer.block("temp", |composer| {
                    let value = composer.state("value", || 1)?;
                    if first.is_none() {
                        value.set(10);
                        *first = Some(value);
                    } else {
                        assert_eq!(value.get(), 1);
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })
    };

    compose(true, &mut first).unwrap();
    let stats = compose(false, &mut first).unwrap();
    assert_eq!(stats.pruned, 1);

    let stale = first.clone().unwrap();
    assert!(stale.is_disposed());
    stale.set(42);

    compose(true, &mut first).unwrap();
}

#[test]
fn writes_to_pruned_state_are_ignored() {
    let mut composition = Composition::new();
    let mut handle = None;
    composition
        .render(|composer| {
            composer.block("temp", |composer| {
                handle = Some(composer.state("value", || 0)?);
                Ok(())
            })
        })
        .unwrap();
    composition.render(|_| Ok(())).unwrap();

    let handle = handle.unwrap();
    assert!(handle.is_disposed());
    handle.set(3);
    assert!(!composition.is_dirty());
    assert!(composition.store().is_empty());
}

#[test]
fn remember_keeps_the_same_value() {
    let mut composition = Composition::new();
    let mut lengths = Vec::new();
    for _ in 0..2 {
        composition
            .render(|composer| {
                composer.block("memo", |composer| {
                    let list = composer.remember("list", Vec::<u32>::new)?;
                    list.update(|list| list.push(1));
                    lengths.push(list.with(Vec::len));
                    Ok(())
                })
            })
            .unwrap();
    }
    assert_eq!(lengths, [1, 2]);
    assert!(composition.store().is_empty());
}

#[test]
fn remember_with_another_type_is_an_error() {
    let mut composition = Composition::new();
    let err = composition
        .render(|composer| {
            composer.block("memo", |composer| {
                composer.remember("slot", || 1u32)?;
                composer.remember("slot", String::new)?;
                Ok(())
            })
        })
        .unwrap_err();
    assert!(matches!(err, ComposeError::TypeMismatch { ref key, .. } if key == "slot"));
    assert!(composition.tree().is_empty());
    assert_eq!(composition.root(), None);
}

#[test]
fn state_with_another_type_is_an_error() {
    let mut composition = Composition::new();
    let err = composition
        .render(|composer| {
            composer.block("cell", |composer| {
                composer.state("n", || 1)?;
                composer.state("n", String::new)?;
                Ok(())
            })
        })
        .unwrap_err();
    assert!(matches!(err, ComposeError::TypeMismatch { ref key, .. } if key.ends_with("/n")));
    assert!(composition.store().is_empty());
}

#[test]
fn failed_frame_is_followed_by_a_fresh_one() {
    let mut composition = Composition::new();
    composition.render(two_leaves).unwrap();
    let err = composition
        .render(|composer| {
            two_leaves(composer)?;
            Err(ComposeError::NotComposed)
        })
        .unwrap_err();
    assert_eq!(err, ComposeError::NotComposed);
    assert!(composition.tree().is_empty());

    let stats = composition.render(two_leaves).unwrap();
    assert_eq!(stats.created, 4);
}

#[test]
fn composer_outside_a_frame_refuses_work() {
    let composer = Composer::new(PersistentState::new(), ComposerConfig::default());
    assert_eq!(composer.start_block("x"), Err(ComposeError::UnscopedIdentity));
    assert_eq!(composer.id(), Err(ComposeError::NotComposed));
    assert!(matches!(
        composer.state("s", || 0),
        Err(ComposeError::NotComposed)
    ));
    assert_eq!(composer.emit_slot("x", 1), Err(ComposeError::NotComposed));
    assert!(!composer.is_composing());
}

#[test]
fn path_follows_open_blocks() {
    let mut composition = Composition::new();
    let mut observed = None;
    composition
        .render(|composer| {
            composer.block("outer", |composer| {
                leaf(composer, "first", 1.0, 1.0)?;
                composer.block("inner", |composer| {
                    observed = Some((composer.depth(), composer.path(), composer.id()?));
                    Ok(())
                })
            })
        })
        .unwrap();
    let (depth, path, id) = observed.unwrap();
    assert_eq!(depth, 3);
    assert_eq!(path.len(), 3);
    assert_eq!(path.segments()[0], (Identifier::ROOT, 0));
    assert_eq!(path.segments()[2].0, id_of(&composition, "outer").unwrap());
    assert_eq!(path.segments()[2].1, 1);
    assert_eq!(Some(id), id_of(&composition, "inner"));
    assert!(path.to_string().starts_with('/'));
}

#[test]
fn key_changes_replace_the_node() {
    let mut composition = Composition::new();
    composition
        .render(|composer| composer.block("text", |_| Ok(())))
        .unwrap();
    let stats = composition
        .render(|composer| composer.block("image", |_| Ok(())))
        .unwrap();
    assert_eq!(stats.created, 1);
    assert_eq!(stats.pruned, 1);
    assert_eq!(id_of(&composition, "text"), None);
}

#[test]
fn dump_shows_keys_and_slots() {
    let mut composition = Composition::new();
    composition
        .render(|composer| {
            stack(composer, "column", |composer| {
                composer.emit_slot("spacing", 8)?;
                leaf(composer, "a", 2.0, 3.0)
            })
        })
        .unwrap();
    composition.layout(Constraints::loose(100.0, 100.0)).unwrap();
    let dump = composition.dump_tree();
    assert!(dump.starts_with("root #"), "{dump}");
    assert!(dump.contains("\n  column #"), "{dump}");
    assert!(dump.contains("slots={spacing: 8}"), "{dump}");
    assert!(dump.contains("\n    a #"), "{dump}");
    assert!(dump.contains("2x3 @(0, 0)"), "{dump}");
}

#[test]
#[should_panic(expected = "identity collision")]
fn duplicate_keys_under_one_parent_panic() {
    let mut composition = Composition::new();
    let _ = composition.render(|composer| {
        composer.key("dup", |composer| composer.block("x", |_| Ok(())))?;
        composer.key("dup", |composer| composer.block("x", |_| Ok(())))
    });
}

#[test]
#[should_panic(expected = "left open")]
fn unclosed_block_panics() {
    let mut composition = Composition::new();
    let _ = composition.render(|composer| composer.start_block("dangling"));
}

#[test]
#[should_panic(expected = "without a matching start_block")]
fn extra_end_block_panics() {
    let mut composition = Composition::new();
    let _ = composition.render(|composer| {
        composer.end_block();
        Ok(())
    });
}

fn nest(composer: &Composer, remaining: usize) -> ComposeResult {
    if remaining == 0 {
        return Ok(());
    }
    composer.block("level", |composer| nest(composer, remaining - 1))
}

#[test]
#[should_panic(expected = "nested deeper")]
fn runaway_nesting_panics() {
    let mut composition = Composition::with_config(ComposerConfig {
        max_depth: 4,
        ..ComposerConfig::default()
    });
    let _ = composition.render(|composer| nest(composer, 10));
}
