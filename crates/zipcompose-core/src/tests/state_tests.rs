use crate::{ComposeError, Owned, PersistentState};
use std::cell::Cell;
use std::rc::Rc;

fn counting(store: &PersistentState) -> Rc<Cell<usize>> {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    store.set_on_state_change(move || counter.set(counter.get() + 1));
    calls
}

#[test]
fn get_state_initializes_once() {
    let store = PersistentState::new();
    let inits = Cell::new(0);
    let init = || {
        inits.set(inits.get() + 1);
        7
    };
    let first = store.get_state("a", init).unwrap();
    let second = store.get_state("a", init).unwrap();
    assert_eq!(inits.get(), 1);
    assert_eq!(first, second);
    assert_eq!(second.get(), 7);
    assert_eq!(first.key(), "a");
}

#[test]
fn requesting_another_type_fails() {
    let store = PersistentState::new();
    store.get_state("a", || 1u8).unwrap();
    let err = store.get_state("a", || "one".to_string()).unwrap_err();
    assert_eq!(
        err,
        ComposeError::TypeMismatch {
            key: "a".into(),
            expected: std::any::type_name::<String>(),
        }
    );
}

#[test]
fn only_real_changes_notify() {
    let store = PersistentState::new();
    let calls = counting(&store);
    let value = store.get_state("n", || 1).unwrap();
    value.set(1);
    assert_eq!(calls.get(), 0);
    value.set(2);
    value.update(|n| *n += 1);
    assert_eq!(calls.get(), 2);
    assert_eq!(value.get(), 3);

    store.clear_on_state_change();
    value.set(10);
    assert_eq!(calls.get(), 2);
}

#[test]
fn removed_cells_are_disposed() {
    let store = PersistentState::new();
    let calls = counting(&store);
    let value = store.get_state("gone", || 1).unwrap();
    assert!(store.remove("gone"));
    assert!(!store.remove("gone"));
    assert!(value.is_disposed());

    value.set(5);
    assert_eq!(calls.get(), 0);
    assert_eq!(store.get_state("gone", || 1).unwrap().get(), 1);
}

#[test]
fn keys_are_sorted_and_clear_disposes_everything() {
    let store = PersistentState::new();
    let b = store.get_state("b", || 0).unwrap();
    store.get_state("a", || 0).unwrap();
    assert_eq!(store.keys(), ["a", "b"]);
    assert!(store.contains_key("a"));

    store.clear();
    assert!(store.is_empty());
    assert!(b.is_disposed());
}

#[test]
fn draw_guards_nest() {
    let store = PersistentState::new();
    assert!(!store.is_drawing());
    {
        let _outer = store.draw_guard();
        {
            let _inner = store.draw_guard();
            assert!(store.is_drawing());
        }
        assert!(store.is_drawing());
    }
    assert!(!store.is_drawing());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "during the draw phase")]
fn writing_while_drawing_panics() {
    let store = PersistentState::new();
    let value = store.get_state("n", || 0).unwrap();
    let _guard = store.draw_guard();
    value.set(1);
}

#[test]
fn owned_values_share_storage() {
    let owned = Owned::new(vec![1]);
    let alias = owned.clone();
    alias.update(|values| values.push(2));
    assert_eq!(owned.get(), [1, 2]);
    assert!(owned.ptr_eq(&alias));
    assert_eq!(owned.replace(Vec::new()), [1, 2]);
    assert!(alias.with(Vec::is_empty));
}
