use super::{coordinator, NodeHandle, NodeTree};
use crate::identity::Identifier;
use crate::modifier::{Capability, SharedBehavior};
use std::fmt;
use std::rc::Rc;
use zipcompose_ui_graphics::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The gesture was abandoned; the receiver drops any press it tracks.
    Cancel,
}

/// Pointer event in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Cancel, x, y)
    }

    /// True for the events that end a gesture.
    pub fn ends_gesture(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

/// Behavior that consumed a press. It keeps receiving the gesture's events
/// wherever the pointer goes until the gesture ends.
#[derive(Clone)]
pub(crate) struct PointerCapture {
    pub(crate) node: NodeHandle,
    pub(crate) id: Identifier,
    behavior: SharedBehavior,
}

impl fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCapture")
            .field("node", &self.node)
            .field("id", &self.id)
            .finish()
    }
}

/// Hit tests topmost first. Returns the behavior that consumed the event.
pub(crate) fn dispatch(
    tree: &NodeTree,
    root: NodeHandle,
    event: &PointerEvent,
) -> Option<PointerCapture> {
    let origin = tree.get(root)?.layout.position;
    dispatch_node(tree, root, origin, event)
}

/// Sends `event` straight to a captured behavior. `None` means the behavior
/// is gone: its node was pruned or its element left the chain.
pub(crate) fn deliver(
    tree: &NodeTree,
    capture: &PointerCapture,
    event: &PointerEvent,
) -> Option<bool> {
    let node = tree.get(capture.node)?;
    if node.id != capture.id || !node.capabilities.supports(Capability::Pointer) {
        return None;
    }
    let stored = node
        .element_store
        .pointer_behaviors()
        .into_iter()
        .find(|stored| Rc::ptr_eq(stored.behavior(), &capture.behavior))?;
    let origin = coordinator::absolute_origin(tree, capture.node)?;
    let region = node
        .layout
        .region(stored.layout_depth())
        .translate(origin.x, origin.y);
    Some(offer(&capture.behavior, event, region))
}

fn offer(behavior: &SharedBehavior, event: &PointerEvent, region: Rect) -> bool {
    behavior
        .borrow_mut()
        .as_pointer_mut()
        .is_some_and(|behavior| behavior.on_pointer_event(event, region))
}

fn dispatch_node(
    tree: &NodeTree,
    handle: NodeHandle,
    origin: Point,
    event: &PointerEvent,
) -> Option<PointerCapture> {
    let node = tree.get(handle)?;
    let layout = &node.layout;
    let bounds = layout.region(0).translate(origin.x, origin.y);
    if !bounds.contains(event.position.x, event.position.y) {
        return None;
    }

    let content_origin = origin + layout.content().origin();
    for child in node.children.iter().rev() {
        let Some(child_node) = tree.get(*child) else {
            continue;
        };
        let child_origin = content_origin + child_node.layout.position;
        if let Some(consumer) = dispatch_node(tree, *child, child_origin, event) {
            return Some(consumer);
        }
    }

    if !node.capabilities.supports(Capability::Pointer) {
        return None;
    }
    for stored in node.element_store.pointer_behaviors().iter().rev() {
        let region = layout
            .region(stored.layout_depth())
            .translate(origin.x, origin.y);
        if !region.contains(event.position.x, event.position.y) {
            continue;
        }
        if offer(stored.behavior(), event, region) {
            log::debug!("pointer {:?} consumed by {}", event.kind, node.id);
            return Some(PointerCapture {
                node: handle,
                id: node.id,
                behavior: Rc::clone(stored.behavior()),
            });
        }
    }
    None
}
