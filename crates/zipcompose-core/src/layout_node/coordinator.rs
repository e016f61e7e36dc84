use super::pointer::PointerCapture;
use super::{
    draw, pointer, ChildMeasurer, DrawScope, NodeHandle, NodeTree, PointerEvent, PointerEventKind,
    Widget,
};
use crate::error::ComposeError;
use crate::identity::Identifier;
use crate::modifier::{Capability, Measurable, StoredBehavior};
use smallvec::{smallvec, SmallVec};
use std::cell::RefCell;
use std::rc::Rc;
use zipcompose_ui_graphics::{Constraints, Point, Rect, Size};

/// Runs the layout, pointer and draw phases over a [`NodeTree`] and keeps
/// them in that order: pointer and draw refuse to run until layout has run
/// for the tree's current epoch.
#[derive(Debug, Default)]
pub struct NodeCoordinator {
    laid_out: Option<(u64, Constraints)>,
    capture: RefCell<Option<PointerCapture>>,
}

impl NodeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures and places the whole tree. Repeating it with the same
    /// constraints in the same epoch reuses cached sizes.
    pub fn layout(
        &mut self,
        tree: &mut NodeTree,
        constraints: Constraints,
    ) -> Result<Size, ComposeError> {
        let root = tree.root().ok_or(ComposeError::NotComposed)?;
        let size = measure_node(tree, root, constraints)?;
        if let Some(node) = tree.get_mut(root) {
            node.layout.position = Point::ZERO;
        }
        self.laid_out = Some((tree.epoch(), constraints));
        Ok(size)
    }

    pub fn is_laid_out(&self, tree: &NodeTree) -> bool {
        matches!(self.laid_out, Some((epoch, _)) if epoch == tree.epoch())
    }

    pub fn last_constraints(&self) -> Option<Constraints> {
        self.laid_out.map(|(_, constraints)| constraints)
    }

    fn ensure_laid_out(&self, tree: &NodeTree) -> Result<NodeHandle, ComposeError> {
        let root = tree.root().ok_or(ComposeError::NotComposed)?;
        if self.is_laid_out(tree) {
            Ok(root)
        } else {
            Err(ComposeError::LayoutPending)
        }
    }

    /// Hit tests topmost first and hands the event to pointer behaviors.
    /// Returns the identifier of the node that consumed it.
    ///
    /// The behavior that consumes a `Down` captures the pointer: the moves
    /// and the `Up` or `Cancel` that follow go to it alone, inside its bounds
    /// or not. A new `Down` while a capture is held cancels the old gesture.
    pub fn dispatch_pointer(
        &self,
        tree: &NodeTree,
        event: &PointerEvent,
    ) -> Result<Option<Identifier>, ComposeError> {
        let root = self.ensure_laid_out(tree)?;
        let captured = self.capture.borrow_mut().take();

        if event.kind == PointerEventKind::Down {
            if let Some(previous) = captured {
                log::debug!("new press cancels the gesture held by {}", previous.id);
                let cancel = PointerEvent::cancel(event.position.x, event.position.y);
                pointer::deliver(tree, &previous, &cancel);
            }
            let hit = pointer::dispatch(tree, root, event);
            let consumer = hit.as_ref().map(|capture| capture.id);
            *self.capture.borrow_mut() = hit;
            return Ok(consumer);
        }

        match captured {
            Some(capture) => match pointer::deliver(tree, &capture, event) {
                Some(consumed) => {
                    let id = capture.id;
                    if !event.ends_gesture() {
                        *self.capture.borrow_mut() = Some(capture);
                    }
                    Ok(consumed.then_some(id))
                }
                None => {
                    log::debug!("pointer capture of {} lost; dropping {:?}", capture.id, event.kind);
                    Ok(None)
                }
            },
            None if event.kind == PointerEventKind::Cancel => Ok(None),
            None => Ok(pointer::dispatch(tree, root, event).map(|capture| capture.id)),
        }
    }

    pub fn draw(&self, tree: &NodeTree, scope: &mut DrawScope) -> Result<(), ComposeError> {
        let root = self.ensure_laid_out(tree)?;
        draw::draw_tree(tree, root, scope);
        Ok(())
    }

    /// Absolute bounds of `handle` as of the last layout.
    pub fn bounds_of(&self, tree: &NodeTree, handle: NodeHandle) -> Option<Rect> {
        let origin = absolute_origin(tree, handle)?;
        let node = tree.get(handle)?;
        Some(Rect::from_origin_size(origin, node.layout.size))
    }
}

/// Top-left corner of `handle` in root coordinates.
pub(crate) fn absolute_origin(tree: &NodeTree, handle: NodeHandle) -> Option<Point> {
    let mut chain = vec![handle];
    let mut cursor = tree.get(handle)?.parent;
    while let Some(parent) = cursor {
        chain.push(parent);
        cursor = tree.get(parent)?.parent;
    }
    let mut origin = Point::ZERO;
    let mut parent_content = Point::ZERO;
    for handle in chain.iter().rev() {
        let node = tree.get(*handle)?;
        origin = parent_content + node.layout.position;
        parent_content = origin + node.layout.content().origin();
    }
    Some(origin)
}

/// Measures one node through its layout behaviors down to its widget.
pub(crate) fn measure_node(
    tree: &mut NodeTree,
    handle: NodeHandle,
    constraints: Constraints,
) -> Result<Size, ComposeError> {
    let epoch = tree.epoch();
    let Some(node) = tree.get(handle) else {
        return Ok(Size::ZERO);
    };
    if let Some(size) = node.layout.cached(epoch, constraints) {
        return Ok(size);
    }
    let id = node.id;
    let layouts = if node.capabilities.supports(Capability::Layout) {
        node.element_store.layout_behaviors()
    } else {
        Vec::new()
    };
    let widget = node.widget()?;
    let children: SmallVec<[NodeHandle; 8]> = node.children.iter().copied().collect();

    let mut levels: SmallVec<[Level; 4]> = smallvec![Level::default(); layouts.len() + 1];
    let size = {
        let mut content = LevelMeasurable {
            tree: &mut *tree,
            node: id,
            layouts: &layouts,
            level: 0,
            widget: &widget,
            children: &children,
            levels: &mut levels,
        };
        content.measure(constraints)?
    };

    let mut regions = SmallVec::with_capacity(levels.len());
    let mut origin = Point::ZERO;
    for level in &levels {
        regions.push(Rect::from_origin_size(origin, level.size));
        origin = origin + level.content_offset;
    }

    if let Some(node) = tree.get_mut(handle) {
        node.layout.size = size;
        node.layout.regions = regions;
        node.layout.remember(epoch, constraints, size);
        node.layout.measure_passes += 1;
    }
    log::trace!("measured {id}: {}x{}", size.width, size.height);
    Ok(size)
}

#[derive(Clone, Copy, Debug, Default)]
struct Level {
    size: Size,
    content_offset: Point,
}

/// The content seen by layout behavior `level - 1`: the remaining behaviors
/// followed by the widget.
struct LevelMeasurable<'a> {
    tree: &'a mut NodeTree,
    node: Identifier,
    layouts: &'a [StoredBehavior],
    level: usize,
    widget: &'a Rc<dyn Widget>,
    children: &'a [NodeHandle],
    levels: &'a mut SmallVec<[Level; 4]>,
}

impl Measurable for LevelMeasurable<'_> {
    fn measure(&mut self, constraints: Constraints) -> Result<Size, ComposeError> {
        let Some(stored) = self.layouts.get(self.level) else {
            let mut measurer = ChildMeasurer::new(self.tree, self.children);
            let size = self.widget.layout(constraints, &mut measurer)?;
            self.levels[self.level] = Level {
                size,
                content_offset: Point::ZERO,
            };
            return Ok(size);
        };
        let behavior = stored.behavior().borrow();
        let layout = behavior
            .as_layout()
            .ok_or(ComposeError::MissingCapability {
                node: self.node,
                capability: Capability::Layout,
            })?;
        let mut inner = LevelMeasurable {
            tree: &mut *self.tree,
            node: self.node,
            layouts: self.layouts,
            level: self.level + 1,
            widget: self.widget,
            children: self.children,
            levels: &mut *self.levels,
        };
        let modification = layout.measure(&mut inner, constraints)?;
        self.levels[self.level] = Level {
            size: modification.size,
            content_offset: modification.content_offset,
        };
        Ok(modification.size)
    }
}
