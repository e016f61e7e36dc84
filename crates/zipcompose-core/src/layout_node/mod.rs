//! The node tree produced by composition and the phases run over it.

mod coordinator;
mod debug;
mod draw;
mod pointer;
mod slot;
mod tree;
mod widget;

pub use coordinator::NodeCoordinator;
pub use debug::dump_tree;
pub use draw::{DrawCommand, DrawScope};
pub use pointer::{PointerEvent, PointerEventKind};
pub use slot::{FromSlot, SlotValue};
pub use tree::{NodeHandle, NodeTree};
pub use widget::{ChildMeasurer, IdentityWidget, Widget, WidgetConstructor};

use crate::collections::map::HashMap;
use crate::collections::OrderedMap;
use crate::error::ComposeError;
use crate::identity::{Identifier, IdentitySource};
use crate::modifier::{ElementStore, Modifier, NodeCapabilities};
use smallvec::SmallVec;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use zipcompose_ui_graphics::{Constraints, Point, Rect, Size};

/// Where a node is in the modifier expansion cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Allocated during this frame, not yet committed.
    Unattached,
    /// Committed with a chain its element store does not reflect yet.
    PendingExpand,
    /// Element store matches the committed chain.
    Expanded,
}

/// How the composer matched this node in the most recent frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created,
    /// Same identity at the same sibling index.
    Updated,
    /// Same identity at a different sibling index.
    Moved,
}

#[derive(Clone, Copy, Debug)]
struct MeasureCacheEntry {
    epoch: u64,
    constraints: [u32; 4],
    size: Size,
}

/// Results of the layout phase for one node.
#[derive(Clone, Debug, Default)]
pub(crate) struct LayoutState {
    pub(crate) size: Size,
    /// Offset from the parent's content origin.
    pub(crate) position: Point,
    /// Node-local rectangle of each layout level; the last one is the content.
    pub(crate) regions: SmallVec<[Rect; 4]>,
    cache: Option<MeasureCacheEntry>,
    pub(crate) measure_passes: usize,
}

impl LayoutState {
    fn cached(&self, epoch: u64, constraints: Constraints) -> Option<Size> {
        self.cache
            .filter(|entry| entry.epoch == epoch && entry.constraints == constraints.to_bits())
            .map(|entry| entry.size)
    }

    fn remember(&mut self, epoch: u64, constraints: Constraints, size: Size) {
        self.cache = Some(MeasureCacheEntry {
            epoch,
            constraints: constraints.to_bits(),
            size,
        });
    }

    /// Node-local rectangle of layout level `depth`, clamped to the content level.
    pub(crate) fn region(&self, depth: usize) -> Rect {
        self.regions
            .get(depth)
            .or_else(|| self.regions.last())
            .copied()
            .unwrap_or_else(|| Rect::from_size(self.size))
    }

    pub(crate) fn content(&self) -> Rect {
        self.regions
            .last()
            .copied()
            .unwrap_or_else(|| Rect::from_size(self.size))
    }
}

#[derive(Default)]
pub(crate) struct WidgetSlot {
    pub(crate) constructor: Option<WidgetConstructor>,
    cached: RefCell<Option<Rc<dyn Widget>>>,
    builds: Cell<usize>,
}

impl WidgetSlot {
    pub(crate) fn invalidate(&self) {
        self.cached.borrow_mut().take();
    }
}

/// One position of the composed tree.
pub struct LayoutNode {
    pub(crate) id: Identifier,
    pub(crate) source: IdentitySource,
    pub(crate) key: Option<String>,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
    pub(crate) modifier: Modifier,
    pub(crate) slots: OrderedMap<String, SlotValue>,
    pub(crate) widget: WidgetSlot,
    pub(crate) element_store: ElementStore,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) capabilities: NodeCapabilities,
    pub(crate) memo: HashMap<String, Box<dyn Any>>,
    pub(crate) state_keys: SmallVec<[String; 2]>,
    pub(crate) outcome: ReconcileOutcome,
    pub(crate) layout: LayoutState,
}

impl LayoutNode {
    pub(crate) fn new(
        id: Identifier,
        source: IdentitySource,
        key: Option<String>,
        parent: Option<NodeHandle>,
    ) -> Self {
        Self {
            id,
            source,
            key,
            parent,
            children: Vec::new(),
            modifier: Modifier::empty(),
            slots: OrderedMap::default(),
            widget: WidgetSlot::default(),
            element_store: ElementStore::new(),
            lifecycle: Lifecycle::Unattached,
            capabilities: NodeCapabilities::ALL,
            memo: HashMap::default(),
            state_keys: SmallVec::new(),
            outcome: ReconcileOutcome::Created,
            layout: LayoutState::default(),
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn source(&self) -> IdentitySource {
        self.source
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    pub fn modifier(&self) -> &Modifier {
        &self.modifier
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &SlotValue)> + '_ {
        self.slots.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn slot(&self, name: &str) -> Option<&SlotValue> {
        self.slots.get(name)
    }

    /// Reads slot `name` as `T`; absent slots read as `None`.
    pub fn typed_slot<T: FromSlot>(&self, name: &str) -> Result<Option<T>, ComposeError> {
        match self.slots.get(name) {
            None => Ok(None),
            Some(value) => T::from_slot(value)
                .map(Some)
                .ok_or_else(|| ComposeError::SlotTypeMismatch {
                    name: name.to_owned(),
                    expected: T::KIND,
                }),
        }
    }

    pub fn element_store(&self) -> &ElementStore {
        &self.element_store
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn capabilities(&self) -> NodeCapabilities {
        self.capabilities
    }

    pub fn state_keys(&self) -> &[String] {
        &self.state_keys
    }

    pub fn outcome(&self) -> ReconcileOutcome {
        self.outcome
    }

    pub fn size(&self) -> Size {
        self.layout.size
    }

    /// Offset from the parent's content origin.
    pub fn position(&self) -> Point {
        self.layout.position
    }

    /// Node-local rectangle the widget and children are laid out in.
    pub fn content_rect(&self) -> Rect {
        self.layout.content()
    }

    /// How many times layout actually measured this node (cache misses).
    pub fn measure_passes(&self) -> usize {
        self.layout.measure_passes
    }

    /// How many times this node's widget has been constructed.
    pub fn widget_builds(&self) -> usize {
        self.widget.builds.get()
    }

    pub fn has_widget(&self) -> bool {
        self.widget.cached.borrow().is_some()
    }

    /// The node's widget, constructing it on first request. A failed build
    /// leaves nothing cached, so the next request runs the factory again.
    pub fn widget(&self) -> Result<Rc<dyn Widget>, ComposeError> {
        if let Some(widget) = self.widget.cached.borrow().as_ref() {
            return Ok(Rc::clone(widget));
        }
        let widget: Rc<dyn Widget> = match &self.widget.constructor {
            Some(constructor) => constructor.build(self)?,
            None => Rc::new(IdentityWidget),
        };
        self.widget.builds.set(self.widget.builds.get() + 1);
        *self.widget.cached.borrow_mut() = Some(Rc::clone(&widget));
        Ok(widget)
    }
}

impl std::fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutNode")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("children", &self.children.len())
            .field("modifier", &self.modifier)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
