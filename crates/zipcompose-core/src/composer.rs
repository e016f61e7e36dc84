//! The zipper that turns composable calls into a persistent node tree.
//!
//! Each open block keeps a frame holding the node's children from the last
//! frame and an index from identifier to their old position. Starting a block
//! claims a previous child with the same identifier and block key or
//! allocates a new node; ending it disposes whatever was not claimed, stores
//! the children in visitation order and commits the pending modifier, slots
//! and widget constructor.

use crate::collections::map::{HashMap, HashSet};
use crate::collections::OrderedMap;
use crate::composable::Composable;
use crate::composition_local::{LocalFrame, ProvidedValue};
use crate::error::{ComposeError, ComposeResult};
use crate::identity::{Identifier, IdentityManager};
use crate::layout_node::{
    Lifecycle, LayoutNode, NodeHandle, NodeTree, ReconcileOutcome, SlotValue, WidgetConstructor,
};
use crate::modifier::{fold_modifier, FoldStats, Modifier, NodeCapabilities};
use crate::owned::Owned;
use crate::state::{MutableValue, PersistentState};
use smallvec::SmallVec;
use std::any::{type_name, Any};
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Tunables for a composer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Block key of the node every frame is composed under.
    pub root_key: String,
    /// Nesting depth past which composition is assumed to recurse forever.
    pub max_depth: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            root_key: "root".to_owned(),
            max_depth: 512,
        }
    }
}

/// Counters describing the most recent frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub created: usize,
    pub updated: usize,
    pub moved: usize,
    pub pruned: usize,
    pub expanded: usize,
    pub fold: FoldStats,
}

/// Route from the root to the current position: one `(scope, slot)` pair per
/// open block, where `slot` is the index among that scope's children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath(SmallVec<[(Identifier, u32); 8]>);

impl NodePath {
    pub fn segments(&self) -> &[(Identifier, u32)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for (scope, slot) in &self.0 {
            write!(f, "/{scope}:{slot}")?;
        }
        Ok(())
    }
}

struct PendingNode {
    modifier: Modifier,
    slots: OrderedMap<String, SlotValue>,
    widget: Option<WidgetConstructor>,
    capabilities: NodeCapabilities,
}

impl Default for PendingNode {
    fn default() -> Self {
        Self {
            modifier: Modifier::empty(),
            slots: OrderedMap::default(),
            widget: None,
            capabilities: NodeCapabilities::ALL,
        }
    }
}

struct BlockFrame {
    /// `None` only for the frame sitting above the root.
    node: Option<NodeHandle>,
    previous: SmallVec<[NodeHandle; 8]>,
    previous_ids: HashMap<Identifier, usize>,
    claimed: SmallVec<[bool; 8]>,
    visited: SmallVec<[NodeHandle; 8]>,
    seen: HashSet<Identifier>,
    pending: PendingNode,
    provider_depth: usize,
}

impl BlockFrame {
    fn new(node: Option<NodeHandle>, tree: &NodeTree, previous: &[NodeHandle], provider_depth: usize) -> Self {
        let previous: SmallVec<[NodeHandle; 8]> = previous.iter().copied().collect();
        let mut previous_ids = HashMap::default();
        for (position, handle) in previous.iter().enumerate() {
            if let Some(child) = tree.get(*handle) {
                previous_ids.insert(child.id(), position);
            }
        }
        Self {
            node,
            claimed: SmallVec::from_elem(false, previous.len()),
            previous,
            previous_ids,
            visited: SmallVec::new(),
            seen: HashSet::default(),
            pending: PendingNode::default(),
            provider_depth,
        }
    }
}

pub(crate) struct ComposerCore {
    tree: RefCell<NodeTree>,
    store: PersistentState,
    identity: RefCell<IdentityManager>,
    frames: RefCell<Vec<BlockFrame>>,
    locals: RefCell<Vec<LocalFrame>>,
    stats: Cell<FrameStats>,
    config: ComposerConfig,
}

/// Cursor over the node tree, handed to every composable.
#[derive(Clone)]
pub struct Composer {
    core: Rc<ComposerCore>,
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("tree", &*self.core.tree.borrow())
            .field("open_blocks", &self.core.frames.borrow().len())
            .finish()
    }
}

impl Composer {
    pub fn new(store: PersistentState, config: ComposerConfig) -> Self {
        Self {
            core: Rc::new(ComposerCore {
                tree: RefCell::new(NodeTree::new()),
                store,
                identity: RefCell::new(IdentityManager::new()),
                frames: RefCell::new(Vec::new()),
                locals: RefCell::new(Vec::new()),
                stats: Cell::new(FrameStats::default()),
                config,
            }),
        }
    }

    pub fn store(&self) -> &PersistentState {
        &self.core.store
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.core.config
    }

    pub fn frame_stats(&self) -> FrameStats {
        self.core.stats.get()
    }

    pub fn is_composing(&self) -> bool {
        !self.core.frames.borrow().is_empty()
    }

    fn update_stats(&self, f: impl FnOnce(&mut FrameStats)) {
        let mut stats = self.core.stats.get();
        f(&mut stats);
        self.core.stats.set(stats);
    }

    pub(crate) fn begin_frame(&self) {
        self.core.identity.borrow_mut().reset_key_counter();
        self.core.locals.borrow_mut().clear();
        self.core.stats.set(FrameStats::default());
        let tree = self.core.tree.borrow();
        let roots: SmallVec<[NodeHandle; 1]> = tree.root().into_iter().collect();
        let sentinel = BlockFrame::new(None, &tree, &roots, 0);
        let mut frames = self.core.frames.borrow_mut();
        frames.clear();
        frames.push(sentinel);
    }

    /// Closes the frame above the root and installs the new root.
    pub(crate) fn finish_frame(&self) -> Option<NodeHandle> {
        let sentinel = {
            let mut frames = self.core.frames.borrow_mut();
            if frames.len() != 1 {
                panic!(
                    "{} block(s) left open at the end of the frame",
                    frames.len().saturating_sub(1)
                );
            }
            frames.pop()
        };
        let sentinel = sentinel?;
        if sentinel.visited.len() > 1 {
            panic!(
                "a frame must compose exactly one root block, found {}",
                sentinel.visited.len()
            );
        }
        let mut tree = self.core.tree.borrow_mut();
        let mut stats = self.core.stats.get();
        for (position, handle) in sentinel.previous.iter().enumerate() {
            if !sentinel.claimed[position] {
                dispose_subtree(&self.core.store, &mut tree, *handle, &mut stats);
            }
        }
        self.core.stats.set(stats);
        let root = sentinel.visited.first().copied();
        tree.set_root(root);
        root
    }

    /// Folds the committed chain of every node marked `PendingExpand`.
    pub(crate) fn expand_pending(&self) -> Result<FoldStats, ComposeError> {
        let mut tree = self.core.tree.borrow_mut();
        let mut total = FoldStats::default();
        let mut expanded = 0;
        for handle in tree.handles() {
            let Some(node) = tree.get_mut(handle) else {
                continue;
            };
            if node.lifecycle != Lifecycle::PendingExpand {
                continue;
            }
            let stats = fold_modifier(
                node.id,
                &node.modifier,
                &mut node.element_store,
                node.capabilities,
            )?;
            log::trace!("expanded {}: {stats:?}", node.id);
            node.lifecycle = Lifecycle::Expanded;
            total += stats;
            expanded += 1;
        }
        drop(tree);
        self.update_stats(|frame| {
            frame.fold = total;
            frame.expanded = expanded;
        });
        Ok(total)
    }

    pub(crate) fn bump_epoch(&self) {
        self.core.tree.borrow_mut().bump_epoch();
    }

    /// Drops the whole tree and all state.
    pub(crate) fn teardown(&self) {
        self.core.frames.borrow_mut().clear();
        self.core.locals.borrow_mut().clear();
        self.core.identity.borrow_mut().clear();
        let nodes = self.core.tree.borrow_mut().clear();
        for mut node in nodes {
            node.element_store.detach_all();
        }
        self.core.store.clear();
    }

    /// Opens a child position named `key` under the current block.
    pub fn start_block(&self, key: &str) -> ComposeResult {
        let (id, source) = self.core.identity.borrow_mut().next_block_id()?;
        let block_key = (!key.is_empty()).then_some(key);
        let mut frames = self.core.frames.borrow_mut();
        if frames.len() > self.core.config.max_depth {
            panic!(
                "composition nested deeper than {} blocks",
                self.core.config.max_depth
            );
        }
        let provider_depth = self.core.locals.borrow().len();
        let parent = frames.last_mut().ok_or(ComposeError::NotComposed)?;
        if !parent.seen.insert(id) {
            panic!("identity collision: {id} (`{key}`) composed twice under one parent");
        }

        let slot = parent.visited.len();
        let mut tree = self.core.tree.borrow_mut();
        let mut stats = self.core.stats.get();
        let mut reused = None;
        if let Some(position) = parent.previous_ids.get(&id).copied() {
            parent.claimed[position] = true;
            let handle = parent.previous[position];
            if tree.get(handle).is_some_and(|node| node.key() == block_key) {
                let outcome = if position == slot {
                    ReconcileOutcome::Updated
                } else {
                    ReconcileOutcome::Moved
                };
                reused = Some((handle, outcome));
            } else {
                log::debug!("block key changed at {id}: disposing old subtree for `{key}`");
                dispose_subtree(&self.core.store, &mut tree, handle, &mut stats);
            }
        }

        let handle = match reused.and_then(|(handle, outcome)| {
            tree.get_mut(handle).map(|node| {
                node.outcome = outcome;
                (handle, outcome)
            })
        }) {
            Some((handle, outcome)) => {
                log::trace!("reuse {id} `{key}` as {outcome:?}");
                match outcome {
                    ReconcileOutcome::Moved => stats.moved += 1,
                    _ => stats.updated += 1,
                }
                handle
            }
            None => {
                log::trace!("create {id} `{key}`");
                stats.created += 1;
                let node = LayoutNode::new(id, source, block_key.map(str::to_owned), parent.node);
                tree.insert(node)
            }
        };
        parent.visited.push(handle);

        let children: SmallVec<[NodeHandle; 8]> = tree.children(handle).iter().copied().collect();
        let frame = BlockFrame::new(Some(handle), &tree, &children, provider_depth);
        frames.push(frame);
        drop(tree);
        drop(frames);
        self.core.stats.set(stats);
        self.core.identity.borrow_mut().push_scope(id);
        Ok(())
    }

    /// Closes the block opened by the matching [`start_block`](Self::start_block).
    pub fn end_block(&self) {
        let frame = {
            let mut frames = self.core.frames.borrow_mut();
            if frames.len() < 2 {
                panic!("end_block called without a matching start_block");
            }
            frames.pop()
        };
        let Some(BlockFrame {
            node: Some(handle),
            previous,
            claimed,
            visited,
            pending,
            provider_depth,
            ..
        }) = frame
        else {
            panic!("end_block called without a matching start_block");
        };
        let open_providers = self.core.locals.borrow().len();
        assert_eq!(
            open_providers, provider_depth,
            "composition locals provided inside a block must be popped before end_block"
        );
        self.core.identity.borrow_mut().pop_scope();

        let mut tree = self.core.tree.borrow_mut();
        let mut stats = self.core.stats.get();
        for (position, stale) in previous.iter().enumerate() {
            if !claimed[position] {
                dispose_subtree(&self.core.store, &mut tree, *stale, &mut stats);
            }
        }
        self.core.stats.set(stats);
        if let Some(node) = tree.get_mut(handle) {
            node.children = visited.into_vec();
            commit(node, pending);
        }
    }

    /// Runs `content` inside a block named `key`.
    pub fn block(&self, key: &str, content: impl FnOnce(&Composer) -> ComposeResult) -> ComposeResult {
        self.start_block(key)?;
        content(self)?;
        self.end_block();
        Ok(())
    }

    pub fn with_composable(&self, composable: &Composable) -> ComposeResult {
        composable(self)
    }

    /// Composes `contents` left to right.
    pub fn sequence(&self, contents: &[Composable]) -> ComposeResult {
        for content in contents {
            content(self)?;
        }
        Ok(())
    }

    /// Runs exactly one of the arms. Each arm composes under its own keyed
    /// region, so switching arms drops the other arm's nodes and state, and
    /// siblings after the conditional keep their identities either way.
    pub fn if_else(
        &self,
        condition: bool,
        then: impl FnOnce(&Composer) -> ComposeResult,
        otherwise: impl FnOnce(&Composer) -> ComposeResult,
    ) -> ComposeResult {
        self.core.identity.borrow_mut().enter_branch(condition)?;
        if condition {
            then(self)?;
        } else {
            otherwise(self)?;
        }
        self.core.identity.borrow_mut().exit_key();
        Ok(())
    }

    pub fn when(&self, condition: bool, content: impl FnOnce(&Composer) -> ComposeResult) -> ComposeResult {
        self.if_else(condition, content, |_| Ok(()))
    }

    /// Runs `content` when `condition` is false.
    pub fn otherwise(&self, condition: bool, content: impl FnOnce(&Composer) -> ComposeResult) -> ComposeResult {
        self.if_else(condition, |_| Ok(()), content)
    }

    /// Composes `content` with identity derived from `key` instead of position.
    pub fn key<K: Hash + ?Sized>(
        &self,
        key: &K,
        content: impl FnOnce(&Composer) -> ComposeResult,
    ) -> ComposeResult {
        self.core.identity.borrow_mut().enter_key(key)?;
        content(self)?;
        self.core.identity.borrow_mut().exit_key();
        Ok(())
    }

    pub fn range(
        &self,
        count: usize,
        mut content: impl FnMut(&Composer, usize) -> ComposeResult,
    ) -> ComposeResult {
        for index in 0..count {
            content(self, index)?;
        }
        Ok(())
    }

    fn current_node(&self) -> Result<NodeHandle, ComposeError> {
        self.core
            .frames
            .borrow()
            .last()
            .and_then(|frame| frame.node)
            .ok_or(ComposeError::NotComposed)
    }

    fn with_pending<R>(&self, f: impl FnOnce(&mut PendingNode) -> R) -> Result<R, ComposeError> {
        let mut frames = self.core.frames.borrow_mut();
        match frames.last_mut() {
            Some(frame) if frame.node.is_some() => Ok(f(&mut frame.pending)),
            _ => Err(ComposeError::NotComposed),
        }
    }

    /// Identifier of the innermost open block.
    pub fn id(&self) -> Result<Identifier, ComposeError> {
        let handle = self.current_node()?;
        self.core
            .tree
            .borrow()
            .get(handle)
            .map(LayoutNode::id)
            .ok_or(ComposeError::NotComposed)
    }

    pub fn path(&self) -> NodePath {
        let frames = self.core.frames.borrow();
        let tree = self.core.tree.borrow();
        let mut segments = SmallVec::new();
        for frame in frames.iter().take(frames.len().saturating_sub(1)) {
            let scope = frame
                .node
                .and_then(|handle| tree.get(handle))
                .map(LayoutNode::id)
                .unwrap_or(Identifier::ROOT);
            let slot = frame.visited.len().saturating_sub(1) as u32;
            segments.push((scope, slot));
        }
        NodePath(segments)
    }

    /// Number of open blocks.
    pub fn depth(&self) -> usize {
        self.core.frames.borrow().len().saturating_sub(1)
    }

    /// State cell `key` owned by the current node. The cell is removed when
    /// the node leaves the tree.
    pub fn state<T: Clone + PartialEq + 'static>(
        &self,
        key: &str,
        init: impl FnOnce() -> T,
    ) -> Result<MutableValue<T>, ComposeError> {
        let handle = self.current_node()?;
        let owner = self.id()?;
        let namespaced = format!("{owner}/{key}");
        let value = self.core.store.get_state(&namespaced, init)?;
        if let Some(node) = self.core.tree.borrow_mut().get_mut(handle) {
            if !node.state_keys.contains(&namespaced) {
                node.state_keys.push(namespaced);
            }
        }
        Ok(value)
    }

    /// Value remembered under `key` at the current node.
    pub fn remember<T: 'static>(
        &self,
        key: &str,
        init: impl FnOnce() -> T,
    ) -> Result<Owned<T>, ComposeError> {
        let handle = self.current_node()?;
        {
            let tree = self.core.tree.borrow();
            if let Some(existing) = tree.get(handle).and_then(|node| node.memo.get(key)) {
                return existing
                    .downcast_ref::<Owned<T>>()
                    .cloned()
                    .ok_or_else(|| ComposeError::TypeMismatch {
                        key: key.to_owned(),
                        expected: type_name::<T>(),
                    });
            }
        }
        let owned = Owned::new(init());
        if let Some(node) = self.core.tree.borrow_mut().get_mut(handle) {
            node.memo
                .insert(key.to_owned(), Box::new(owned.clone()) as Box<dyn Any>);
        }
        Ok(owned)
    }

    /// Attaches a named value to the current node.
    pub fn emit_slot(&self, name: &str, value: impl Into<SlotValue>) -> ComposeResult {
        let value = value.into();
        self.with_pending(|pending| {
            pending.slots.insert(name.to_owned(), value);
        })
    }

    pub fn set_modifier(&self, modifier: Modifier) -> ComposeResult {
        self.with_pending(|pending| pending.modifier = modifier)
    }

    /// Transforms the current node's pending modifier.
    pub fn modifier(&self, f: impl FnOnce(Modifier) -> Modifier) -> ComposeResult {
        let current = self.with_pending(|pending| std::mem::take(&mut pending.modifier))?;
        let next = f(current);
        self.with_pending(|pending| pending.modifier = next)
    }

    pub fn set_widget_constructor(&self, constructor: WidgetConstructor) -> ComposeResult {
        self.with_pending(|pending| pending.widget = Some(constructor))
    }

    /// Declares which phases the current node supports.
    pub fn set_node_capabilities(&self, capabilities: NodeCapabilities) -> ComposeResult {
        self.with_pending(|pending| pending.capabilities = capabilities)
    }

    /// Root of the committed tree.
    pub fn build(&self) -> Option<NodeHandle> {
        self.core.tree.borrow().root()
    }

    pub fn with_tree<R>(&self, f: impl FnOnce(&NodeTree) -> R) -> R {
        f(&self.core.tree.borrow())
    }

    pub(crate) fn with_tree_mut<R>(&self, f: impl FnOnce(&mut NodeTree) -> R) -> R {
        f(&mut self.core.tree.borrow_mut())
    }

    pub fn tree(&self) -> Ref<'_, NodeTree> {
        self.core.tree.borrow()
    }

    /// Pushes a frame of provided values; pair with [`pop_provided`](Self::pop_provided).
    pub fn push_provided(&self, values: impl IntoIterator<Item = ProvidedValue>) {
        let mut frame = LocalFrame::default();
        for value in values {
            let (key, entry) = value.into_entry();
            frame.insert(key, entry);
        }
        self.core.locals.borrow_mut().push(frame);
    }

    pub fn pop_provided(&self) {
        if self.core.locals.borrow_mut().pop().is_none() {
            panic!("pop_provided without a matching push_provided");
        }
    }

    pub fn with_composition_locals<R>(
        &self,
        values: impl IntoIterator<Item = ProvidedValue>,
        f: impl FnOnce(&Composer) -> R,
    ) -> R {
        self.push_provided(values);
        let result = f(self);
        self.pop_provided();
        result
    }

    pub(crate) fn read_local(&self, key: usize) -> Option<Rc<dyn Any>> {
        self.core
            .locals
            .borrow()
            .iter()
            .rev()
            .find_map(|frame| frame.get(&key).cloned())
    }
}

fn dispose_subtree(
    store: &PersistentState,
    tree: &mut NodeTree,
    handle: NodeHandle,
    stats: &mut FrameStats,
) {
    for mut node in tree.remove_subtree(handle) {
        log::debug!(
            "prune {} `{}` with {} state cell(s)",
            node.id(),
            node.key().unwrap_or_default(),
            node.state_keys.len()
        );
        for key in &node.state_keys {
            store.remove(key);
        }
        node.element_store.detach_all();
        stats.pruned += 1;
    }
}

fn commit(node: &mut LayoutNode, pending: PendingNode) {
    let PendingNode {
        modifier,
        slots,
        widget,
        capabilities,
    } = pending;
    if node.lifecycle == Lifecycle::Unattached {
        node.lifecycle = Lifecycle::PendingExpand;
    }
    if node.modifier != modifier {
        node.modifier = modifier;
        node.lifecycle = Lifecycle::PendingExpand;
    }
    if node.capabilities != capabilities {
        node.capabilities = capabilities;
        node.lifecycle = Lifecycle::PendingExpand;
    }

    let mut invalidate = node.outcome == ReconcileOutcome::Created;
    if node.slots != slots {
        node.slots = slots;
        invalidate = true;
    }
    let same_inputs = match (&widget, &node.widget.constructor) {
        (Some(next), Some(current)) => next.inputs() == current.inputs(),
        (None, None) => true,
        _ => false,
    };
    // The fresh factory always wins; a rebuild must see this frame's captures.
    node.widget.constructor = widget;
    if !same_inputs {
        invalidate = true;
    }
    if invalidate {
        node.widget.invalidate();
    }
}
