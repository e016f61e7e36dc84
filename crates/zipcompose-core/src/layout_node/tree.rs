use super::LayoutNode;
use crate::identity::Identifier;
use std::fmt;

/// Generational index of a node in a [`NodeTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle {
    index: u32,
    generation: u32,
}

impl NodeHandle {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({}v{})", self.index, self.generation)
    }
}

struct Entry {
    generation: u32,
    node: Option<LayoutNode>,
}

/// Arena owning every [`LayoutNode`] of a composition.
///
/// Parents own their children through handle lists; a slot freed by
/// removal is reused with a bumped generation so stale handles miss.
#[derive(Default)]
pub struct NodeTree {
    entries: Vec<Entry>,
    free: Vec<u32>,
    root: Option<NodeHandle>,
    epoch: u64,
    len: usize,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: LayoutNode) -> NodeHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.node = Some(node);
            return NodeHandle {
                index,
                generation: entry.generation,
            };
        }
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            node: Some(node),
        });
        NodeHandle {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&LayoutNode> {
        self.entries
            .get(handle.index())
            .filter(|entry| entry.generation == handle.generation)
            .and_then(|entry| entry.node.as_ref())
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut LayoutNode> {
        self.entries
            .get_mut(handle.index())
            .filter(|entry| entry.generation == handle.generation)
            .and_then(|entry| entry.node.as_mut())
    }

    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Removes a single node without touching its children.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<LayoutNode> {
        let entry = self.entries.get_mut(handle.index())?;
        if entry.generation != handle.generation {
            return None;
        }
        let node = entry.node.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        if self.root == Some(handle) {
            self.root = None;
        }
        Some(node)
    }

    /// Removes `handle` and every descendant, parents before children.
    pub fn remove_subtree(&mut self, handle: NodeHandle) -> Vec<LayoutNode> {
        let mut removed = Vec::new();
        let mut stack = vec![handle];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.remove(next) {
                stack.extend(node.children.iter().rev().copied());
                removed.push(node);
            }
        }
        removed
    }

    /// Empties the arena and returns every node it held.
    pub fn clear(&mut self) -> Vec<LayoutNode> {
        let nodes = self
            .entries
            .drain(..)
            .filter_map(|entry| entry.node)
            .collect();
        self.free.clear();
        self.root = None;
        self.len = 0;
        nodes
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeHandle>) {
        self.root = root;
    }

    /// Number of committed frames; layout caches are valid within one epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    /// Handles reachable from the root in pre-order.
    pub fn handles(&self) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeHandle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.get(handle) {
                order.push(handle);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// First node in pre-order matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&LayoutNode) -> bool) -> Option<NodeHandle> {
        self.handles()
            .into_iter()
            .find(|handle| self.get(*handle).is_some_and(&mut predicate))
    }

    pub fn find_by_key(&self, key: &str) -> Option<NodeHandle> {
        self.find(|node| node.key() == Some(key))
    }

    pub fn find_by_id(&self, id: Identifier) -> Option<NodeHandle> {
        self.find(|node| node.id() == id)
    }

    /// Handles of the children of `handle`, empty for stale handles.
    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        self.get(handle)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }
}

impl fmt::Debug for NodeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeTree")
            .field("len", &self.len)
            .field("root", &self.root)
            .field("epoch", &self.epoch)
            .finish()
    }
}
