use super::{coordinator, DrawScope, LayoutNode, NodeHandle, NodeTree};
use crate::error::ComposeError;
use crate::hash::hash_value;
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use zipcompose_ui_graphics::{Constraints, Point, Rect, Size};

/// Measures and places a node's children and optionally draws the node's
/// own content. Widgets read the tree but never restructure it.
pub trait Widget {
    fn layout(
        &self,
        constraints: Constraints,
        children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError>;

    fn draw(&self, _scope: &mut DrawScope, _bounds: Rect) {}
}

type BuildWidget = Rc<dyn Fn(&LayoutNode) -> Result<Rc<dyn Widget>, ComposeError>>;

/// Deferred widget factory stored on a node.
///
/// The factory runs the first time a phase needs the widget. The latest
/// factory always replaces the stored one; the cached widget it produced is
/// dropped when the node's slots change or when the new factory's `inputs`
/// differ from the previous one's.
#[derive(Clone)]
pub struct WidgetConstructor {
    inputs: u64,
    build: BuildWidget,
}

impl WidgetConstructor {
    pub fn new(build: impl Fn(&LayoutNode) -> Rc<dyn Widget> + 'static) -> Self {
        Self::try_new(move |node| Ok(build(node)))
    }

    /// Factory that can fail, typically on a slot holding the wrong kind of
    /// value. The error aborts the phase that asked for the widget.
    pub fn try_new(
        build: impl Fn(&LayoutNode) -> Result<Rc<dyn Widget>, ComposeError> + 'static,
    ) -> Self {
        Self {
            inputs: 0,
            build: Rc::new(build),
        }
    }

    /// Factory whose cached widget is kept only while `inputs` hashes the same.
    pub fn with_inputs<K: Hash + ?Sized>(
        inputs: &K,
        build: impl Fn(&LayoutNode) -> Rc<dyn Widget> + 'static,
    ) -> Self {
        Self::try_with_inputs(inputs, move |node| Ok(build(node)))
    }

    pub fn try_with_inputs<K: Hash + ?Sized>(
        inputs: &K,
        build: impl Fn(&LayoutNode) -> Result<Rc<dyn Widget>, ComposeError> + 'static,
    ) -> Self {
        Self {
            inputs: hash_value(inputs),
            build: Rc::new(build),
        }
    }

    pub fn inputs(&self) -> u64 {
        self.inputs
    }

    pub(crate) fn build(&self, node: &LayoutNode) -> Result<Rc<dyn Widget>, ComposeError> {
        (self.build)(node)
    }
}

impl fmt::Debug for WidgetConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConstructor")
            .field("inputs", &format_args!("{:016x}", self.inputs))
            .finish()
    }
}

/// Widget used when a node has no constructor: children stacked at the
/// origin, sized to the largest child within the constraints.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityWidget;

impl Widget for IdentityWidget {
    fn layout(
        &self,
        constraints: Constraints,
        children: &mut ChildMeasurer<'_>,
    ) -> Result<Size, ComposeError> {
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        for index in 0..children.len() {
            let size = children.measure(index, constraints.loosen())?;
            children.place(index, Point::ZERO);
            width = width.max(size.width);
            height = height.max(size.height);
        }
        let (width, height) = constraints.constrain(width, height);
        Ok(Size::new(width, height))
    }
}

/// Access to the children of the node being laid out.
pub struct ChildMeasurer<'a> {
    tree: &'a mut NodeTree,
    children: SmallVec<[NodeHandle; 8]>,
}

impl<'a> ChildMeasurer<'a> {
    pub(crate) fn new(tree: &'a mut NodeTree, children: &[NodeHandle]) -> Self {
        Self {
            tree,
            children: children.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Key of child `index`, handy for widgets that treat children differently.
    pub fn key(&self, index: usize) -> Option<&str> {
        self.children
            .get(index)
            .and_then(|handle| self.tree.get(*handle))
            .and_then(|node| node.key())
    }

    pub fn measure(&mut self, index: usize, constraints: Constraints) -> Result<Size, ComposeError> {
        match self.children.get(index) {
            Some(handle) => coordinator::measure_node(self.tree, *handle, constraints),
            None => {
                log::warn!("measure of child {index} out of {}", self.children.len());
                Ok(Size::ZERO)
            }
        }
    }

    /// Positions child `index` relative to the content origin.
    pub fn place(&mut self, index: usize, position: Point) {
        if let Some(node) = self
            .children
            .get(index)
            .and_then(|handle| self.tree.get_mut(*handle))
        {
            node.layout.position = position;
        }
    }

    /// Last measured size of child `index`.
    pub fn size(&self, index: usize) -> Size {
        self.children
            .get(index)
            .and_then(|handle| self.tree.get(*handle))
            .map(|node| node.layout.size)
            .unwrap_or(Size::ZERO)
    }
}
