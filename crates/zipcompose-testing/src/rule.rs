//! Headless frame loop for driving a composition from tests.
//!
//! # Example
//!
//! ```ignore
//! let mut rule = ComposeTestRule::new(200.0, 100.0);
//! rule.set_content(|composer| counter(composer))?;
//! rule.find_by_key("increment").click()?;
//! assert!(rule.texts().contains(&"1".to_string()));
//! ```

use std::rc::Rc;
use zipcompose_core::layout_node::{DrawCommand, NodeHandle, PointerEvent, SlotValue};
use zipcompose_core::{
    ComposeError, ComposeResult, Composer, ComposerConfig, Composition, FrameStats, Identifier,
    ProvidedValue,
};
use zipcompose_ui_graphics::{Constraints, Point, Rect, Size};

/// Upper bound on frames rendered by one [`ComposeTestRule::wait_for_idle`].
pub const MAX_SETTLE_FRAMES: usize = 10;

type Content = Rc<dyn Fn(&Composer) -> ComposeResult>;

/// Owns a [`Composition`] and its content and renders frames on demand.
///
/// Every frame runs composition, layout and draw against a tight viewport;
/// the recorded draw commands of the latest frame are kept for assertions.
pub struct ComposeTestRule {
    composition: Composition,
    content: Option<Content>,
    viewport: Size,
    commands: Vec<DrawCommand>,
    last_stats: FrameStats,
}

impl ComposeTestRule {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(ComposerConfig::default(), width, height)
    }

    pub fn with_config(config: ComposerConfig, width: f32, height: f32) -> Self {
        Self {
            composition: Composition::with_config(config),
            content: None,
            viewport: Size::new(width, height),
            commands: Vec::new(),
            last_stats: FrameStats::default(),
        }
    }

    /// Binds `value` under every frame's content.
    pub fn provide_root(&mut self, value: ProvidedValue) {
        self.composition.provide_root(value);
    }

    /// Installs `content` and renders until nothing is left to recompose.
    pub fn set_content(
        &mut self,
        content: impl Fn(&Composer) -> ComposeResult + 'static,
    ) -> Result<(), ComposeError> {
        self.content = Some(Rc::new(content));
        self.pump_frame()?;
        self.wait_for_idle().map(|_| ())
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the viewport and lays out again without recomposing.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<(), ComposeError> {
        self.viewport = Size::new(width, height);
        self.redraw()
    }

    /// Renders one full frame regardless of the dirty flag.
    pub fn pump_frame(&mut self) -> Result<FrameStats, ComposeError> {
        let Some(content) = self.content.clone() else {
            log::warn!("pump_frame called before set_content");
            return Ok(FrameStats::default());
        };
        self.last_stats = self.composition.render(|composer| content(composer))?;
        self.redraw()?;
        Ok(self.last_stats)
    }

    /// Renders frames while state changes keep marking the composition dirty.
    /// Returns the number of frames rendered.
    pub fn wait_for_idle(&mut self) -> Result<usize, ComposeError> {
        let mut frames = 0;
        while self.composition.is_dirty() && frames < MAX_SETTLE_FRAMES {
            self.pump_frame()?;
            frames += 1;
        }
        if self.composition.is_dirty() {
            log::warn!("composition still dirty after {MAX_SETTLE_FRAMES} frames");
        }
        Ok(frames)
    }

    fn redraw(&mut self) -> Result<(), ComposeError> {
        let constraints = Constraints::tight(self.viewport.width, self.viewport.height);
        let scope = self.composition.frame(constraints)?;
        if !scope.is_balanced() {
            log::warn!("frame left clip or transform stacks unbalanced");
        }
        self.commands = scope.into_commands();
        Ok(())
    }

    /// Sends `event` into the tree without settling. Returns the node that
    /// consumed it.
    pub fn send(&mut self, event: PointerEvent) -> Result<Option<Identifier>, ComposeError> {
        self.composition.dispatch_pointer(event)
    }

    /// Presses and releases at `(x, y)`, then settles. Returns whether either
    /// event was consumed.
    pub fn click_at(&mut self, x: f32, y: f32) -> Result<bool, ComposeError> {
        let down = self.send(PointerEvent::down(x, y))?;
        let up = self.send(PointerEvent::up(x, y))?;
        self.wait_for_idle()?;
        Ok(down.is_some() || up.is_some())
    }

    /// Press, move to the end point, release; then settles.
    pub fn drag(&mut self, from: Point, to: Point) -> Result<(), ComposeError> {
        self.send(PointerEvent::down(from.x, from.y))?;
        self.send(PointerEvent::moved(to.x, to.y))?;
        self.send(PointerEvent::up(to.x, to.y))?;
        self.wait_for_idle().map(|_| ())
    }

    /// Nodes composed under block key `key`, in tree order.
    pub fn find_by_key(&mut self, key: &str) -> NodeFinder<'_> {
        self.find_where(|node_key, _| node_key == Some(key))
    }

    /// Nodes whose `text` slot equals `text`.
    pub fn find_by_text(&mut self, text: &str) -> NodeFinder<'_> {
        self.find_where(|_, slot| matches!(slot, Some(SlotValue::Text(value)) if value == text))
    }

    fn find_where(&mut self, matches: impl Fn(Option<&str>, Option<&SlotValue>) -> bool) -> NodeFinder<'_> {
        let handles = {
            let tree = self.composition.tree();
            let matching: Vec<NodeHandle> = tree
                .handles()
                .into_iter()
                .filter(|handle| {
                    tree.get(*handle)
                        .is_some_and(|node| matches(node.key(), node.slot("text")))
                })
                .collect();
            matching
        };
        NodeFinder {
            rule: self,
            handles,
        }
    }

    /// Draw commands recorded by the latest frame.
    pub fn draw_commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text drawn by the latest frame, in paint order.
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn frame_count(&self) -> u64 {
        self.composition.frame_count()
    }

    pub fn dump_tree(&self) -> String {
        self.composition.dump_tree()
    }

    /// Prints the tree to stdout, for use while writing a test.
    pub fn print_tree(&self) {
        println!("{}", self.dump_tree());
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }
}

/// Result of a node query against the current tree.
pub struct NodeFinder<'a> {
    rule: &'a mut ComposeTestRule,
    handles: Vec<NodeHandle>,
}

impl NodeFinder<'_> {
    pub fn exists(&self) -> bool {
        !self.handles.is_empty()
    }

    pub fn count(&self) -> usize {
        self.handles.len()
    }

    /// Narrows the query to its `index`th match.
    pub fn nth(mut self, index: usize) -> Self {
        self.handles = self.handles.get(index).copied().into_iter().collect();
        self
    }

    pub fn handle(&self) -> Option<NodeHandle> {
        self.handles.first().copied()
    }

    /// Absolute bounds of the first match.
    pub fn bounds(&self) -> Option<Rect> {
        self.handle()
            .and_then(|handle| self.rule.composition.bounds_of(handle))
    }

    pub fn center(&self) -> Option<Point> {
        self.bounds().map(|rect| rect.origin() + rect.size().center())
    }

    /// Clicks the center of the first match. Returns false when nothing
    /// matched or nothing consumed the click.
    pub fn click(self) -> Result<bool, ComposeError> {
        match self.center() {
            Some(point) => self.rule.click_at(point.x, point.y),
            None => Ok(false),
        }
    }

    pub fn assert_exists(&self) {
        assert!(self.exists(), "expected a matching node in\n{}", self.rule.dump_tree());
    }

    pub fn assert_not_exists(&self) {
        assert!(
            !self.exists(),
            "expected no matching node, found {} in\n{}",
            self.count(),
            self.rule.dump_tree()
        );
    }
}
