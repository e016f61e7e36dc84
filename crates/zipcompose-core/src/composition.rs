use crate::composer::{Composer, ComposerConfig, FrameStats};
use crate::composition_local::ProvidedValue;
use crate::error::{ComposeError, ComposeResult};
use crate::identity::Identifier;
use crate::layout_node::{dump_tree, DrawScope, NodeCoordinator, NodeHandle, NodeTree, PointerEvent};
use crate::state::PersistentState;
use std::cell::{Cell, Ref};
use std::rc::Rc;
use zipcompose_ui_graphics::{Constraints, Rect, Size};

/// Drives frames: composes the root content with a reused [`Composer`] and
/// runs the layout, pointer and draw phases over the result.
///
/// Any state write marks the composition dirty; the host loop renders again
/// while [`is_dirty`](Self::is_dirty) reports true.
pub struct Composition {
    composer: Composer,
    coordinator: NodeCoordinator,
    root_locals: Vec<ProvidedValue>,
    dirty: Rc<Cell<bool>>,
    frames: u64,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    pub fn new() -> Self {
        Self::with_config(ComposerConfig::default())
    }

    pub fn with_config(config: ComposerConfig) -> Self {
        let store = PersistentState::new();
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        store.set_on_state_change(move || flag.set(true));
        Self {
            composer: Composer::new(store, config),
            coordinator: NodeCoordinator::new(),
            root_locals: Vec::new(),
            dirty,
            frames: 0,
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn store(&self) -> &PersistentState {
        self.composer.store()
    }

    /// Installs a binding underneath every provider in every later frame.
    pub fn provide_root(&mut self, value: ProvidedValue) {
        self.root_locals.push(value);
    }

    /// Adds a hook run after the dirty flag is raised by a state change.
    pub fn on_state_change(&self, callback: impl Fn() + 'static) {
        let flag = Rc::clone(&self.dirty);
        self.store().set_on_state_change(move || {
            flag.set(true);
            callback();
        });
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Composes one frame.
    ///
    /// On error the tree and every state cell are dropped before the error is
    /// returned, so a failed frame never leaves a partial tree behind.
    pub fn render(
        &mut self,
        content: impl FnOnce(&Composer) -> ComposeResult,
    ) -> Result<FrameStats, ComposeError> {
        let composer = &self.composer;
        composer.begin_frame();
        composer.push_provided(self.root_locals.iter().cloned());
        let root_key = composer.config().root_key.clone();
        if let Err(err) = composer.block(&root_key, content) {
            log::error!("composition failed: {err}");
            composer.teardown();
            return Err(err);
        }
        composer.pop_provided();
        composer.finish_frame();
        if let Err(err) = composer.expand_pending() {
            log::error!("modifier expansion failed: {err}");
            composer.teardown();
            return Err(err);
        }
        composer.bump_epoch();
        self.dirty.set(false);
        self.frames += 1;
        let stats = composer.frame_stats();
        log::debug!(
            "frame {}: {} created, {} updated, {} moved, {} pruned, {} expanded",
            self.frames,
            stats.created,
            stats.updated,
            stats.moved,
            stats.pruned,
            stats.expanded
        );
        Ok(stats)
    }

    pub fn layout(&mut self, constraints: Constraints) -> Result<Size, ComposeError> {
        let coordinator = &mut self.coordinator;
        self.composer
            .with_tree_mut(|tree| coordinator.layout(tree, constraints))
    }

    pub fn dispatch_pointer(&self, event: PointerEvent) -> Result<Option<Identifier>, ComposeError> {
        self.composer
            .with_tree(|tree| self.coordinator.dispatch_pointer(tree, &event))
    }

    /// Records the tree into a fresh scope. State writes while drawing are
    /// caught by the store's draw guard.
    pub fn draw(&self) -> Result<DrawScope, ComposeError> {
        let _guard = self.store().draw_guard();
        let mut scope = DrawScope::new();
        self.composer
            .with_tree(|tree| self.coordinator.draw(tree, &mut scope))?;
        Ok(scope)
    }

    /// Layout followed by draw.
    pub fn frame(&mut self, constraints: Constraints) -> Result<DrawScope, ComposeError> {
        self.layout(constraints)?;
        self.draw()
    }

    pub fn root(&self) -> Option<NodeHandle> {
        self.composer.build()
    }

    pub fn tree(&self) -> Ref<'_, NodeTree> {
        self.composer.tree()
    }

    pub fn bounds_of(&self, handle: NodeHandle) -> Option<Rect> {
        self.composer
            .with_tree(|tree| self.coordinator.bounds_of(tree, handle))
    }

    pub fn dump_tree(&self) -> String {
        self.composer.with_tree(dump_tree)
    }

    /// Drops the tree and all state, detaching every behavior.
    pub fn dispose(&mut self) {
        self.composer.teardown();
        self.dirty.set(true);
    }
}
