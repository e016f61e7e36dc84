//! Minimal headless host: owns the composition, renders while dirty and
//! turns clicks on named blocks into pointer events.

use anyhow::{anyhow, Context};
use zipcompose_core::layout_node::{DrawCommand, PointerEvent};
use zipcompose_core::{ComposeResult, Composer, Composition};
use zipcompose_ui::graphics::{Constraints, Point, Size};
use zipcompose_ui::{local_theme_manager, ThemeManager};

const MAX_FRAMES_PER_TICK: usize = 8;

pub struct HeadlessHost<F> {
    composition: Composition,
    content: F,
    viewport: Size,
    commands: Vec<DrawCommand>,
}

impl<F> HeadlessHost<F>
where
    F: Fn(&Composer) -> ComposeResult,
{
    pub fn new(viewport: Size, theme: ThemeManager, content: F) -> Self {
        let mut composition = Composition::new();
        composition.provide_root(local_theme_manager().provides(theme));
        Self {
            composition,
            content,
            viewport,
            commands: Vec::new(),
        }
    }

    /// Renders frames until no state change is pending. Returns how many
    /// frames ran.
    pub fn tick(&mut self) -> anyhow::Result<usize> {
        let mut frames = 0;
        while self.composition.is_dirty() {
            if frames == MAX_FRAMES_PER_TICK {
                log::warn!("still dirty after {frames} frames; yielding");
                break;
            }
            let stats = self.composition.render(&self.content)?;
            log::info!(
                "frame {}: {} created, {} pruned",
                self.composition.frame_count(),
                stats.created,
                stats.pruned
            );
            let constraints = Constraints::tight(self.viewport.width, self.viewport.height);
            self.commands = self.composition.frame(constraints)?.into_commands();
            frames += 1;
        }
        Ok(frames)
    }

    /// Clicks the center of the first node composed under `key`.
    pub fn click(&mut self, key: &str) -> anyhow::Result<()> {
        let center = self
            .center_of(key)
            .with_context(|| format!("no node named `{key}`"))?;
        for event in [PointerEvent::down(center.x, center.y), PointerEvent::up(center.x, center.y)] {
            if self.composition.dispatch_pointer(event)?.is_none() {
                return Err(anyhow!("click on `{key}` was not consumed"));
            }
        }
        log::debug!("clicked `{key}` at ({}, {})", center.x, center.y);
        Ok(())
    }

    fn center_of(&self, key: &str) -> Option<Point> {
        let handle = {
            let tree = self.composition.tree();
            let found = tree
                .handles()
                .into_iter()
                .find(|handle| tree.get(*handle).and_then(|node| node.key()) == Some(key));
            found
        }?;
        let bounds = self.composition.bounds_of(handle)?;
        Some(bounds.origin() + bounds.size().center())
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn dump_tree(&self) -> String {
        self.composition.dump_tree()
    }
}
