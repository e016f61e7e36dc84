use super::{NodeHandle, NodeTree};
use crate::modifier::Capability;
use zipcompose_ui_graphics::{Color, Point, Rect, Shape};

/// One recorded drawing operation, in absolute coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        color: Color,
        shape: Shape,
    },
    Stroke {
        rect: Rect,
        width: f32,
        color: Color,
        shape: Shape,
    },
    PushClip {
        rect: Rect,
        shape: Shape,
    },
    PopClip,
    PushScale {
        pivot: Point,
        scale_x: f32,
        scale_y: f32,
    },
    PopTransform,
    Text {
        origin: Point,
        text: String,
        color: Color,
    },
}

/// Headless recording target for the draw phase. A renderer replays the
/// commands; tests assert on them directly.
#[derive(Clone, Debug, Default)]
pub struct DrawScope {
    commands: Vec<DrawCommand>,
    clip_depth: usize,
    transform_depth: usize,
}

impl DrawScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, rect: Rect, color: Color, shape: Shape) {
        self.commands.push(DrawCommand::Fill { rect, color, shape });
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill(rect, color, Shape::Rectangle);
    }

    pub fn stroke(&mut self, rect: Rect, width: f32, color: Color, shape: Shape) {
        self.commands.push(DrawCommand::Stroke {
            rect,
            width,
            color,
            shape,
        });
    }

    pub fn draw_text(&mut self, origin: Point, text: impl Into<String>, color: Color) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.into(),
            color,
        });
    }

    pub fn push_clip(&mut self, rect: Rect, shape: Shape) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip { rect, shape });
    }

    pub fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            log::warn!("pop_clip without a matching push_clip");
            return;
        }
        self.clip_depth -= 1;
        self.commands.push(DrawCommand::PopClip);
    }

    pub fn push_scale(&mut self, pivot: Point, scale_x: f32, scale_y: f32) {
        self.transform_depth += 1;
        self.commands.push(DrawCommand::PushScale {
            pivot,
            scale_x,
            scale_y,
        });
    }

    pub fn pop_transform(&mut self) {
        if self.transform_depth == 0 {
            log::warn!("pop_transform without a matching push");
            return;
        }
        self.transform_depth -= 1;
        self.commands.push(DrawCommand::PopTransform);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True when every clip and transform push has been popped.
    pub fn is_balanced(&self) -> bool {
        self.clip_depth == 0 && self.transform_depth == 0
    }
}

pub(crate) fn draw_tree(tree: &NodeTree, root: NodeHandle, scope: &mut DrawScope) {
    if let Some(node) = tree.get(root) {
        draw_node(tree, root, node.layout.position, scope);
    }
}

fn draw_node(tree: &NodeTree, handle: NodeHandle, origin: Point, scope: &mut DrawScope) {
    let Some(node) = tree.get(handle) else {
        return;
    };
    let layout = &node.layout;
    let draws = if node.capabilities.supports(Capability::Draw) {
        node.element_store.draw_behaviors()
    } else {
        Vec::new()
    };

    for stored in &draws {
        let bounds = layout
            .region(stored.layout_depth())
            .translate(origin.x, origin.y);
        if let Some(draw) = stored.behavior().borrow().as_draw() {
            draw.draw(scope, bounds);
        }
    }

    let content = layout.content().translate(origin.x, origin.y);
    match node.widget() {
        Ok(widget) => widget.draw(scope, content),
        Err(err) => log::error!("skipping widget draw for {}: {err}", node.id),
    }
    for child in &node.children {
        if let Some(child_node) = tree.get(*child) {
            draw_node(tree, *child, content.origin() + child_node.layout.position, scope);
        }
    }

    for stored in draws.iter().rev() {
        let bounds = layout
            .region(stored.layout_depth())
            .translate(origin.x, origin.y);
        if let Some(draw) = stored.behavior().borrow().as_draw() {
            draw.draw_after(scope, bounds);
        }
    }
}
