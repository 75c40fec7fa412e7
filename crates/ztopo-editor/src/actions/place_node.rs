//! 放置节点 Action

use crate::action::{Action, ActionContext, ActionResult, MouseButton};
use crate::constants::{node_default_color, DEFAULT_NODE_SIZE};
use crate::state::Tool;
use ztopo_core::entity::{Entity, Node, NodeKind};

/// 放置节点 Action
///
/// 单击在光标处创建一个节点，`kind` 取自激活的放置工具。
/// 不离开工具，可以连续放置。
pub struct PlaceNodeAction {
    kind: NodeKind,
}

impl PlaceNodeAction {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind }
    }
}

impl Action for PlaceNodeAction {
    fn tool(&self) -> Tool {
        Tool::AddNode(self.kind)
    }

    fn reset(&mut self) {}

    fn on_cursor_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn on_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => {
                let node = Node::new(
                    self.kind,
                    ctx.cursor,
                    DEFAULT_NODE_SIZE,
                    node_default_color(self.kind),
                );
                ActionResult::CreateEntities(vec![Entity::Node(node)])
            }
            MouseButton::Right => ActionResult::Cancel,
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn prompt(&self) -> &str {
        "指定节点位置:"
    }
}
