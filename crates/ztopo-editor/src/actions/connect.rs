//! 连接 Action

use crate::action::{Action, ActionContext, ActionResult, MouseButton};
use crate::state::Tool;
use ztopo_core::entity::{Entity, EntityId, Link};

/// 连接状态
#[derive(Debug, Clone, PartialEq)]
enum Status {
    /// 等待选择起始节点
    PickStart,
    /// 等待选择目标节点
    PickEnd { start: EntityId },
}

/// 连接 Action
///
/// 两次点击创建一条连接：第一次点击选择起始节点，
/// 第二次点击另一个节点完成连接。点击同一节点不产生连接。
/// 完成后回到起始状态，可以连续连线。
pub struct ConnectAction {
    status: Status,
}

impl ConnectAction {
    pub fn new() -> Self {
        Self {
            status: Status::PickStart,
        }
    }

    /// 已选定的起始节点
    pub fn start_node(&self) -> Option<&EntityId> {
        match &self.status {
            Status::PickStart => None,
            Status::PickEnd { start } => Some(start),
        }
    }
}

impl Default for ConnectAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for ConnectAction {
    fn tool(&self) -> Tool {
        Tool::Connect
    }

    fn reset(&mut self) {
        self.status = Status::PickStart;
    }

    fn on_cursor_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn on_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => {
                let Some(node_id) = ctx.hit_node().cloned() else {
                    return ActionResult::Continue;
                };
                match &self.status {
                    Status::PickStart => {
                        self.status = Status::PickEnd { start: node_id };
                        ActionResult::Continue
                    }
                    Status::PickEnd { start } => {
                        // 自连接无意义，停在当前状态等待其他节点
                        if *start == node_id {
                            return ActionResult::Continue;
                        }
                        let link = Link::new(start.clone(), node_id);
                        self.status = Status::PickStart;
                        ActionResult::CreateEntities(vec![Entity::Link(link)])
                    }
                }
            }
            MouseButton::Right => match self.status {
                // 退回上一步，再退则取消
                Status::PickEnd { .. } => {
                    self.status = Status::PickStart;
                    ActionResult::Continue
                }
                Status::PickStart => ActionResult::Cancel,
            },
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn prompt(&self) -> &str {
        match self.status {
            Status::PickStart => "选择起始节点:",
            Status::PickEnd { .. } => "选择目标节点:",
        }
    }
}
