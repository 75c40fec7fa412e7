//! 删除 Action

use crate::action::{Action, ActionContext, ActionResult, MouseButton};
use crate::state::Tool;

/// 删除 Action
///
/// 单击删除命中的最上层实体。删除节点时，
/// 文档会级联删除引用它的连接。
pub struct EraseAction;

impl EraseAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EraseAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for EraseAction {
    fn tool(&self) -> Tool {
        Tool::Delete
    }

    fn reset(&mut self) {}

    fn on_cursor_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn on_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => match ctx.hit() {
                Some(id) => ActionResult::DeleteEntities(vec![id.clone()]),
                None => ActionResult::Continue,
            },
            MouseButton::Right => ActionResult::Cancel,
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn prompt(&self) -> &str {
        "选择要删除的对象:"
    }
}
