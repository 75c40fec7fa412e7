//! 文本编辑 Action

use crate::action::{Action, ActionContext, ActionResult, MouseButton};
use crate::state::Tool;

/// 文本编辑 Action
///
/// 单击文本框开始编辑；点击其他实体或空白处不做任何事。
pub struct EditTextAction;

impl EditTextAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EditTextAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for EditTextAction {
    fn tool(&self) -> Tool {
        Tool::TextEdit
    }

    fn reset(&mut self) {}

    fn on_cursor_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn on_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => {
                let hit = ctx.hit().filter(|id| {
                    ctx.document
                        .get(id)
                        .is_some_and(|e| e.as_text_box().is_some())
                });
                match hit {
                    Some(id) => ActionResult::BeginTextEdit(id.clone()),
                    None => ActionResult::Continue,
                }
            }
            MouseButton::Right => ActionResult::Cancel,
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn prompt(&self) -> &str {
        "点击要编辑的文本框:"
    }
}
