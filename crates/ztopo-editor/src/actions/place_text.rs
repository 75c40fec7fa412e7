//! 放置文本框 Action

use crate::action::{Action, ActionContext, ActionResult, MouseButton};
use crate::constants::{DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR};
use crate::state::Tool;
use ztopo_core::entity::{Entity, TextBox};

/// 放置文本框 Action
///
/// 单击在光标处创建一个空文本框；分发器随后直接进入文本编辑。
pub struct PlaceTextAction;

impl PlaceTextAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlaceTextAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PlaceTextAction {
    fn tool(&self) -> Tool {
        Tool::AddTextBox
    }

    fn reset(&mut self) {}

    fn on_cursor_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn on_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => {
                let text_box = TextBox::new(ctx.cursor, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR);
                ActionResult::CreateEntities(vec![Entity::TextBox(text_box)])
            }
            MouseButton::Right => ActionResult::Cancel,
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn prompt(&self) -> &str {
        "指定文本位置:"
    }
}
