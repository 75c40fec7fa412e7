//! 具体的 Action 实现
//!
//! 每个编辑工具对应一个 Action 实现

mod connect;
mod edit_text;
mod erase;
mod place_area;
mod place_node;
mod place_text;
mod select;

pub use connect::ConnectAction;
pub use edit_text::EditTextAction;
pub use erase::EraseAction;
pub use place_area::PlaceAreaAction;
pub use place_node::PlaceNodeAction;
pub use place_text::PlaceTextAction;
pub use select::SelectAction;

use crate::action::Action;
use crate::state::Tool;

/// 创建指定工具的 Action
pub fn create_action(tool: Tool) -> Box<dyn Action> {
    match tool {
        Tool::Select => Box::new(SelectAction::new()),
        Tool::Delete => Box::new(EraseAction::new()),
        Tool::Connect => Box::new(ConnectAction::new()),
        Tool::TextEdit => Box::new(EditTextAction::new()),
        Tool::AddNode(kind) => Box::new(PlaceNodeAction::new(kind)),
        Tool::AddTextBox => Box::new(PlaceTextAction::new()),
        Tool::AddBgArea => Box::new(PlaceAreaAction::new()),
    }
}
