//! ZTOPO 编辑器交互逻辑
//!
//! 无界面的编辑器核心：工具选择、每个工具对应的 Action 状态机、
//! 以及把交互结果落到文档上的分发器。渲染与输入事件采集
//! 由外部的画布层负责。

pub mod action;
pub mod actions;
pub mod constants;
pub mod editor;
pub mod state;

pub use action::{Action, ActionContext, ActionResult, MouseButton};
pub use editor::Editor;
pub use state::{Direction, EditState, EditorState, Tool};
