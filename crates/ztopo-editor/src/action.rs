//! Action 系统
//!
//! 每个编辑工具是一个独立的 Action 实现，采用状态机模式
//! 处理用户交互。Action 不直接改写文档：它返回 `ActionResult`，
//! 由分发器（`Editor`）落到文档上。

use crate::constants::HIT_TOLERANCE;
use crate::state::Tool;
use ztopo_core::document::Document;
use ztopo_core::entity::{Entity, EntityId};
use ztopo_core::math::Point2;

/// Action 执行结果
#[derive(Debug, Clone)]
pub enum ActionResult {
    /// 继续当前 action
    Continue,
    /// 创建实体
    CreateEntities(Vec<Entity>),
    /// 删除实体
    DeleteEntities(Vec<EntityId>),
    /// 改写当前选择
    SetSelection(Vec<EntityId>),
    /// 开始编辑指定文本框
    BeginTextEdit(EntityId),
    /// 取消当前 action
    Cancel,
}

/// 鼠标按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Action 上下文 - 传递给 Action 的运行时信息
pub struct ActionContext<'a> {
    /// 光标的世界坐标
    pub cursor: Point2,
    /// 当前选中的实体
    pub selected_entities: &'a [EntityId],
    /// 当前文档（只读，用于命中测试）
    pub document: &'a Document,
}

impl<'a> ActionContext<'a> {
    /// 光标位置命中的最上层实体
    pub fn hit(&self) -> Option<&'a EntityId> {
        self.document.hit_test(&self.cursor, HIT_TOLERANCE)
    }

    /// 光标位置命中的节点（命中非节点实体时返回 None）
    pub fn hit_node(&self) -> Option<&'a EntityId> {
        self.hit().filter(|id| self.document.get_node(id).is_some())
    }
}

/// Action trait - 所有编辑工具的核心接口
pub trait Action: Send {
    /// 对应的工具
    fn tool(&self) -> Tool;

    /// 获取 action 名称
    fn name(&self) -> &'static str {
        self.tool().name()
    }

    /// 重置 action 状态
    fn reset(&mut self);

    /// 光标移动事件
    fn on_cursor_move(&mut self, ctx: &ActionContext) -> ActionResult;

    /// 鼠标点击事件
    fn on_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult;

    /// 获取当前状态的提示文本
    fn prompt(&self) -> &str;
}
