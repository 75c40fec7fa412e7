//! 选择 Action

use crate::action::{Action, ActionContext, ActionResult, MouseButton};
use crate::state::Tool;
use ztopo_core::entity::EntityId;
use ztopo_core::math::{BoundingBox2, Point2};

/// 选择状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 空闲，等待选择
    Idle,
    /// 正在框选
    BoxSelect { start: Point2 },
}

/// 选择 Action
///
/// 点击命中实体时选中它；点击空白处开始框选，
/// 第二次点击完成框选，选中完全落在框内的实体。
pub struct SelectAction {
    status: Status,
}

impl SelectAction {
    pub fn new() -> Self {
        Self {
            status: Status::Idle,
        }
    }

    /// 是否正在框选
    pub fn is_box_selecting(&self) -> bool {
        matches!(self.status, Status::BoxSelect { .. })
    }

    /// 框内的实体（实体包围盒完全落在框内）
    fn entities_in_box(ctx: &ActionContext, start: Point2, end: Point2) -> Vec<EntityId> {
        let rect = BoundingBox2::from_points([start, end]);
        ctx.document
            .iter()
            .filter(|entity| {
                entity
                    .bounding_box()
                    .is_some_and(|b| rect.contains(&b.min) && rect.contains(&b.max))
            })
            .map(|entity| entity.id().clone())
            .collect()
    }
}

impl Default for SelectAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for SelectAction {
    fn tool(&self) -> Tool {
        Tool::Select
    }

    fn reset(&mut self) {
        self.status = Status::Idle;
    }

    fn on_cursor_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn on_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => match self.status {
                Status::Idle => {
                    if let Some(id) = ctx.hit() {
                        return ActionResult::SetSelection(vec![id.clone()]);
                    }
                    self.status = Status::BoxSelect { start: ctx.cursor };
                    ActionResult::Continue
                }
                Status::BoxSelect { start } => {
                    self.status = Status::Idle;
                    ActionResult::SetSelection(Self::entities_in_box(ctx, start, ctx.cursor))
                }
            },
            MouseButton::Right => {
                if self.is_box_selecting() {
                    self.status = Status::Idle;
                    ActionResult::Continue
                } else {
                    ActionResult::Cancel
                }
            }
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn prompt(&self) -> &str {
        match self.status {
            Status::Idle => "选择对象:",
            Status::BoxSelect { .. } => "指定对角点:",
        }
    }
}
