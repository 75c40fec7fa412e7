//! 放置背景区域 Action

use crate::action::{Action, ActionContext, ActionResult, MouseButton};
use crate::constants::{DEFAULT_AREA_COLOR, DEFAULT_AREA_RADIUS};
use crate::state::Tool;
use ztopo_core::entity::{Entity, Shape, ShapeKind};

/// 放置背景区域 Action
///
/// 单击在光标处创建一个背景区域形状。
pub struct PlaceAreaAction;

impl PlaceAreaAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlaceAreaAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PlaceAreaAction {
    fn tool(&self) -> Tool {
        Tool::AddBgArea
    }

    fn reset(&mut self) {}

    fn on_cursor_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    fn on_click(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => {
                let shape = Shape::new(
                    ShapeKind::BgArea,
                    ctx.cursor,
                    DEFAULT_AREA_RADIUS,
                    DEFAULT_AREA_COLOR,
                );
                ActionResult::CreateEntities(vec![Entity::Shape(shape)])
            }
            MouseButton::Right => ActionResult::Cancel,
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn prompt(&self) -> &str {
        "指定区域中心:"
    }
}
