//! 编辑器共享常量
//!
//! 集中存放交互与新建实体使用的可调数值。

use ztopo_core::entity::NodeKind;

/// 新建节点的默认图标尺寸（世界单位）
pub const DEFAULT_NODE_SIZE: f64 = 60.0;

/// 新建文本框的默认字体大小
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// 新建文本框的默认颜色
pub const DEFAULT_TEXT_COLOR: &str = "#222222";

/// 新建背景区域的默认半径（世界单位）
pub const DEFAULT_AREA_RADIUS: f64 = 120.0;

/// 新建背景区域的默认颜色
pub const DEFAULT_AREA_COLOR: &str = "#e8f0fe";

/// 点击测试容差（世界单位）
pub const HIT_TOLERANCE: f64 = 4.0;

/// 键盘微移步长（世界单位）
pub const NUDGE_STEP: f64 = 5.0;

/// 节点类型的默认颜色
pub fn node_default_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Computer => "#4a90d9",
        NodeKind::Server => "#7b5ea7",
        NodeKind::Router => "#d97b4a",
        NodeKind::Switch => "#4ab07a",
        NodeKind::Cloud => "#9aa7b8",
    }
}
