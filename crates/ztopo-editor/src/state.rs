//! 编辑器状态管理

use ztopo_core::entity::{EntityId, NodeKind};
use ztopo_core::math::Vector2;

/// 当前编辑工具
///
/// 同一时刻只有一个工具处于激活状态。放置类工具携带要创建的
/// 实体类型，其标签与创建出的实体的 `kind` 字段共用同一词汇。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Delete,
    Connect,
    TextEdit,
    AddNode(NodeKind),
    AddTextBox,
    AddBgArea,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Delete => "Delete",
            Tool::Connect => "Connect",
            Tool::TextEdit => "Text Edit",
            Tool::AddNode(NodeKind::Computer) => "Add Computer",
            Tool::AddNode(NodeKind::Server) => "Add Server",
            Tool::AddNode(NodeKind::Router) => "Add Router",
            Tool::AddNode(NodeKind::Switch) => "Add Switch",
            Tool::AddNode(NodeKind::Cloud) => "Add Cloud",
            Tool::AddTextBox => "Add Text Box",
            Tool::AddBgArea => "Add Background Area",
        }
    }

    pub fn shortcut(&self) -> Option<&'static str> {
        match self {
            Tool::Select => Some("Space"),
            Tool::Delete => Some("E"),
            Tool::Connect => Some("C"),
            Tool::TextEdit => Some("T"),
            Tool::AddNode(NodeKind::Computer) => Some("1"),
            Tool::AddNode(NodeKind::Server) => Some("2"),
            Tool::AddNode(NodeKind::Router) => Some("3"),
            Tool::AddNode(NodeKind::Switch) => Some("4"),
            Tool::AddNode(NodeKind::Cloud) => Some("5"),
            Tool::AddTextBox => Some("6"),
            Tool::AddBgArea => Some("7"),
        }
    }

    /// 放置类工具创建的实体类型标签
    pub fn kind_tag(&self) -> Option<&'static str> {
        match self {
            Tool::AddNode(kind) => Some(kind.as_str()),
            Tool::AddTextBox => Some("text-box"),
            Tool::AddBgArea => Some("bg-area"),
            _ => None,
        }
    }

    /// 是否是放置类工具
    pub fn is_placement(&self) -> bool {
        self.kind_tag().is_some()
    }
}

/// 方向（用于键盘微移）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// 按步长生成位移向量（画布Y轴向下）
    pub fn vector(&self, step: f64) -> Vector2 {
        match self {
            Direction::Up => Vector2::new(0.0, -step),
            Direction::Down => Vector2::new(0.0, step),
            Direction::Left => Vector2::new(-step, 0.0),
            Direction::Right => Vector2::new(step, 0.0),
        }
    }
}

/// 编辑状态
#[derive(Debug, Clone)]
pub enum EditState {
    /// 空闲
    Idle,
    /// 正在拖拽实体
    Dragging {
        id: EntityId,
        /// 按下点相对实体位置的偏移，避免拖拽时跳动
        grab: Vector2,
    },
    /// 正在编辑文本
    EditingText { id: EntityId, buffer: String },
}

impl Default for EditState {
    fn default() -> Self {
        Self::Idle
    }
}

/// 编辑器状态
#[derive(Debug)]
pub struct EditorState {
    /// 当前工具
    pub current_tool: Tool,

    /// 编辑状态
    pub edit_state: EditState,

    /// 选中的实体
    pub selected_entities: Vec<EntityId>,

    /// 状态栏消息
    pub status_message: String,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            current_tool: Tool::Select,
            edit_state: EditState::Idle,
            selected_entities: Vec::new(),
            status_message: "Ready".to_string(),
        }
    }
}

impl EditorState {
    /// 设置当前工具
    pub fn set_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
        self.edit_state = EditState::Idle;
        self.status_message = match tool {
            Tool::Connect => "Connect 工具已选择。点击起始节点:".to_string(),
            Tool::TextEdit => "Text Edit 工具已选择。点击要编辑的文本框:".to_string(),
            _ => format!("{} 工具已选择", tool.name()),
        };
    }

    /// 取消当前操作
    pub fn cancel(&mut self) {
        if !matches!(self.edit_state, EditState::Idle) {
            self.edit_state = EditState::Idle;
            self.status_message = "Cancelled.".to_string();
            return;
        }
        if self.current_tool != Tool::Select {
            self.set_tool(Tool::Select);
            self.status_message = "Cancelled. Tool reset to Select.".to_string();
        } else if !self.selected_entities.is_empty() {
            self.selected_entities.clear();
            self.status_message = "Selection cleared.".to_string();
        } else {
            self.status_message = "Cancelled.".to_string();
        }
    }

    /// 清空选择
    pub fn clear_selection(&mut self) {
        self.selected_entities.clear();
    }

    /// 添加到选择
    pub fn add_to_selection(&mut self, id: EntityId) {
        if !self.selected_entities.contains(&id) {
            self.selected_entities.push(id);
        }
    }

    /// 从选择中移除
    pub fn remove_from_selection(&mut self, id: &EntityId) {
        self.selected_entities.retain(|e| e != id);
    }

    /// 切换选择状态
    pub fn toggle_selection(&mut self, id: EntityId) {
        if self.selected_entities.contains(&id) {
            self.remove_from_selection(&id);
        } else {
            self.add_to_selection(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_tags_match_node_kinds() {
        for kind in NodeKind::ALL {
            assert_eq!(Tool::AddNode(kind).kind_tag(), Some(kind.as_str()));
        }
        assert_eq!(Tool::AddTextBox.kind_tag(), Some("text-box"));
        assert_eq!(Tool::AddBgArea.kind_tag(), Some("bg-area"));
        assert_eq!(Tool::Select.kind_tag(), None);
        assert!(!Tool::Delete.is_placement());
        assert!(Tool::AddNode(NodeKind::Cloud).is_placement());
    }

    #[test]
    fn test_direction_vectors() {
        assert_eq!(Direction::Up.vector(5.0), Vector2::new(0.0, -5.0));
        assert_eq!(Direction::Down.vector(5.0), Vector2::new(0.0, 5.0));
        assert_eq!(Direction::Left.vector(2.0), Vector2::new(-2.0, 0.0));
        assert_eq!(Direction::Right.vector(2.0), Vector2::new(2.0, 0.0));
    }

    #[test]
    fn test_selection_ops() {
        let mut state = EditorState::default();
        let a = EntityId::fresh();
        let b = EntityId::fresh();

        state.add_to_selection(a.clone());
        state.add_to_selection(a.clone());
        state.add_to_selection(b.clone());
        assert_eq!(state.selected_entities.len(), 2);

        state.toggle_selection(a.clone());
        assert_eq!(state.selected_entities, vec![b.clone()]);

        state.clear_selection();
        assert!(state.selected_entities.is_empty());
    }

    #[test]
    fn test_cancel_ladder() {
        let mut state = EditorState::default();
        state.set_tool(Tool::Connect);
        state.add_to_selection(EntityId::fresh());

        // 第一次取消：切回选择工具
        state.cancel();
        assert_eq!(state.current_tool, Tool::Select);

        // 第二次取消：清空选择
        state.cancel();
        assert!(state.selected_entities.is_empty());
    }
}
