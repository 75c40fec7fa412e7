//! 编辑器分发器
//!
//! 持有文档、编辑器状态和当前激活的 Action，把交互事件
//! 路由给 Action，并把 `ActionResult` 落到文档上。
//! 文档层拒绝的操作转为状态栏消息和日志，不会中断编辑。

use crate::action::{ActionContext, ActionResult, MouseButton};
use crate::actions::create_action;
use crate::constants::{HIT_TOLERANCE, NUDGE_STEP};
use crate::state::{Direction, EditState, EditorState, Tool};
use ztopo_core::document::Document;
use ztopo_core::entity::{Entity, EntityId};
use ztopo_core::math::Point2;

/// 编辑器分发器
pub struct Editor {
    document: Document,
    state: EditorState,
    action: Box<dyn crate::action::Action>,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// 基于已有文档创建编辑器
    pub fn with_document(document: Document) -> Self {
        let state = EditorState::default();
        let action = create_action(state.current_tool);
        Self {
            document,
            state,
            action,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// 当前 Action 的提示文本
    pub fn prompt(&self) -> &str {
        self.action.prompt()
    }

    /// 切换当前工具
    pub fn set_tool(&mut self, tool: Tool) {
        self.state.set_tool(tool);
        self.action = create_action(tool);
    }

    /// 鼠标点击事件
    pub fn on_click(&mut self, pos: Point2, button: MouseButton) {
        // 点击画布视为确认正在编辑的文本
        if matches!(self.state.edit_state, EditState::EditingText { .. }) {
            self.commit_text();
        }
        let ctx = ActionContext {
            cursor: pos,
            selected_entities: &self.state.selected_entities,
            document: &self.document,
        };
        let result = self.action.on_click(&ctx, button);
        self.apply(result);
    }

    /// 光标移动事件
    pub fn on_cursor_move(&mut self, pos: Point2) {
        let ctx = ActionContext {
            cursor: pos,
            selected_entities: &self.state.selected_entities,
            document: &self.document,
        };
        let result = self.action.on_cursor_move(&ctx);
        self.apply(result);
    }

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.action.reset();
        self.state.cancel();
        if self.action.tool() != self.state.current_tool {
            self.action = create_action(self.state.current_tool);
        }
    }

    // ========== 拖拽手势 ==========

    /// 开始拖拽
    ///
    /// 命中可拖拽实体时进入拖拽状态并选中它；
    /// `dragable` 为 false 的实体拒绝拖拽。
    pub fn begin_drag(&mut self, pos: Point2) -> bool {
        let Some(id) = self.document.hit_test(&pos, HIT_TOLERANCE).cloned() else {
            return false;
        };
        let Some(dragable) = self.document.get(&id).and_then(Entity::as_dragable) else {
            self.state.status_message = "Entity cannot be moved.".to_string();
            return false;
        };
        if !dragable.dragable() {
            tracing::warn!(id = %id, "drag refused: entity is not dragable");
            self.state.status_message = "Entity is locked.".to_string();
            return false;
        }
        let grab = pos - dragable.pos();
        self.state.edit_state = EditState::Dragging {
            id: id.clone(),
            grab,
        };
        self.state.selected_entities = vec![id];
        true
    }

    /// 拖拽移动
    pub fn update_drag(&mut self, pos: Point2) {
        if let EditState::Dragging { id, grab } = &self.state.edit_state {
            let id = id.clone();
            let target = pos - *grab;
            if let Err(err) = self.document.move_entity(&id, target) {
                tracing::warn!(id = %id, error = %err, "drag move rejected");
            }
        }
    }

    /// 结束拖拽
    pub fn end_drag(&mut self) {
        if matches!(self.state.edit_state, EditState::Dragging { .. }) {
            self.state.edit_state = EditState::Idle;
            self.state.status_message = "Moved.".to_string();
        }
    }

    /// 微移选中的可拖拽实体
    pub fn nudge(&mut self, direction: Direction) {
        let delta = direction.vector(NUDGE_STEP);
        let ids: Vec<EntityId> = self.state.selected_entities.clone();
        let mut moved = 0usize;
        for id in ids {
            let Some(target) = self
                .document
                .get(&id)
                .and_then(Entity::as_dragable)
                .map(|d| d.pos() + delta)
            else {
                continue;
            };
            match self.document.move_entity(&id, target) {
                Ok(()) => moved += 1,
                Err(err) => tracing::warn!(id = %id, error = %err, "nudge rejected"),
            }
        }
        if moved > 0 {
            self.state.status_message = format!("Moved {} entities", moved);
        }
    }

    // ========== 文本编辑 ==========

    /// 追加输入的文本
    pub fn text_input(&mut self, input: &str) {
        if let EditState::EditingText { buffer, .. } = &mut self.state.edit_state {
            buffer.push_str(input);
        }
    }

    /// 删除末尾一个字符
    pub fn text_backspace(&mut self) {
        if let EditState::EditingText { buffer, .. } = &mut self.state.edit_state {
            buffer.pop();
        }
    }

    /// 确认文本编辑，写回文档
    pub fn commit_text(&mut self) {
        if let EditState::EditingText { id, buffer } = std::mem::take(&mut self.state.edit_state) {
            match self.document.set_text(&id, buffer) {
                Ok(()) => self.state.status_message = "Text updated.".to_string(),
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "text commit rejected");
                    self.state.status_message = err.to_string();
                }
            }
        }
    }

    /// 放弃文本编辑
    pub fn abort_text(&mut self) {
        if matches!(self.state.edit_state, EditState::EditingText { .. }) {
            self.state.edit_state = EditState::Idle;
            self.state.status_message = "Edit cancelled.".to_string();
        }
    }

    /// 把 Action 结果落到文档上
    fn apply(&mut self, result: ActionResult) {
        match result {
            ActionResult::Continue => {}
            ActionResult::CreateEntities(entities) => {
                for entity in entities {
                    let type_name = entity.type_name();
                    let was_text_box = matches!(entity, Entity::TextBox(_));
                    match self.document.insert(entity) {
                        Ok(id) => {
                            self.state.status_message = format!("{} created", type_name);
                            // 新建文本框直接进入编辑
                            if was_text_box && self.state.current_tool == Tool::AddTextBox {
                                self.begin_text_edit(&id);
                            }
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "create entity rejected");
                            self.state.status_message = err.to_string();
                        }
                    }
                }
            }
            ActionResult::DeleteEntities(ids) => {
                for id in ids {
                    match self.document.remove(&id) {
                        Ok(entity) => {
                            self.state.remove_from_selection(&id);
                            self.state.status_message = format!("{} deleted", entity.type_name());
                        }
                        Err(err) => {
                            tracing::warn!(id = %id, error = %err, "delete rejected");
                            self.state.status_message = err.to_string();
                        }
                    }
                }
            }
            ActionResult::SetSelection(ids) => {
                self.state.status_message = match ids.len() {
                    0 => "Selection cleared.".to_string(),
                    n => format!("{} selected", n),
                };
                self.state.selected_entities = ids;
            }
            ActionResult::BeginTextEdit(id) => self.begin_text_edit(&id),
            ActionResult::Cancel => self.cancel(),
        }
    }

    fn begin_text_edit(&mut self, id: &EntityId) {
        let buffer = self
            .document
            .get(id)
            .and_then(Entity::as_text_box)
            .map(|t| t.text.clone());
        if let Some(buffer) = buffer {
            self.state.edit_state = EditState::EditingText {
                id: id.clone(),
                buffer,
            };
            self.state.status_message = "Editing text.".to_string();
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ztopo_core::entity::{Node, NodeKind};

    fn editor_with_node(kind: NodeKind, x: f64, y: f64) -> (Editor, EntityId) {
        let mut doc = Document::new();
        let id = doc
            .insert(Entity::Node(Node::new(kind, Point2::new(x, y), 40.0, "#777")))
            .unwrap();
        (Editor::with_document(doc), id)
    }

    #[test]
    fn test_add_server_at_position() {
        let mut editor = Editor::new();
        editor.set_tool(Tool::AddNode(NodeKind::Server));
        editor.on_click(Point2::new(10.0, 20.0), MouseButton::Left);

        assert_eq!(editor.document().node_count(), 1);
        let node = editor.document().nodes().next().unwrap();
        assert_eq!(node.kind.as_str(), "server");
        assert_eq!(node.pos, Point2::new(10.0, 20.0));
        assert!(node.dragable);
        assert!(!node.id.is_empty());
    }

    #[test]
    fn test_placement_ids_are_fresh() {
        let mut editor = Editor::new();
        editor.set_tool(Tool::AddNode(NodeKind::Router));
        editor.on_click(Point2::new(0.0, 0.0), MouseButton::Left);
        editor.on_click(Point2::new(200.0, 0.0), MouseButton::Left);

        let ids: Vec<_> = editor.document().nodes().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_every_placement_tool_tags_its_node() {
        for kind in NodeKind::ALL {
            let mut editor = Editor::new();
            editor.set_tool(Tool::AddNode(kind));
            editor.on_click(Point2::new(5.0, 5.0), MouseButton::Left);
            let node = editor.document().nodes().next().unwrap();
            assert_eq!(Some(node.kind.as_str()), Tool::AddNode(kind).kind_tag());
        }
    }

    #[test]
    fn test_connect_two_nodes() {
        let mut doc = Document::new();
        let a = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Server,
                Point2::new(0.0, 0.0),
                40.0,
                "#777",
            )))
            .unwrap();
        let b = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Switch,
                Point2::new(300.0, 0.0),
                40.0,
                "#777",
            )))
            .unwrap();
        let mut editor = Editor::with_document(doc);
        editor.set_tool(Tool::Connect);

        editor.on_click(Point2::new(0.0, 0.0), MouseButton::Left);
        assert_eq!(editor.document().link_count(), 0);
        editor.on_click(Point2::new(300.0, 0.0), MouseButton::Left);

        assert_eq!(editor.document().link_count(), 1);
        let link = editor
            .document()
            .iter()
            .find_map(Entity::as_link)
            .unwrap();
        assert_eq!(link.start_node, a);
        assert_eq!(link.end_node, b);
    }

    #[test]
    fn test_connect_refuses_self_link() {
        let (mut editor, _id) = editor_with_node(NodeKind::Cloud, 50.0, 50.0);
        editor.set_tool(Tool::Connect);

        editor.on_click(Point2::new(50.0, 50.0), MouseButton::Left);
        editor.on_click(Point2::new(52.0, 48.0), MouseButton::Left);
        assert_eq!(editor.document().link_count(), 0);
    }

    #[test]
    fn test_connect_ignores_empty_space() {
        let (mut editor, _id) = editor_with_node(NodeKind::Cloud, 50.0, 50.0);
        editor.set_tool(Tool::Connect);
        editor.on_click(Point2::new(500.0, 500.0), MouseButton::Left);
        assert_eq!(editor.prompt(), "选择起始节点:");
    }

    #[test]
    fn test_erase_node_cascades_links() {
        let mut doc = Document::new();
        let a = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Server,
                Point2::new(0.0, 0.0),
                40.0,
                "#777",
            )))
            .unwrap();
        let b = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Router,
                Point2::new(300.0, 0.0),
                40.0,
                "#777",
            )))
            .unwrap();
        doc.insert(Entity::Link(ztopo_core::entity::Link::new(a.clone(), b)))
            .unwrap();
        let mut editor = Editor::with_document(doc);
        editor.set_tool(Tool::Delete);

        editor.on_click(Point2::new(0.0, 0.0), MouseButton::Left);

        assert_eq!(editor.document().node_count(), 1);
        assert_eq!(editor.document().link_count(), 0);
        assert!(editor.document().get(&a).is_none());
    }

    #[test]
    fn test_drag_moves_only_position() {
        let (mut editor, id) = editor_with_node(NodeKind::Computer, 100.0, 100.0);
        let before = editor.document().get_node(&id).unwrap().clone();

        // 在图标边缘按下，保持抓取偏移
        assert!(editor.begin_drag(Point2::new(110.0, 100.0)));
        editor.update_drag(Point2::new(210.0, 150.0));
        editor.end_drag();

        let after = editor.document().get_node(&id).unwrap();
        assert_eq!(after.pos, Point2::new(200.0, 150.0));
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.size, before.size);
        assert_eq!(after.color, before.color);
        assert_eq!(after.label, before.label);
        assert_eq!(after.id, before.id);
    }

    #[test]
    fn test_drag_refused_for_locked_entity() {
        let mut doc = Document::new();
        let mut node = Node::new(NodeKind::Server, Point2::new(0.0, 0.0), 40.0, "#777");
        node.dragable = false;
        let id = doc.insert(Entity::Node(node)).unwrap();
        let mut editor = Editor::with_document(doc);

        assert!(!editor.begin_drag(Point2::new(0.0, 0.0)));
        editor.update_drag(Point2::new(100.0, 100.0));
        assert_eq!(editor.document().get_node(&id).unwrap().pos, Point2::origin());
    }

    #[test]
    fn test_nudge_selected() {
        let (mut editor, id) = editor_with_node(NodeKind::Switch, 10.0, 10.0);
        editor.on_click(Point2::new(10.0, 10.0), MouseButton::Left);
        assert_eq!(editor.state().selected_entities, vec![id.clone()]);

        editor.nudge(Direction::Right);
        editor.nudge(Direction::Up);

        let pos = editor.document().get_node(&id).unwrap().pos;
        assert_eq!(pos, Point2::new(10.0 + NUDGE_STEP, 10.0 - NUDGE_STEP));
    }

    #[test]
    fn test_add_text_box_enters_editing() {
        let mut editor = Editor::new();
        editor.set_tool(Tool::AddTextBox);
        editor.on_click(Point2::new(30.0, 40.0), MouseButton::Left);

        assert!(matches!(
            editor.state().edit_state,
            EditState::EditingText { .. }
        ));
        editor.text_input("rack ");
        editor.text_input("42");
        editor.text_backspace();
        editor.commit_text();

        let text = editor
            .document()
            .iter()
            .find_map(Entity::as_text_box)
            .unwrap();
        assert_eq!(text.text, "rack 4");
        assert_eq!(text.pos, Point2::new(30.0, 40.0));
    }

    #[test]
    fn test_edit_text_tool_and_abort() {
        let mut doc = Document::new();
        let id = doc
            .insert(Entity::TextBox(
                ztopo_core::entity::TextBox::new(Point2::new(0.0, 0.0), 14.0, "#222")
                    .with_text("old"),
            ))
            .unwrap();
        let mut editor = Editor::with_document(doc);
        editor.set_tool(Tool::TextEdit);

        editor.on_click(Point2::new(5.0, 7.0), MouseButton::Left);
        assert!(matches!(
            editor.state().edit_state,
            EditState::EditingText { .. }
        ));
        editor.text_input(" changed");
        editor.abort_text();

        assert_eq!(
            editor.document().get(&id).unwrap().as_text_box().unwrap().text,
            "old"
        );
    }

    #[test]
    fn test_box_select() {
        let mut doc = Document::new();
        let a = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Server,
                Point2::new(50.0, 50.0),
                20.0,
                "#777",
            )))
            .unwrap();
        let b = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Router,
                Point2::new(80.0, 60.0),
                20.0,
                "#777",
            )))
            .unwrap();
        doc.insert(Entity::Node(Node::new(
            NodeKind::Cloud,
            Point2::new(500.0, 500.0),
            20.0,
            "#777",
        )))
        .unwrap();
        let mut editor = Editor::with_document(doc);

        editor.on_click(Point2::new(0.0, 0.0), MouseButton::Left);
        editor.on_click(Point2::new(200.0, 200.0), MouseButton::Left);

        let selected = &editor.state().selected_entities;
        assert_eq!(selected.len(), 2);
        assert!(selected.contains(&a));
        assert!(selected.contains(&b));
    }

    #[test]
    fn test_cancel_returns_to_select() {
        let mut editor = Editor::new();
        editor.set_tool(Tool::Connect);
        editor.cancel();
        assert_eq!(editor.state().current_tool, Tool::Select);
        assert_eq!(editor.prompt(), "选择对象:");
    }
}
