//! 拓扑图文档
//!
//! 文档是实体的唯一持有者：
//! - 按ID索引实体，保证ID在文档内唯一
//! - 维护绘制顺序（后插入的在上层）
//! - 维护连接的引用完整性：删除节点时级联删除引用它的连接
//! - 插入时校验几何数值（尺寸/半径非负、坐标有限）

use crate::entity::{Entity, EntityId, Link, Node};
use crate::geometry::Segment;
use crate::math::{BoundingBox2, Point2};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// 文档操作错误
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    #[error("duplicate entity id: {0}")]
    DuplicateId(EntityId),

    #[error("entity id must not be empty")]
    EmptyId,

    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("link endpoint is not a node in this document: {0}")]
    NodeNotFound(EntityId),

    #[error("entity is not dragable: {0}")]
    NotDragable(EntityId),

    #[error("entity {id} is not a {expected}")]
    WrongKind { id: EntityId, expected: &'static str },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// 文档元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            title: "Untitled".to_string(),
            created_at: now,
            modified_at: now,
        }
    }
}

/// 拓扑图文档
#[derive(Debug, Default)]
pub struct Document {
    pub metadata: DocumentMetadata,

    /// 实体表：ID -> 实体
    entities: HashMap<EntityId, Entity>,

    /// 绘制顺序（后插入的在上层）
    order: Vec<EntityId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入实体
    ///
    /// 校验：ID非空且未被占用、数值有效、连接端点是文档中已存在的节点。
    pub fn insert(&mut self, entity: Entity) -> Result<EntityId, DocumentError> {
        let id = entity.id().clone();
        if id.is_empty() {
            return Err(DocumentError::EmptyId);
        }
        if self.entities.contains_key(&id) {
            return Err(DocumentError::DuplicateId(id));
        }
        self.validate_entity(&entity)?;

        tracing::debug!(id = %id, kind = entity.type_name(), "insert entity");
        self.order.push(id.clone());
        self.entities.insert(id.clone(), entity);
        self.touch();
        Ok(id)
    }

    /// 删除实体
    ///
    /// 删除节点时，级联删除所有引用它的连接。
    pub fn remove(&mut self, id: &EntityId) -> Result<Entity, DocumentError> {
        let entity = self
            .entities
            .remove(id)
            .ok_or_else(|| DocumentError::EntityNotFound(id.clone()))?;
        self.order.retain(|e| e != id);

        if matches!(entity, Entity::Node(_)) {
            let dangling: Vec<EntityId> = self
                .entities
                .values()
                .filter_map(Entity::as_link)
                .filter(|link| link.touches(id))
                .map(|link| link.id.clone())
                .collect();
            if !dangling.is_empty() {
                tracing::debug!(
                    node = %id,
                    count = dangling.len(),
                    "cascade remove links of deleted node"
                );
            }
            for link_id in dangling {
                self.entities.remove(&link_id);
                self.order.retain(|e| *e != link_id);
            }
        }

        self.touch();
        Ok(entity)
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_node(&self, id: &EntityId) -> Option<&Node> {
        self.entities.get(id).and_then(Entity::as_node)
    }

    /// 可变访问实体（调用方负责保持ID不变）
    pub fn entity_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.touch();
        self.entities.get_mut(id)
    }

    /// 移动实体
    ///
    /// 拖拽/微移的唯一写入路径：检查 `dragable` 标志，只改写 `pos`。
    pub fn move_entity(&mut self, id: &EntityId, pos: Point2) -> Result<(), DocumentError> {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return Err(DocumentError::InvalidGeometry(format!(
                "non-finite position ({}, {})",
                pos.x, pos.y
            )));
        }
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| DocumentError::EntityNotFound(id.clone()))?;
        let dragable = entity
            .as_dragable_mut()
            .ok_or_else(|| DocumentError::NotDragable(id.clone()))?;
        if !dragable.dragable() {
            return Err(DocumentError::NotDragable(id.clone()));
        }
        dragable.set_pos(pos);
        self.touch();
        Ok(())
    }

    /// 修改节点标签
    pub fn set_label(&mut self, id: &EntityId, label: impl Into<String>) -> Result<(), DocumentError> {
        match self.entities.get_mut(id) {
            Some(Entity::Node(node)) => {
                node.label = label.into();
                self.touch();
                Ok(())
            }
            Some(_) => Err(DocumentError::WrongKind {
                id: id.clone(),
                expected: "Node",
            }),
            None => Err(DocumentError::EntityNotFound(id.clone())),
        }
    }

    /// 修改文本框内容
    pub fn set_text(&mut self, id: &EntityId, text: impl Into<String>) -> Result<(), DocumentError> {
        match self.entities.get_mut(id) {
            Some(Entity::TextBox(tb)) => {
                tb.text = text.into();
                self.touch();
                Ok(())
            }
            Some(_) => Err(DocumentError::WrongKind {
                id: id.clone(),
                expected: "TextBox",
            }),
            None => Err(DocumentError::EntityNotFound(id.clone())),
        }
    }

    /// 引用指定节点的所有连接
    pub fn links_of(&self, node_id: &EntityId) -> Vec<&Link> {
        self.entities
            .values()
            .filter_map(Entity::as_link)
            .filter(|link| link.touches(node_id))
            .collect()
    }

    /// 解析连接的几何线段（任一端点缺失则返回 None）
    pub fn link_segment(&self, link: &Link) -> Option<Segment> {
        let start = self.get_node(&link.start_node)?;
        let end = self.get_node(&link.end_node)?;
        Some(Segment::new(start.pos, end.pos))
    }

    /// 点击测试，返回最上层命中的实体ID
    pub fn hit_test(&self, point: &Point2, tolerance: f64) -> Option<&EntityId> {
        for id in self.order.iter().rev() {
            let entity = &self.entities[id];
            let hit = match entity {
                Entity::Link(link) => self
                    .link_segment(link)
                    .is_some_and(|seg| seg.distance_to_point(point) <= tolerance),
                _ => entity.contains_point(point, tolerance),
            };
            if hit {
                return Some(id);
            }
        }
        None
    }

    /// 按绘制顺序遍历实体
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().map(|id| &self.entities[id])
    }

    /// 遍历所有节点
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.entities.values().filter_map(Entity::as_node)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn link_count(&self) -> usize {
        self.entities.values().filter_map(Entity::as_link).count()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.order.clear();
        self.touch();
    }

    /// 整个文档的包围盒（连接按解析后的线段计入）
    pub fn bounding_box(&self) -> BoundingBox2 {
        let mut bbox = BoundingBox2::empty();
        for entity in self.entities.values() {
            if let Some(b) = entity.bounding_box() {
                bbox = bbox.merge(&b);
            } else if let Entity::Link(link) = entity {
                if let Some(seg) = self.link_segment(link) {
                    bbox = bbox.merge(&seg.bounding_box());
                }
            }
        }
        bbox
    }

    /// 校验引用完整性
    ///
    /// ID唯一性由插入保证；这里检查每条连接的两个端点
    /// 都仍然是文档中的节点。用于反序列化后的检查。
    pub fn validate(&self) -> Result<(), DocumentError> {
        for link in self.entities.values().filter_map(Entity::as_link) {
            for endpoint in [&link.start_node, &link.end_node] {
                if self.get_node(endpoint).is_none() {
                    return Err(DocumentError::NodeNotFound(endpoint.clone()));
                }
            }
        }
        Ok(())
    }

    fn validate_entity(&self, entity: &Entity) -> Result<(), DocumentError> {
        let finite = |p: &Point2| p.x.is_finite() && p.y.is_finite();
        match entity {
            Entity::Node(n) => {
                if !finite(&n.pos) {
                    return Err(DocumentError::InvalidGeometry("non-finite node position".into()));
                }
                if !n.size.is_finite() || n.size <= 0.0 {
                    return Err(DocumentError::InvalidGeometry(format!(
                        "node size must be positive, got {}",
                        n.size
                    )));
                }
            }
            Entity::Line(l) => {
                if !finite(&l.start) || !finite(&l.end) {
                    return Err(DocumentError::InvalidGeometry("non-finite line endpoint".into()));
                }
                if !l.width.is_finite() || l.width < 0.0 {
                    return Err(DocumentError::InvalidGeometry(format!(
                        "line width must be non-negative, got {}",
                        l.width
                    )));
                }
            }
            Entity::Link(link) => {
                for endpoint in [&link.start_node, &link.end_node] {
                    if self.get_node(endpoint).is_none() {
                        return Err(DocumentError::NodeNotFound(endpoint.clone()));
                    }
                }
            }
            Entity::TextBox(t) => {
                if !finite(&t.pos) {
                    return Err(DocumentError::InvalidGeometry("non-finite text position".into()));
                }
                if !t.size.is_finite() || t.size <= 0.0 {
                    return Err(DocumentError::InvalidGeometry(format!(
                        "font size must be positive, got {}",
                        t.size
                    )));
                }
            }
            Entity::Shape(s) => {
                if !finite(&s.pos) {
                    return Err(DocumentError::InvalidGeometry("non-finite shape position".into()));
                }
                if !s.radius.is_finite() || s.radius < 0.0 {
                    return Err(DocumentError::InvalidGeometry(format!(
                        "shape radius must be non-negative, got {}",
                        s.radius
                    )));
                }
            }
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.metadata.modified_at = Utc::now();
    }
}
