//! ZTOPO 核心数据模型
//!
//! 提供网络拓扑图编辑器的实体模型、几何查询和文档管理。
//!
//! # 架构设计
//!
//! - `entity`: 画布实体（节点、连接、线条、文本框、形状）及其能力接口
//! - `document`: 实体的唯一持有者，保证ID唯一性与连接的引用完整性
//! - `geometry` / `math`: 命中测试所需的几何图元与包围盒
//!
//! # 示例
//!
//! ```rust
//! use ztopo_core::prelude::*;
//!
//! let mut doc = Document::new();
//! let a = doc
//!     .insert(Entity::Node(Node::new(
//!         NodeKind::Server,
//!         Point2::new(0.0, 0.0),
//!         60.0,
//!         "#4a90d9",
//!     )))
//!     .unwrap();
//! let b = doc
//!     .insert(Entity::Node(Node::new(
//!         NodeKind::Router,
//!         Point2::new(200.0, 0.0),
//!         60.0,
//!         "#d94a4a",
//!     )))
//!     .unwrap();
//! doc.insert(Entity::Link(Link::new(a, b))).unwrap();
//! assert_eq!(doc.link_count(), 1);
//! ```

pub mod document;
pub mod entity;
pub mod geometry;
pub mod math;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::document::{Document, DocumentError, DocumentMetadata};
    pub use crate::entity::{
        Dragable, Entity, EntityId, Identifiable, Line, Link, Node, NodeKind, Shape, ShapeKind,
        TextBox,
    };
    pub use crate::geometry::{Circle, Rect, Segment, Size};
    pub use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
}
