//! 画布实体定义
//!
//! 支持的实体类型：
//! - 节点 (Node) - 网络设备图元
//! - 线条 (Line) - 独立绘制的线段
//! - 连接 (Link) - 两个节点之间的连接
//! - 文本框 (TextBox)
//! - 形状 (Shape) - 通用可绘制图形
//!
//! 实体通过 `Identifiable` / `Dragable` 两个能力接口组合，
//! 而不是继承层次。id 的唯一性由持有实体的文档保证。

use crate::geometry::{estimated_text_width, Circle, Rect, Segment, Size};
use crate::math::{BoundingBox2, Point2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 实体ID
///
/// 非空的唯一字符串。实体自身不保证唯一性，由文档在插入时校验。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// 分配一个新的唯一ID（UUID v4）
    pub fn fresh() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 具有唯一ID的实体
pub trait Identifiable {
    fn id(&self) -> &EntityId;
}

/// 可拖拽的实体
///
/// 拖拽处理方在改写 `pos` 之前必须检查 `dragable`，
/// 且拖拽手势期间 `pos` 是唯一允许的写入。
pub trait Dragable {
    fn pos(&self) -> Point2;
    fn set_pos(&mut self, pos: Point2);
    fn dragable(&self) -> bool;
}

/// 未知的类型标签
#[derive(Debug, Clone, Error)]
#[error("unknown kind tag: {0}")]
pub struct UnknownKind(pub String);

/// 节点类型（网络设备）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Computer,
    Server,
    Router,
    Switch,
    Cloud,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Computer,
        NodeKind::Server,
        NodeKind::Router,
        NodeKind::Switch,
        NodeKind::Cloud,
    ];

    /// 类型标签（与工具和序列化格式共用同一词汇）
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Computer => "computer",
            NodeKind::Server => "server",
            NodeKind::Router => "router",
            NodeKind::Switch => "switch",
            NodeKind::Cloud => "cloud",
        }
    }

    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Computer => "Computer",
            NodeKind::Server => "Server",
            NodeKind::Router => "Router",
            NodeKind::Switch => "Switch",
            NodeKind::Cloud => "Cloud",
        }
    }
}

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "computer" => Ok(NodeKind::Computer),
            "server" => Ok(NodeKind::Server),
            "router" => Ok(NodeKind::Router),
            "switch" => Ok(NodeKind::Switch),
            "cloud" => Ok(NodeKind::Cloud),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

/// 形状类型
///
/// 与节点类型词汇不相交：形状标签描述图形本身，不描述设备。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// 背景区域
    BgArea,
    Circle,
    Polygon,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::BgArea => "bg-area",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bg-area" => Ok(ShapeKind::BgArea),
            "circle" => Ok(ShapeKind::Circle),
            "polygon" => Ok(ShapeKind::Polygon),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

/// 节点 - 代表一台网络设备
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: EntityId,
    /// 图标中心位置
    pub pos: Point2,
    pub dragable: bool,
    /// 图标尺寸（边长）
    pub size: f64,
    /// CSS颜色
    pub color: String,
    pub kind: NodeKind,
    pub label: String,
}

impl Node {
    /// 创建新节点，分配新ID，默认可拖拽
    pub fn new(kind: NodeKind, pos: Point2, size: f64, color: impl Into<String>) -> Self {
        Self {
            id: EntityId::fresh(),
            pos,
            dragable: true,
            size,
            color: color.into(),
            kind,
            label: kind.display_name().to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// 图标的外接矩形（以 pos 为中心）
    pub fn icon_rect(&self) -> Rect {
        Rect::from_center(self.pos, Size::new(self.size, self.size))
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.icon_rect().bounding_box()
    }

    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        self.icon_rect().contains_point(point, tolerance)
    }
}

/// 线条 - 独立绘制的线段，不依赖节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: EntityId,
    pub start: Point2,
    pub end: Point2,
    /// 线宽
    pub width: f64,
    /// CSS颜色
    pub color: String,
}

impl Line {
    pub fn new(start: Point2, end: Point2, width: f64, color: impl Into<String>) -> Self {
        Self {
            id: EntityId::fresh(),
            start,
            end,
            width,
            color: color.into(),
        }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.segment().bounding_box().expanded(self.width / 2.0)
    }

    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        self.segment().distance_to_point(point) <= tolerance + self.width / 2.0
    }
}

/// 连接 - 两个节点之间的连线
///
/// 只持有端点节点的ID，不持有坐标；几何位置随节点移动而变化，
/// 由文档解析（见 `Document::link_segment`）。被引用的节点删除后，
/// 连接即失效，文档负责级联删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: EntityId,
    pub start_node: EntityId,
    pub end_node: EntityId,
}

impl Link {
    pub fn new(start_node: EntityId, end_node: EntityId) -> Self {
        Self {
            id: EntityId::fresh(),
            start_node,
            end_node,
        }
    }

    /// 是否引用指定节点
    pub fn touches(&self, node_id: &EntityId) -> bool {
        self.start_node == *node_id || self.end_node == *node_id
    }
}

/// 文本框
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub id: EntityId,
    /// 文本框左上角
    pub pos: Point2,
    pub dragable: bool,
    /// 字体大小
    pub size: f64,
    /// CSS颜色
    pub color: String,
    pub text: String,
}

impl TextBox {
    /// 创建空文本框，分配新ID，默认可拖拽
    pub fn new(pos: Point2, size: f64, color: impl Into<String>) -> Self {
        Self {
            id: EntityId::fresh(),
            pos,
            dragable: true,
            size,
            color: color.into(),
            text: String::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// 文本的外接矩形
    ///
    /// 空文本保留一个字符宽度，保证可点击。
    pub fn text_rect(&self) -> Rect {
        let width = estimated_text_width(&self.text, self.size).max(self.size * 0.6);
        Rect::new(self.pos, Size::new(width, self.size))
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.text_rect().bounding_box()
    }

    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        self.text_rect().contains_point(point, tolerance)
    }
}

/// 形状 - 通用可绘制图形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: EntityId,
    /// 形状中心
    pub pos: Point2,
    pub dragable: bool,
    pub radius: f64,
    /// CSS颜色
    pub color: String,
    pub kind: ShapeKind,
}

impl Shape {
    /// 创建新形状，分配新ID，默认可拖拽
    pub fn new(kind: ShapeKind, pos: Point2, radius: f64, color: impl Into<String>) -> Self {
        Self {
            id: EntityId::fresh(),
            pos,
            dragable: true,
            radius,
            color: color.into(),
            kind,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.circle().bounding_box()
    }

    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        self.circle().contains_point(point, tolerance)
    }
}

/// 实体枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Node(Node),
    Line(Line),
    Link(Link),
    TextBox(TextBox),
    Shape(Shape),
}

impl Entity {
    pub fn id(&self) -> &EntityId {
        match self {
            Entity::Node(n) => &n.id,
            Entity::Line(l) => &l.id,
            Entity::Link(l) => &l.id,
            Entity::TextBox(t) => &t.id,
            Entity::Shape(s) => &s.id,
        }
    }

    /// 获取实体的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Entity::Node(_) => "Node",
            Entity::Line(_) => "Line",
            Entity::Link(_) => "Link",
            Entity::TextBox(_) => "TextBox",
            Entity::Shape(_) => "Shape",
        }
    }

    /// 获取实体自身的包围盒
    ///
    /// 连接没有自己的几何，范围由文档解析端点后得出，返回 None。
    pub fn bounding_box(&self) -> Option<BoundingBox2> {
        match self {
            Entity::Node(n) => Some(n.bounding_box()),
            Entity::Line(l) => Some(l.bounding_box()),
            Entity::Link(_) => None,
            Entity::TextBox(t) => Some(t.bounding_box()),
            Entity::Shape(s) => Some(s.bounding_box()),
        }
    }

    /// 检查点是否在实体上（考虑容差）
    ///
    /// 连接的命中测试需要端点坐标，由文档处理，这里返回 false。
    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        match self {
            Entity::Node(n) => n.contains_point(point, tolerance),
            Entity::Line(l) => l.contains_point(point, tolerance),
            Entity::Link(_) => false,
            Entity::TextBox(t) => t.contains_point(point, tolerance),
            Entity::Shape(s) => s.contains_point(point, tolerance),
        }
    }

    /// 作为可拖拽实体访问
    pub fn as_dragable(&self) -> Option<&dyn Dragable> {
        match self {
            Entity::Node(n) => Some(n),
            Entity::TextBox(t) => Some(t),
            Entity::Shape(s) => Some(s),
            Entity::Line(_) | Entity::Link(_) => None,
        }
    }

    /// 作为可拖拽实体访问（可变）
    pub fn as_dragable_mut(&mut self) -> Option<&mut dyn Dragable> {
        match self {
            Entity::Node(n) => Some(n),
            Entity::TextBox(t) => Some(t),
            Entity::Shape(s) => Some(s),
            Entity::Line(_) | Entity::Link(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Entity::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Entity::Link(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_text_box(&self) -> Option<&TextBox> {
        match self {
            Entity::TextBox(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_box_mut(&mut self) -> Option<&mut TextBox> {
        match self {
            Entity::TextBox(t) => Some(t),
            _ => None,
        }
    }
}

impl Identifiable for Node {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identifiable for Line {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identifiable for Link {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identifiable for TextBox {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identifiable for Shape {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Dragable for Node {
    fn pos(&self) -> Point2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Point2) {
        self.pos = pos;
    }

    fn dragable(&self) -> bool {
        self.dragable
    }
}

impl Dragable for TextBox {
    fn pos(&self) -> Point2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Point2) {
        self.pos = pos;
    }

    fn dragable(&self) -> bool {
        self.dragable
    }
}

impl Dragable for Shape {
    fn pos(&self) -> Point2 {
        self.pos
    }

    fn set_pos(&mut self, pos: Point2) {
        self.pos = pos;
    }

    fn dragable(&self) -> bool {
        self.dragable
    }
}
