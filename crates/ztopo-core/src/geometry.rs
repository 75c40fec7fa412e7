//! 几何图元定义
//!
//! 画布实体使用的基本图元：
//! - 尺寸 (Size)
//! - 矩形 (Rect)
//! - 圆 (Circle)
//! - 线段 (Segment)

use crate::math::{BoundingBox2, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// 尺寸（宽高）
///
/// 约定宽高非负；构造方不做强制，由文档插入时校验。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 宽高是否非负且有限
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// 轴对齐矩形，pos 为左上角
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Point2,
    pub size: Size,
}

impl Rect {
    pub fn new(pos: Point2, size: Size) -> Self {
        Self { pos, size }
    }

    /// 以中心点和尺寸构建
    pub fn from_center(center: Point2, size: Size) -> Self {
        Self {
            pos: Point2::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    /// 矩形中心
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.pos.x + self.size.width / 2.0,
            self.pos.y + self.size.height / 2.0,
        )
    }

    /// 检查点是否在矩形内（考虑容差）
    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        self.bounding_box().expanded(tolerance).contains(point)
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            self.pos,
            Point2::new(self.pos.x + self.size.width, self.pos.y + self.size.height),
        )
    }
}

/// 圆
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// 计算周长
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }

    /// 计算面积
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// 计算点到圆周的距离（负值表示在圆内）
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        (point - self.center).norm() - self.radius
    }

    /// 检查点是否在圆内（考虑容差）
    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        self.distance_to_point(point) <= tolerance
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

/// 线段
///
/// 端点有序：p1 为起点，p2 为终点，方向相关的用途（如箭头）依赖该顺序。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point2,
    pub p2: Point2,
}

impl Segment {
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }

    /// 计算线段方向向量（单位向量）
    pub fn direction(&self) -> Vector2 {
        (self.p2 - self.p1).normalize()
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        Point2::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }

    /// 计算点到线段的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        let v = self.p2 - self.p1;
        let w = point - self.p1;

        let c1 = w.dot(&v);
        if c1 <= 0.0 {
            return (point - self.p1).norm();
        }

        let c2 = v.dot(&v);
        if c2 <= c1 {
            return (point - self.p2).norm();
        }

        let b = c1 / c2;
        let pb = self.p1 + v * b;
        (point - pb).norm()
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.p1, self.p2])
    }
}

/// 估算文本宽度
///
/// 中文字符宽度接近字高，英文约为字高的0.6倍，按混合比例估算。
pub fn estimated_text_width(text: &str, height: f64) -> f64 {
    let char_count = text.chars().count();
    let cjk_count = text.chars().filter(|c| is_cjk(*c)).count();
    let ascii_count = char_count - cjk_count;

    (cjk_count as f64 * height) + (ascii_count as f64 * height * 0.6)
}

/// 检查是否是CJK字符
fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}')
}
