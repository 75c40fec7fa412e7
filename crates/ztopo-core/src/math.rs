//! 数学基础类型
//!
//! 基于 nalgebra 的2D点/向量别名，以及轴对齐包围盒。

use serde::{Deserialize, Serialize};

/// 2D点（f64）
pub type Point2 = nalgebra::Point2<f64>;

/// 2D向量（f64）
pub type Vector2 = nalgebra::Vector2<f64>;

/// 几何比较容差
pub const EPSILON: f64 = 1e-9;

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 空包围盒（min > max，任何扩展都会覆盖它）
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// 从点集构建包围盒
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    /// 扩展包围盒以包含指定点
    pub fn expand_to_include(&mut self, point: &Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// 检查点是否在包围盒内（含边界）
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// 合并两个包围盒
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// 按容差向外扩展（用于点击测试）
    pub fn expanded(&self, tolerance: f64) -> Self {
        Self {
            min: Point2::new(self.min.x - tolerance, self.min.y - tolerance),
            max: Point2::new(self.max.x + tolerance, self.max.y + tolerance),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// 包围盒中心
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox2::from_points([
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ]);
        assert_eq!(bbox.min, Point2::new(-2.0, -1.0));
        assert_eq!(bbox.max, Point2::new(4.0, 5.0));
    }

    #[test]
    fn test_empty_contains_nothing() {
        let bbox = BoundingBox2::empty();
        assert!(bbox.is_empty());
        assert!(!bbox.contains(&Point2::origin()));
    }

    #[test]
    fn test_expanded() {
        let bbox = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
        let grown = bbox.expanded(2.0);
        assert!(grown.contains(&Point2::new(-1.5, 11.5)));
        assert!(!grown.contains(&Point2::new(-3.0, 5.0)));
    }

    #[test]
    fn test_merge() {
        let a = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(5.0, 5.0));
        let b = BoundingBox2::new(Point2::new(3.0, -2.0), Point2::new(8.0, 4.0));
        let merged = a.merge(&b);
        assert_eq!(merged.min, Point2::new(0.0, -2.0));
        assert_eq!(merged.max, Point2::new(8.0, 5.0));
    }
}
