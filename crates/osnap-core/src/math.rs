//! 基础数学类型
//!
//! 提供2D几何计算所需的基础类型和工具：
//! - `Point2` / `Vector2`: f64精度的2D点和向量
//! - `BoundingBox2`: 轴对齐包围盒
//! - 角度单位转换（引擎内部统一使用弧度）

use serde::{Deserialize, Serialize};

/// 2D点（f64精度）
pub type Point2 = nalgebra::Point2<f64>;

/// 2D向量（f64精度）
pub type Vector2 = nalgebra::Vector2<f64>;

/// 几何计算容差
pub const EPSILON: f64 = 1e-9;

/// 检查点的坐标是否为有限值
///
/// NaN或无穷大的坐标会导致捕捉计算产生无效结果，
/// 必须在入口处拒绝。
#[inline]
pub fn is_finite_point(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// 角度转弧度
///
/// 引擎内部所有角度统一使用弧度，度数数据只在数据
/// 摄入边界处转换一次。
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// 弧度转角度（用于向外部报告）
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// 归一化角度到 [0, 2π)
pub fn normalize_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let mut a = angle % two_pi;
    if a < 0.0 {
        a += two_pi;
    }
    a
}

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    /// 创建包围盒
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 空包围盒（min > max，不与任何东西相交）
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::MAX, f64::MAX),
            max: Point2::new(f64::MIN, f64::MIN),
        }
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
    pub fn expand_to_include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// 向外均匀扩张
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            min: Point2::new(self.min.x - amount, self.min.y - amount),
            max: Point2::new(self.max.x + amount, self.max.y + amount),
        }
    }

    /// 中心点
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// 检查点是否在包围盒内
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// 检查两个包围盒是否相交
    pub fn intersects(&self, other: &BoundingBox2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// 点到包围盒的距离（点在盒内时为0）
    pub fn distance_to_point(&self, p: &Point2) -> f64 {
        let dx = (self.min.x - p.x).max(0.0).max(p.x - self.max.x);
        let dy = (self.min.y - p.y).max(0.0).max(p.y - self.max.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        let pi = std::f64::consts::PI;
        assert!((normalize_angle(-pi / 2.0) - 3.0 * pi / 2.0).abs() < EPSILON);
        assert!((normalize_angle(2.5 * pi) - 0.5 * pi).abs() < EPSILON);
        assert!(normalize_angle(0.0).abs() < EPSILON);
    }

    #[test]
    fn test_deg_to_rad_boundary() {
        // 度数只在边界转换一次，内部一律弧度
        assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < EPSILON);
        assert!((rad_to_deg(std::f64::consts::FRAC_PI_2) - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_bbox_distance() {
        let bbox = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
        assert!(bbox.distance_to_point(&Point2::new(5.0, 5.0)).abs() < EPSILON);
        assert!((bbox.distance_to_point(&Point2::new(13.0, 14.0)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_bbox_intersects() {
        let a = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(5.0, 5.0));
        let b = BoundingBox2::new(Point2::new(4.0, 4.0), Point2::new(8.0, 8.0));
        let c = BoundingBox2::new(Point2::new(6.0, 6.0), Point2::new(8.0, 8.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
