//! 几何内核
//!
//! 捕捉引擎使用的纯数学例程：距离、投影、各类求交。
//! 所有函数无状态、确定性，并且对有限输入永不panic；
//! NaN/无穷大输入返回 `None`/空结果，退化几何同样如此。
//!
//! 角度参数一律为弧度。

use crate::geometry::{Arc, Circle};
use crate::math::{is_finite_point, normalize_angle, Point2, Vector2, EPSILON};

/// 两点距离
#[inline]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (*a - *b).norm()
}

/// 点在线段上的投影
///
/// - `clamp_to_segment = false`: 返回点在*无限*直线上的垂足
///   （垂足/延伸捕捉使用）
/// - `clamp_to_segment = true`: 垂足限制在线段范围内
///   （最近点捕捉使用）
///
/// 零长度线段或非有限输入返回 `None`。
pub fn project_point_on_segment(
    p: &Point2,
    a: &Point2,
    b: &Point2,
    clamp_to_segment: bool,
) -> Option<Point2> {
    if !is_finite_point(p) || !is_finite_point(a) || !is_finite_point(b) {
        return None;
    }

    let v = *b - *a;
    let len2 = v.dot(&v);
    if len2 < EPSILON {
        return None;
    }

    let w = *p - *a;
    let mut t = w.dot(&v) / len2;
    if clamp_to_segment {
        t = t.clamp(0.0, 1.0);
    }

    Some(*a + v * t)
}

/// 点投影到线段上的参数t（不截断）
///
/// t在 [0, 1] 内表示垂足落在线段上。
pub fn segment_param(p: &Point2, a: &Point2, b: &Point2) -> Option<f64> {
    if !is_finite_point(p) || !is_finite_point(a) || !is_finite_point(b) {
        return None;
    }

    let v = *b - *a;
    let len2 = v.dot(&v);
    if len2 < EPSILON {
        return None;
    }

    Some((*p - *a).dot(&v) / len2)
}

/// 无限直线-直线交点
///
/// 每条直线由两点定义。平行/共线（行列式接近0，容差1e-9）
/// 返回 `None`。
pub fn line_line_intersection(
    a1: &Point2,
    a2: &Point2,
    b1: &Point2,
    b2: &Point2,
) -> Option<Point2> {
    if !is_finite_point(a1) || !is_finite_point(a2) || !is_finite_point(b1) || !is_finite_point(b2)
    {
        return None;
    }

    let d1 = *a2 - *a1;
    let d2 = *b2 - *b1;

    let det = d1.x * d2.y - d1.y * d2.x;
    if det.abs() < EPSILON {
        return None;
    }

    let d = *b1 - *a1;
    let t = (d.x * d2.y - d.y * d2.x) / det;

    Some(*a1 + d1 * t)
}

/// 线段-线段交点
///
/// 在无限直线交点的基础上要求交点落在两条线段的参数
/// 范围内。
pub fn segment_segment_intersection(
    a1: &Point2,
    a2: &Point2,
    b1: &Point2,
    b2: &Point2,
) -> Option<Point2> {
    let p = line_line_intersection(a1, a2, b1, b2)?;

    let on = |a: &Point2, b: &Point2| {
        segment_param(&p, a, b).is_some_and(|t| (-EPSILON..=1.0 + EPSILON).contains(&t))
    };
    if on(a1, a2) && on(b1, b2) {
        Some(p)
    } else {
        None
    }
}

/// 线段-圆交点
///
/// 返回 0、1（相切）或 2 个点，全部落在线段参数范围内。
pub fn line_circle_intersections(
    p1: &Point2,
    p2: &Point2,
    center: &Point2,
    radius: f64,
) -> Vec<Point2> {
    if !is_finite_point(p1) || !is_finite_point(p2) || !is_finite_point(center) {
        return vec![];
    }
    if !radius.is_finite() || radius < EPSILON {
        return vec![];
    }

    let d = *p2 - *p1;
    let f = *p1 - *center;

    let a = d.dot(&d);
    if a < EPSILON {
        return vec![];
    }
    let b = 2.0 * f.dot(&d);
    let c = f.dot(&f) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return vec![];
    }

    let mut intersections = Vec::new();

    if discriminant.abs() < EPSILON {
        // 相切：一个交点
        let t = -b / (2.0 * a);
        if (-EPSILON..=1.0 + EPSILON).contains(&t) {
            intersections.push(*p1 + d * t);
        }
    } else {
        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);

        if (-EPSILON..=1.0 + EPSILON).contains(&t1) {
            intersections.push(*p1 + d * t1);
        }
        if (-EPSILON..=1.0 + EPSILON).contains(&t2) {
            intersections.push(*p1 + d * t2);
        }
    }

    intersections
}

/// 圆-圆交点
///
/// 返回 0、1（相切）或 2 个点；同心圆（圆心重合）为退化
/// 情况，返回空。
pub fn circle_circle_intersections(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    if !is_finite_point(c1) || !is_finite_point(c2) || !r1.is_finite() || !r2.is_finite() {
        return vec![];
    }
    if r1 < EPSILON || r2 < EPSILON {
        return vec![];
    }

    let d = (*c2 - *c1).norm();

    // 相离、内含或同心
    if d > r1 + r2 + EPSILON || d < (r1 - r2).abs() - EPSILON || d < EPSILON {
        return vec![];
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h2 = r1 * r1 - a * a;
    let h = h2.max(0.0).sqrt();

    let p = *c1 + (*c2 - *c1) * (a / d);

    let dir = (*c2 - *c1) / d;
    let perp = Vector2::new(-dir.y, dir.x);

    if h < EPSILON {
        vec![p]
    } else {
        vec![p + perp * h, p - perp * h]
    }
}

/// 线段-圆弧交点
///
/// 先求线段与完整圆的交点，再过滤在弧角度范围内的。
pub fn line_arc_intersections(p1: &Point2, p2: &Point2, arc: &Arc) -> Vec<Point2> {
    line_circle_intersections(p1, p2, &arc.center, arc.radius)
        .into_iter()
        .filter(|p| arc.contains_angle(angle_of(&arc.center, p)))
        .collect()
}

/// 圆弧-圆弧 / 圆弧-圆 交点
pub fn arc_circle_intersections(arc: &Arc, center: &Point2, radius: f64) -> Vec<Point2> {
    circle_circle_intersections(&arc.center, arc.radius, center, radius)
        .into_iter()
        .filter(|p| arc.contains_angle(angle_of(&arc.center, p)))
        .collect()
}

/// 将顶点列表展开为连续线段
///
/// `closed` 时追加末尾到起点的闭合段。
pub fn polyline_segments(points: &[Point2], closed: bool) -> Vec<(Point2, Point2)> {
    if points.len() < 2 {
        return vec![];
    }

    let mut segments: Vec<(Point2, Point2)> =
        points.windows(2).map(|w| (w[0], w[1])).collect();

    if closed && points.len() > 2 {
        segments.push((*points.last().unwrap(), points[0]));
    }

    segments
}

/// 圆心到点的方位角（弧度，[0, 2π)）
#[inline]
pub fn angle_of(center: &Point2, p: &Point2) -> f64 {
    normalize_angle((p.y - center.y).atan2(p.x - center.x))
}

/// 从外部参考点到圆的切点
///
/// 参考点在圆内（或圆上）时没有切点。
pub fn tangent_points(circle: &Circle, from: &Point2) -> Vec<Point2> {
    if !is_finite_point(from) || !is_finite_point(&circle.center) || !circle.radius.is_finite() {
        return vec![];
    }

    let d = (*from - circle.center).norm();
    if d <= circle.radius + EPSILON {
        return vec![];
    }

    let base_angle = (from.y - circle.center.y).atan2(from.x - circle.center.x);
    let offset = (circle.radius / d).acos();

    vec![
        circle.point_at_angle(base_angle + offset),
        circle.point_at_angle(base_angle - offset),
    ]
}

/// 圆周上离给定点最近的点（径向投影）
///
/// 点与圆心重合时方向未定义，返回 `None`。
pub fn closest_point_on_circle(center: &Point2, radius: f64, p: &Point2) -> Option<Point2> {
    if !is_finite_point(p) || !is_finite_point(center) || !radius.is_finite() {
        return None;
    }

    let v = *p - *center;
    let d = v.norm();
    if d < EPSILON {
        return None;
    }

    Some(*center + v * (radius / d))
}
