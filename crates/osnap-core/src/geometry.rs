//! 几何图元定义
//!
//! 捕捉引擎支持的全部图元：
//! - 点 (Point)
//! - 线段 (Line)
//! - 圆 (Circle)
//! - 圆弧 (Arc)
//! - 椭圆 (Ellipse)
//! - 多段线 (Polyline)
//! - 矩形 (Rectangle)
//! - 样条曲线 (Spline)
//! - 文本 (Text)
//! - 块引用 (Insert)
//! - 尺寸标注 (Dimension)
//! - 引线 (Leader)
//! - 填充 (Hatch)
//!
//! 每个变体只携带捕捉所需的几何数据，不包含视觉属性。
//! 角度一律使用弧度；度数数据在构造边界处转换（如 `Arc::from_degrees`）。

use crate::math::{normalize_angle, BoundingBox2, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};

/// 几何类型枚举
///
/// 封闭的和类型：新增图元种类时，所有捕捉/内核例程的
/// 穷尽匹配会在编译期强制更新。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Polyline(Polyline),
    Rectangle(Rectangle),
    Spline(Spline),
    Text(Text),
    Insert(Insert),
    Dimension(Dimension),
    Leader(Leader),
    Hatch(Hatch),
}

impl Geometry {
    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Geometry::Point(p) => BoundingBox2::new(p.position, p.position),
            Geometry::Line(l) => l.bounding_box(),
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Arc(a) => a.bounding_box(),
            Geometry::Ellipse(e) => e.bounding_box(),
            Geometry::Polyline(pl) => pl.bounding_box(),
            Geometry::Rectangle(r) => r.bounding_box(),
            Geometry::Spline(s) => s.bounding_box(),
            Geometry::Text(t) => BoundingBox2::new(t.position, t.position),
            Geometry::Insert(i) => BoundingBox2::new(i.position, i.position),
            Geometry::Dimension(d) => d.bounding_box(),
            Geometry::Leader(ld) => BoundingBox2::from_points(ld.vertices.iter().copied()),
            Geometry::Hatch(h) => BoundingBox2::from_points(h.boundary.iter().copied()),
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Line(_) => "Line",
            Geometry::Circle(_) => "Circle",
            Geometry::Arc(_) => "Arc",
            Geometry::Ellipse(_) => "Ellipse",
            Geometry::Polyline(_) => "Polyline",
            Geometry::Rectangle(_) => "Rectangle",
            Geometry::Spline(_) => "Spline",
            Geometry::Text(_) => "Text",
            Geometry::Insert(_) => "Insert",
            Geometry::Dimension(_) => "Dimension",
            Geometry::Leader(_) => "Leader",
            Geometry::Hatch(_) => "Hatch",
        }
    }

    /// 端点类锚点
    ///
    /// 空间索引和端点捕捉共用的派生点集：线段端点、圆弧端点、
    /// 多段线/引线顶点、矩形角点、标注定义点、样条首尾点。
    pub fn endpoint_anchors(&self) -> Vec<Point2> {
        match self {
            Geometry::Point(_) => vec![],
            Geometry::Line(l) => vec![l.start, l.end],
            Geometry::Circle(_) => vec![],
            Geometry::Arc(a) => vec![a.start_point(), a.end_point()],
            Geometry::Ellipse(_) => vec![],
            Geometry::Polyline(pl) => pl.vertices.iter().map(|v| v.point).collect(),
            Geometry::Rectangle(r) => r.corners().to_vec(),
            Geometry::Spline(s) => {
                let pts = s.defining_points();
                match (pts.first(), pts.last()) {
                    (Some(a), Some(b)) if pts.len() > 1 => vec![*a, *b],
                    (Some(a), _) => vec![*a],
                    _ => vec![],
                }
            }
            Geometry::Text(_) => vec![],
            Geometry::Insert(_) => vec![],
            Geometry::Dimension(d) => vec![d.definition_point1, d.definition_point2],
            Geometry::Leader(ld) => ld.vertices.clone(),
            Geometry::Hatch(h) => h.boundary.clone(),
        }
    }

    /// 分解为基础曲线（线段/圆/圆弧）
    ///
    /// 交点、垂足、最近点捕捉都在基础曲线层面工作：
    /// 多段线和矩形分解为边，椭圆/样条/填充边界按采样折线处理。
    pub fn curve_primitives(&self) -> Vec<Geometry> {
        match self {
            Geometry::Point(_) | Geometry::Text(_) | Geometry::Insert(_) => vec![],
            Geometry::Line(l) => vec![Geometry::Line(l.clone())],
            Geometry::Circle(c) => vec![Geometry::Circle(c.clone())],
            Geometry::Arc(a) => vec![Geometry::Arc(a.clone())],
            Geometry::Ellipse(e) => segments_to_lines(&sampled_segments(&e.sample(ELLIPSE_SAMPLES), true)),
            Geometry::Polyline(pl) => pl.explode(),
            Geometry::Rectangle(r) => r.edges().into_iter().map(Geometry::Line).collect(),
            Geometry::Spline(s) => segments_to_lines(&sampled_segments(&s.sample(), false)),
            Geometry::Dimension(d) => vec![Geometry::Line(Line::new(
                d.definition_point1,
                d.definition_point2,
            ))],
            Geometry::Leader(ld) => segments_to_lines(&sampled_segments(&ld.vertices, false)),
            Geometry::Hatch(h) => segments_to_lines(&sampled_segments(&h.boundary, true)),
        }
    }

    /// 检查所有定义坐标是否有限
    ///
    /// 单个坐标为NaN/无穷大的实体不产生任何候选，
    /// 但不会中断整个场景的解析。
    pub fn is_finite(&self) -> bool {
        let finite = |p: &Point2| p.x.is_finite() && p.y.is_finite();
        match self {
            Geometry::Point(p) => finite(&p.position),
            Geometry::Line(l) => finite(&l.start) && finite(&l.end),
            Geometry::Circle(c) => finite(&c.center) && c.radius.is_finite(),
            Geometry::Arc(a) => {
                finite(&a.center)
                    && a.radius.is_finite()
                    && a.start_angle.is_finite()
                    && a.end_angle.is_finite()
            }
            Geometry::Ellipse(e) => {
                finite(&e.center)
                    && e.major_radius.is_finite()
                    && e.minor_radius.is_finite()
                    && e.rotation.is_finite()
            }
            Geometry::Polyline(pl) => pl
                .vertices
                .iter()
                .all(|v| finite(&v.point) && v.bulge.is_finite()),
            Geometry::Rectangle(r) => finite(&r.min) && finite(&r.max),
            Geometry::Spline(s) => {
                s.control_points.iter().all(finite) && s.fit_points.iter().all(finite)
            }
            Geometry::Text(t) => finite(&t.position),
            Geometry::Insert(i) => finite(&i.position),
            Geometry::Dimension(d) => {
                finite(&d.definition_point1)
                    && finite(&d.definition_point2)
                    && finite(&d.line_location)
            }
            Geometry::Leader(ld) => ld.vertices.iter().all(finite),
            Geometry::Hatch(h) => h.boundary.iter().all(finite),
        }
    }
}

/// 椭圆和填充边界的采样密度
const ELLIPSE_SAMPLES: usize = 64;

/// 样条每段的细分数
const SPLINE_SUBDIVISIONS: usize = 8;

fn sampled_segments(points: &[Point2], closed: bool) -> Vec<(Point2, Point2)> {
    crate::kernel::polyline_segments(points, closed)
}

fn segments_to_lines(segments: &[(Point2, Point2)]) -> Vec<Geometry> {
    segments
        .iter()
        .map(|&(a, b)| Geometry::Line(Line::new(a, b)))
        .collect()
}

/// 点实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub position: Point2,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
        }
    }

    pub fn from_point2(position: Point2) -> Self {
        Self { position }
    }
}

/// 线段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// 计算线段方向向量（单位向量）
    pub fn direction(&self) -> Vector2 {
        (self.end - self.start).normalize()
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}

/// 圆
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// 获取圆上指定角度的点（弧度）
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// 计算点到圆周的有符号距离（负值表示在圆内）
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        (*point - self.center).norm() - self.radius
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

/// 圆弧
///
/// 角度一律为弧度，从起始角逆时针扫到终止角。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    /// 起始角度（弧度）
    pub start_angle: f64,
    /// 终止角度（弧度）
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// 从度数数据构造圆弧
    ///
    /// DXF等外部格式以度为单位存储弧角，转换只发生在这个
    /// 摄入边界上；构造之后引擎内部不再出现度数。
    pub fn from_degrees(center: Point2, radius: f64, start_deg: f64, end_deg: f64) -> Self {
        Self::new(
            center,
            radius,
            crate::math::deg_to_rad(start_deg),
            crate::math::deg_to_rad(end_deg),
        )
    }

    /// 计算扫过的角度
    pub fn sweep_angle(&self) -> f64 {
        let two_pi = 2.0 * std::f64::consts::PI;
        let mut sweep = self.end_angle - self.start_angle;
        while sweep < 0.0 {
            sweep += two_pi;
        }
        while sweep > two_pi {
            sweep -= two_pi;
        }
        sweep
    }

    /// 获取起点
    pub fn start_point(&self) -> Point2 {
        Point2::new(
            self.center.x + self.radius * self.start_angle.cos(),
            self.center.y + self.radius * self.start_angle.sin(),
        )
    }

    /// 获取终点
    pub fn end_point(&self) -> Point2 {
        Point2::new(
            self.center.x + self.radius * self.end_angle.cos(),
            self.center.y + self.radius * self.end_angle.sin(),
        )
    }

    /// 获取弧中点（扫角一半处）
    pub fn midpoint(&self) -> Point2 {
        let mid_angle = self.start_angle + self.sweep_angle() / 2.0;
        Point2::new(
            self.center.x + self.radius * mid_angle.cos(),
            self.center.y + self.radius * mid_angle.sin(),
        )
    }

    /// 检查角度是否在弧的范围内
    pub fn contains_angle(&self, angle: f64) -> bool {
        let a = normalize_angle(angle);
        let start = normalize_angle(self.start_angle);
        let end = normalize_angle(self.end_angle);

        if start <= end {
            a >= start && a <= end
        } else {
            a >= start || a <= end
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        let mut bbox = BoundingBox2::from_points([self.start_point(), self.end_point()]);

        // 象限点落在弧内时才扩展包围盒
        let pi = std::f64::consts::PI;
        for angle in [0.0, pi / 2.0, pi, 3.0 * pi / 2.0] {
            if self.contains_angle(angle) {
                bbox.expand_to_include(&Point2::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                ));
            }
        }

        bbox
    }
}

/// 椭圆
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Point2,
    /// 长半轴
    pub major_radius: f64,
    /// 短半轴
    pub minor_radius: f64,
    /// 长轴相对X轴的旋转角（弧度）
    pub rotation: f64,
}

impl Ellipse {
    pub fn new(center: Point2, major_radius: f64, minor_radius: f64, rotation: f64) -> Self {
        Self {
            center,
            major_radius,
            minor_radius,
            rotation,
        }
    }

    /// 参数t（弧度）处的椭圆上的点
    pub fn point_at_param(&self, t: f64) -> Point2 {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let x = self.major_radius * t.cos();
        let y = self.minor_radius * t.sin();
        Point2::new(
            self.center.x + x * cos_r - y * sin_r,
            self.center.y + x * sin_r + y * cos_r,
        )
    }

    /// 长短轴的四个端点（椭圆的"象限点"）
    pub fn axis_endpoints(&self) -> [Point2; 4] {
        let pi = std::f64::consts::PI;
        [
            self.point_at_param(0.0),
            self.point_at_param(pi / 2.0),
            self.point_at_param(pi),
            self.point_at_param(3.0 * pi / 2.0),
        ]
    }

    /// 均匀参数采样（闭合折线近似）
    pub fn sample(&self, n: usize) -> Vec<Point2> {
        let two_pi = 2.0 * std::f64::consts::PI;
        (0..n)
            .map(|i| self.point_at_param(two_pi * i as f64 / n as f64))
            .collect()
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        // 保守估计：用长半轴作半径的外接圆
        let r = self.major_radius.max(self.minor_radius);
        BoundingBox2::new(
            Point2::new(self.center.x - r, self.center.y - r),
            Point2::new(self.center.x + r, self.center.y + r),
        )
    }
}

/// 多段线顶点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolylineVertex {
    pub point: Point2,
    /// 凸度（bulge）- 用于弧线段，0表示直线
    pub bulge: f64,
}

impl PolylineVertex {
    pub fn new(point: Point2) -> Self {
        Self { point, bulge: 0.0 }
    }

    pub fn with_bulge(point: Point2, bulge: f64) -> Self {
        Self { point, bulge }
    }
}

/// 多段线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<PolylineVertex>,
    /// 是否闭合
    pub closed: bool,
}

impl Polyline {
    pub fn new(vertices: Vec<PolylineVertex>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// 从点列表创建（所有顶点都是直线连接）
    pub fn from_points(points: impl IntoIterator<Item = Point2>, closed: bool) -> Self {
        Self {
            vertices: points.into_iter().map(PolylineVertex::new).collect(),
            closed,
        }
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        if self.vertices.len() < 2 {
            return 0;
        }
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// 爆炸为独立的线段/圆弧
    pub fn explode(&self) -> Vec<Geometry> {
        if self.vertices.len() < 2 {
            return vec![];
        }

        let mut result = Vec::with_capacity(self.segment_count());

        for i in 0..self.segment_count() {
            let v1 = &self.vertices[i];
            let v2 = &self.vertices[(i + 1) % self.vertices.len()];

            if v1.bulge.abs() < EPSILON {
                result.push(Geometry::Line(Line::new(v1.point, v2.point)));
            } else if let Some(arc) = self.vertex_pair_to_arc(v1, v2) {
                result.push(Geometry::Arc(arc));
            } else {
                // 退化弧段回退到直线
                result.push(Geometry::Line(Line::new(v1.point, v2.point)));
            }
        }

        result
    }

    /// 将带凸度的顶点对转换为圆弧
    fn vertex_pair_to_arc(&self, v1: &PolylineVertex, v2: &PolylineVertex) -> Option<Arc> {
        let chord = v2.point - v1.point;
        let chord_len = chord.norm();

        if chord_len < EPSILON {
            return None;
        }

        let bulge = v1.bulge;
        let s = chord_len / 2.0;
        let h = s * bulge; // 弧高

        let mid = Point2::new(
            (v1.point.x + v2.point.x) / 2.0,
            (v1.point.y + v2.point.y) / 2.0,
        );

        let radius = (s * s + h * h) / (2.0 * h.abs());
        let d = radius - h.abs(); // 圆心到弦的距离

        let perp = if bulge > 0.0 {
            Vector2::new(-chord.y, chord.x).normalize()
        } else {
            Vector2::new(chord.y, -chord.x).normalize()
        };

        let center = mid + perp * d;

        let start_angle = (v1.point.y - center.y).atan2(v1.point.x - center.x);
        let end_angle = (v2.point.y - center.y).atan2(v2.point.x - center.x);

        if bulge > 0.0 {
            Some(Arc::new(center, radius, start_angle, end_angle))
        } else {
            Some(Arc::new(center, radius, end_angle, start_angle))
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        if self.vertices.is_empty() {
            return BoundingBox2::empty();
        }
        BoundingBox2::from_points(self.vertices.iter().map(|v| v.point))
    }
}

/// 矩形（轴对齐）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: Point2,
    pub max: Point2,
}

impl Rectangle {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 四个角点（从左下角起逆时针）
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// 四条边
    pub fn edges(&self) -> [Line; 4] {
        let c = self.corners();
        [
            Line::new(c[0], c[1]),
            Line::new(c[1], c[2]),
            Line::new(c[2], c[3]),
            Line::new(c[3], c[0]),
        ]
    }

    /// 中心点
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(self.min, self.max)
    }
}

/// 样条曲线
///
/// 只支持捕捉所需的简单三次采样，不做B样条曲面数学。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spline {
    pub control_points: Vec<Point2>,
    /// 拟合点（曲线经过的点）；为空时退化为控制点折线
    pub fit_points: Vec<Point2>,
}

impl Spline {
    pub fn new(control_points: Vec<Point2>, fit_points: Vec<Point2>) -> Self {
        Self {
            control_points,
            fit_points,
        }
    }

    /// 曲线的定义点：优先拟合点
    pub fn defining_points(&self) -> &[Point2] {
        if self.fit_points.is_empty() {
            &self.control_points
        } else {
            &self.fit_points
        }
    }

    /// Catmull-Rom三次采样
    ///
    /// 曲线经过全部定义点；每段细分固定次数，
    /// 采样数固定以保证逐帧结果一致。
    pub fn sample(&self) -> Vec<Point2> {
        let pts = self.defining_points();
        if pts.len() < 2 {
            return pts.to_vec();
        }
        if pts.len() == 2 {
            return vec![pts[0], pts[1]];
        }

        let mut out = Vec::with_capacity((pts.len() - 1) * SPLINE_SUBDIVISIONS + 1);
        for i in 0..pts.len() - 1 {
            let p0 = pts[i.saturating_sub(1)];
            let p1 = pts[i];
            let p2 = pts[i + 1];
            let p3 = pts[(i + 2).min(pts.len() - 1)];

            for k in 0..SPLINE_SUBDIVISIONS {
                let t = k as f64 / SPLINE_SUBDIVISIONS as f64;
                out.push(catmull_rom(p0, p1, p2, p3, t));
            }
        }
        out.push(*pts.last().unwrap());
        out
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points(
            self.control_points
                .iter()
                .chain(self.fit_points.iter())
                .copied(),
        )
    }
}

fn catmull_rom(p0: Point2, p1: Point2, p2: Point2, p3: Point2, t: f64) -> Point2 {
    let t2 = t * t;
    let t3 = t2 * t;
    let basis = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * ((2.0 * b) + (-a + c) * t + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    Point2::new(basis(p0.x, p1.x, p2.x, p3.x), basis(p0.y, p1.y, p2.y, p3.y))
}

/// 文本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    /// 插入点（基准点）
    pub position: Point2,
    /// 文本内容
    pub content: String,
    /// 文本高度
    pub height: f64,
}

impl Text {
    pub fn new(position: Point2, content: impl Into<String>, height: f64) -> Self {
        Self {
            position,
            content: content.into(),
            height,
        }
    }
}

/// 块引用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insert {
    /// 插入点
    pub position: Point2,
    /// 块名称
    pub block_name: String,
    /// 旋转角（弧度）
    pub rotation: f64,
}

impl Insert {
    pub fn new(position: Point2, block_name: impl Into<String>) -> Self {
        Self {
            position,
            block_name: block_name.into(),
            rotation: 0.0,
        }
    }
}

/// 尺寸标注
///
/// 只保留捕捉所需的定义点。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    /// 第一个测量点
    pub definition_point1: Point2,
    /// 第二个测量点
    pub definition_point2: Point2,
    /// 标注线位置点
    pub line_location: Point2,
}

impl Dimension {
    pub fn new(p1: Point2, p2: Point2, location: Point2) -> Self {
        Self {
            definition_point1: p1,
            definition_point2: p2,
            line_location: location,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([
            self.definition_point1,
            self.definition_point2,
            self.line_location,
        ])
    }
}

/// 引线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leader {
    pub vertices: Vec<Point2>,
}

impl Leader {
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }
}

/// 填充
///
/// 捕捉只关心边界多边形。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hatch {
    /// 闭合边界顶点
    pub boundary: Vec<Point2>,
}

impl Hatch {
    pub fn new(boundary: Vec<Point2>) -> Self {
        Self { boundary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert!((line.length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_arc_from_degrees() {
        // 度数在构造边界转换为弧度
        let arc = Arc::from_degrees(Point2::origin(), 1.0, 0.0, 90.0);
        assert!((arc.end_angle - std::f64::consts::FRAC_PI_2).abs() < EPSILON);

        let end = arc.end_point();
        assert!(end.x.abs() < EPSILON);
        assert!((end.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_arc_midpoint() {
        let arc = Arc::new(Point2::origin(), 2.0, 0.0, std::f64::consts::PI);
        let mid = arc.midpoint();
        assert!(mid.x.abs() < EPSILON);
        assert!((mid.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_polyline_explode() {
        let pl = Polyline::from_points(
            [
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
            ],
            false,
        );

        let exploded = pl.explode();
        assert_eq!(exploded.len(), 2);
        assert!(matches!(exploded[0], Geometry::Line(_)));
        assert!(matches!(exploded[1], Geometry::Line(_)));
    }

    #[test]
    fn test_bulge_segment_becomes_arc() {
        // 凸度1 = 半圆；弧的端点必须等于两个顶点
        let pl = Polyline::new(
            vec![
                PolylineVertex::with_bulge(Point2::new(0.0, 0.0), 1.0),
                PolylineVertex::new(Point2::new(10.0, 0.0)),
            ],
            false,
        );

        let exploded = pl.explode();
        assert_eq!(exploded.len(), 1);
        let Geometry::Arc(arc) = &exploded[0] else {
            panic!("expected arc segment");
        };

        let endpoints = [arc.start_point(), arc.end_point()];
        for target in [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)] {
            assert!(
                endpoints.iter().any(|p| (p - target).norm() < 1e-6),
                "arc endpoints must match the vertices"
            );
        }
        assert!((arc.radius - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rectangle_decomposition() {
        let rect = Rectangle::new(Point2::new(0.0, 0.0), Point2::new(4.0, 2.0));
        assert_eq!(rect.corners().len(), 4);
        assert_eq!(rect.edges().len(), 4);
        let center = rect.center();
        assert!((center.x - 2.0).abs() < EPSILON);
        assert!((center.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_spline_sample_passes_through_fit_points() {
        let spline = Spline::new(
            vec![],
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(5.0, 5.0),
                Point2::new(10.0, 0.0),
            ],
        );
        let samples = spline.sample();
        for fit in spline.defining_points() {
            assert!(
                samples.iter().any(|p| (p - *fit).norm() < 1e-6),
                "sampled curve must pass through every fit point"
            );
        }
    }

    #[test]
    fn test_nonfinite_entity_detected() {
        let bad = Geometry::Line(Line::new(
            Point2::new(f64::NAN, 0.0),
            Point2::new(1.0, 1.0),
        ));
        assert!(!bad.is_finite());
    }
}
