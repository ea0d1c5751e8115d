//! 交点捕捉
//!
//! 对光标附近的无序实体对做类型分派求交：
//! 线/线、线/圆、线/弧、圆/圆、圆/弧、弧/弧；
//! 多段线、矩形、椭圆、样条先分解为基础曲线。
//!
//! 成对扫描用包围盒近邻过滤限制在 `2×基础半径` 内，
//! 求出的交点再按交点模式半径（默认1.5×）过滤，
//! 成本由 `max_candidates` 和空间过滤约束，不是开放搜索。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::entity::EntityId;
use crate::geometry::Geometry;
use crate::kernel;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct IntersectionEngine;

impl SnapEngine for IntersectionEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Intersection
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let keep_radius = ctx.world_radius_for(SnapMode::Intersection);
        let pair_radius = 2.0 * ctx.base_radius();

        // 光标附近的实体及其基础曲线分解
        let nearby: Vec<(EntityId, Vec<Geometry>)> = ctx
            .active_entities()
            .filter(|e| e.geometry.bounding_box().distance_to_point(cursor) <= pair_radius)
            .map(|e| (e.id, e.geometry.curve_primitives()))
            .filter(|(_, prims)| !prims.is_empty())
            .collect();

        let mut out = Vec::new();

        for i in 0..nearby.len() {
            for j in (i + 1)..nearby.len() {
                let (id_a, prims_a) = &nearby[i];
                let (id_b, prims_b) = &nearby[j];
                // 交点涉及两个实体：记录较小的ID作为确定性的来源键
                let source = (*id_a).min(*id_b);

                for pa in prims_a {
                    for pb in prims_b {
                        for point in primitive_intersections(pa, pb) {
                            let dist = kernel::distance(&point, cursor);
                            if dist <= keep_radius {
                                out.push(SnapCandidate::new(
                                    point,
                                    SnapMode::Intersection,
                                    ctx.config.priority(SnapMode::Intersection),
                                    dist,
                                    source,
                                ));
                            }
                        }
                    }
                }
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}

/// 基础曲线对的交点分派
///
/// 实体分解只产出线段/圆/圆弧三种基础曲线，
/// 这里穷尽所有组合。
fn primitive_intersections(a: &Geometry, b: &Geometry) -> Vec<Point2> {
    match (a, b) {
        (Geometry::Line(l1), Geometry::Line(l2)) => {
            kernel::segment_segment_intersection(&l1.start, &l1.end, &l2.start, &l2.end)
                .into_iter()
                .collect()
        }
        (Geometry::Line(line), Geometry::Circle(circle))
        | (Geometry::Circle(circle), Geometry::Line(line)) => {
            kernel::line_circle_intersections(&line.start, &line.end, &circle.center, circle.radius)
        }
        (Geometry::Line(line), Geometry::Arc(arc)) | (Geometry::Arc(arc), Geometry::Line(line)) => {
            kernel::line_arc_intersections(&line.start, &line.end, arc)
        }
        (Geometry::Circle(c1), Geometry::Circle(c2)) => {
            kernel::circle_circle_intersections(&c1.center, c1.radius, &c2.center, c2.radius)
        }
        (Geometry::Circle(circle), Geometry::Arc(arc))
        | (Geometry::Arc(arc), Geometry::Circle(circle)) => {
            kernel::arc_circle_intersections(arc, &circle.center, circle.radius)
        }
        (Geometry::Arc(a1), Geometry::Arc(a2)) => {
            kernel::arc_circle_intersections(a1, &a2.center, a2.radius)
                .into_iter()
                .filter(|p| a2.contains_angle(kernel::angle_of(&a2.center, p)))
                .collect()
        }
        // 分解层保证不会出现其他组合
        _ => vec![],
    }
}
