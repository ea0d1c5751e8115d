//! 最近点捕捉
//!
//! 曲线上离光标最近的点：直线段用截断投影，
//! 圆/弧用径向投影（弧外时退到较近的端点）。
//! 椭圆、样条、填充边界经采样分解后按线段处理。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::Geometry;
use crate::kernel;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct NearestEngine;

impl SnapEngine for NearestEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Nearest
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            for primitive in entity.geometry.curve_primitives() {
                let nearest = match primitive {
                    Geometry::Line(line) => {
                        kernel::project_point_on_segment(cursor, &line.start, &line.end, true)
                    }
                    Geometry::Circle(circle) => {
                        kernel::closest_point_on_circle(&circle.center, circle.radius, cursor)
                    }
                    Geometry::Arc(arc) => {
                        match kernel::closest_point_on_circle(&arc.center, arc.radius, cursor) {
                            Some(p)
                                if arc.contains_angle(kernel::angle_of(&arc.center, &p)) =>
                            {
                                Some(p)
                            }
                            // 径向投影在弧外：取较近的端点
                            _ => {
                                let start = arc.start_point();
                                let end = arc.end_point();
                                if kernel::distance(&start, cursor)
                                    <= kernel::distance(&end, cursor)
                                {
                                    Some(start)
                                } else {
                                    Some(end)
                                }
                            }
                        }
                    }
                    _ => None,
                };

                if let Some(point) = nearest {
                    ctx.push_if_within(&mut out, point, SnapMode::Nearest, cursor, entity.id);
                }
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
