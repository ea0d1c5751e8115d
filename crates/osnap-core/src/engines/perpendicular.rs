//! 垂足捕捉
//!
//! 从光标向附近曲线作垂线：直线段取*无限*直线上的垂足
//! （不截断到线段），圆/弧取径向投影点。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::Geometry;
use crate::kernel;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct PerpendicularEngine;

impl SnapEngine for PerpendicularEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Perpendicular
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            for primitive in entity.geometry.curve_primitives() {
                let foot = match primitive {
                    Geometry::Line(line) => {
                        kernel::project_point_on_segment(cursor, &line.start, &line.end, false)
                    }
                    Geometry::Circle(circle) => {
                        kernel::closest_point_on_circle(&circle.center, circle.radius, cursor)
                    }
                    Geometry::Arc(arc) => {
                        kernel::closest_point_on_circle(&arc.center, arc.radius, cursor)
                            .filter(|p| arc.contains_angle(kernel::angle_of(&arc.center, p)))
                    }
                    _ => None,
                };

                if let Some(point) = foot {
                    ctx.push_if_within(&mut out, point, SnapMode::Perpendicular, cursor, entity.id);
                }
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
