//! 切点捕捉
//!
//! 从参考点（进行中命令的起点）向圆/弧作切线，
//! 捕捉切点。没有参考点时本模式不产出候选。
//! 多段线的凸度弧段经分解后同样参与。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::{Circle, Geometry};
use crate::kernel;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct TangentEngine;

impl SnapEngine for TangentEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Tangent
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let Some(reference) = ctx.reference_point else {
            return vec![];
        };

        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            for primitive in entity.geometry.curve_primitives() {
                match primitive {
                    Geometry::Circle(circle) => {
                        for point in kernel::tangent_points(&circle, &reference) {
                            ctx.push_if_within(&mut out, point, SnapMode::Tangent, cursor, entity.id);
                        }
                    }
                    Geometry::Arc(arc) => {
                        let full = Circle::new(arc.center, arc.radius);
                        for point in kernel::tangent_points(&full, &reference) {
                            if arc.contains_angle(kernel::angle_of(&arc.center, &point)) {
                                ctx.push_if_within(
                                    &mut out,
                                    point,
                                    SnapMode::Tangent,
                                    cursor,
                                    entity.id,
                                );
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
