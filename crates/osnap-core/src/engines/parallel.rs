//! 平行捕捉
//!
//! 有参考点时：对每条附近的直线段方向，把光标投影到
//! "过参考点、与该段平行"的直线上，捕捉投影点——
//! 用于沿已有线的方向绘制平行线。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::Geometry;
use crate::kernel;
use crate::math::{Point2, EPSILON};
use crate::snap::{SnapCandidate, SnapMode};

pub struct ParallelEngine;

impl SnapEngine for ParallelEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Parallel
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let Some(reference) = ctx.reference_point else {
            return vec![];
        };

        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            for primitive in entity.geometry.curve_primitives() {
                let Geometry::Line(line) = primitive else {
                    continue;
                };

                let dir = line.end - line.start;
                if dir.norm() < EPSILON {
                    continue;
                }

                // 过参考点的平行线
                let through = reference + dir;
                if let Some(point) =
                    kernel::project_point_on_segment(cursor, &reference, &through, false)
                {
                    ctx.push_if_within(&mut out, point, SnapMode::Parallel, cursor, entity.id);
                }
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
