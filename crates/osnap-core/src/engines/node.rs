//! 节点捕捉
//!
//! 点实体的位置和样条的拟合点。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::Geometry;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct NodeEngine;

impl SnapEngine for NodeEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Node
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            match &entity.geometry {
                Geometry::Point(p) => {
                    ctx.push_if_within(&mut out, p.position, SnapMode::Node, cursor, entity.id);
                }
                Geometry::Spline(s) => {
                    for &point in &s.fit_points {
                        ctx.push_if_within(&mut out, point, SnapMode::Node, cursor, entity.id);
                    }
                }
                _ => {}
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
