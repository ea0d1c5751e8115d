//! 中点捕捉
//!
//! 直线段取几何中点，圆弧取扫角一半处的弧中点。
//! 多段线逐段处理（含凸度弧段），矩形取四条边的中点。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::Geometry;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct MidpointEngine;

impl SnapEngine for MidpointEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Midpoint
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            match &entity.geometry {
                Geometry::Line(line) => {
                    ctx.push_if_within(&mut out, line.midpoint(), SnapMode::Midpoint, cursor, entity.id);
                }
                Geometry::Arc(arc) => {
                    ctx.push_if_within(&mut out, arc.midpoint(), SnapMode::Midpoint, cursor, entity.id);
                }
                Geometry::Polyline(pl) => {
                    for segment in pl.explode() {
                        let mid = match segment {
                            Geometry::Line(l) => l.midpoint(),
                            Geometry::Arc(a) => a.midpoint(),
                            _ => continue,
                        };
                        ctx.push_if_within(&mut out, mid, SnapMode::Midpoint, cursor, entity.id);
                    }
                }
                Geometry::Rectangle(rect) => {
                    for edge in rect.edges() {
                        ctx.push_if_within(
                            &mut out,
                            edge.midpoint(),
                            SnapMode::Midpoint,
                            cursor,
                            entity.id,
                        );
                    }
                }
                _ => {}
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
