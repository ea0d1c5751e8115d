//! 圆心捕捉
//!
//! 圆、圆弧、椭圆的中心，以及矩形的几何中心。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::Geometry;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct CenterEngine;

impl SnapEngine for CenterEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Center
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            let center = match &entity.geometry {
                Geometry::Circle(c) => c.center,
                Geometry::Arc(a) => a.center,
                Geometry::Ellipse(e) => e.center,
                Geometry::Rectangle(r) => r.center(),
                _ => continue,
            };
            ctx.push_if_within(&mut out, center, SnapMode::Center, cursor, entity.id);
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
