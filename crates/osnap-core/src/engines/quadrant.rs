//! 象限点捕捉
//!
//! 圆/弧在 0°、90°、180°、270° 方向的点；
//! 弧只保留落在扫角范围内的象限点；
//! 椭圆取长短轴的四个端点。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::Geometry;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

const QUADRANT_ANGLES: [f64; 4] = [
    0.0,
    std::f64::consts::FRAC_PI_2,
    std::f64::consts::PI,
    3.0 * std::f64::consts::FRAC_PI_2,
];

pub struct QuadrantEngine;

impl SnapEngine for QuadrantEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Quadrant
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            match &entity.geometry {
                Geometry::Circle(circle) => {
                    for angle in QUADRANT_ANGLES {
                        ctx.push_if_within(
                            &mut out,
                            circle.point_at_angle(angle),
                            SnapMode::Quadrant,
                            cursor,
                            entity.id,
                        );
                    }
                }
                Geometry::Arc(arc) => {
                    for angle in QUADRANT_ANGLES {
                        if !arc.contains_angle(angle) {
                            continue;
                        }
                        let point = Point2::new(
                            arc.center.x + arc.radius * angle.cos(),
                            arc.center.y + arc.radius * angle.sin(),
                        );
                        ctx.push_if_within(&mut out, point, SnapMode::Quadrant, cursor, entity.id);
                    }
                }
                Geometry::Ellipse(ellipse) => {
                    for point in ellipse.axis_endpoints() {
                        ctx.push_if_within(&mut out, point, SnapMode::Quadrant, cursor, entity.id);
                    }
                }
                _ => {}
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
