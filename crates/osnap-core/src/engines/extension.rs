//! 延伸捕捉
//!
//! 捕捉线段端点之外的"虚拟延长线"上的点：
//! - 沿延长方向按固定距离阶梯（配置项，默认25/50/100/200/300
//!   世界单位）放置探测点；
//! - 光标落在线段参数范围之外时，加上光标在无限直线上的
//!   投影点本身。
//!
//! 本模式刻意比基础半径看得更远（默认2倍系数），
//! 这是CAD工具延伸线的标准行为。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::entity::EntityId;
use crate::geometry::Geometry;
use crate::kernel;
use crate::math::{Point2, EPSILON};
use crate::snap::{SnapCandidate, SnapMode};

pub struct ExtensionEngine;

impl SnapEngine for ExtensionEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Extension
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            match &entity.geometry {
                Geometry::Line(line) => {
                    probe_beyond(ctx, &mut out, cursor, entity.id, &line.end, &line.start);
                    probe_beyond(ctx, &mut out, cursor, entity.id, &line.start, &line.end);
                }
                Geometry::Polyline(pl) if !pl.closed && pl.vertices.len() >= 2 => {
                    // 开放多段线只延伸两端的直线段
                    let first = &pl.vertices[0];
                    let second = &pl.vertices[1];
                    if first.bulge.abs() < EPSILON {
                        probe_beyond(ctx, &mut out, cursor, entity.id, &first.point, &second.point);
                    }

                    let n = pl.vertices.len();
                    let last = &pl.vertices[n - 1];
                    let before_last = &pl.vertices[n - 2];
                    if before_last.bulge.abs() < EPSILON {
                        probe_beyond(
                            ctx,
                            &mut out,
                            cursor,
                            entity.id,
                            &last.point,
                            &before_last.point,
                        );
                    }
                }
                _ => {}
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}

/// 在 `anchor` 端点之外、沿 `inward -> anchor` 方向探测
fn probe_beyond(
    ctx: &SnapContext<'_>,
    out: &mut Vec<SnapCandidate>,
    cursor: &Point2,
    source: EntityId,
    anchor: &Point2,
    inward: &Point2,
) {
    let dir = *anchor - *inward;
    let len = dir.norm();
    if len < EPSILON {
        return;
    }
    let dir = dir / len;

    // 距离阶梯上的探测点
    for &d in &ctx.config.extension_ladder {
        ctx.push_if_within(out, *anchor + dir * d, SnapMode::Extension, cursor, source);
    }

    // 光标投影越过端点时，投影点本身就在延长线上
    if let Some(t) = kernel::segment_param(cursor, inward, anchor) {
        if t > 1.0 {
            if let Some(foot) = kernel::project_point_on_segment(cursor, inward, anchor, false) {
                ctx.push_if_within(out, foot, SnapMode::Extension, cursor, source);
            }
        }
    }
}
