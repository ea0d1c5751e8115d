//! 网格点捕捉
//!
//! 与实体无关：按配置的网格间距取离光标最近的网格节点。
//! 合成候选，来源实体为保留的空ID。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::entity::EntityId;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct GridEngine;

impl SnapEngine for GridEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Grid
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let spacing = ctx.config.grid_spacing;
        if !spacing.is_finite() || spacing <= 0.0 {
            return vec![];
        }

        let grid_point = Point2::new(
            (cursor.x / spacing).round() * spacing,
            (cursor.y / spacing).round() * spacing,
        );

        let mut out = Vec::new();
        ctx.push_if_within(&mut out, grid_point, SnapMode::Grid, cursor, EntityId::NULL);
        cap_candidates(out, ctx.max_candidates())
    }
}
