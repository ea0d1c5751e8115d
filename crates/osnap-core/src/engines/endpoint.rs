//! 端点捕捉
//!
//! 唯一走空间索引的引擎：索引里存的就是实体的端点类
//! 锚点（线段端点、弧端点、多段线顶点、矩形角点等），
//! 这里只做半径查询和排除过滤。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct EndpointEngine;

impl SnapEngine for EndpointEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Endpoint
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let radius = ctx.world_radius_for(SnapMode::Endpoint);

        let mut out = Vec::new();
        for (point, id) in ctx.index.query_nearby(cursor, radius) {
            if Some(id) == ctx.excluded {
                continue;
            }
            out.push(ctx.candidate(point, SnapMode::Endpoint, cursor, id));
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
