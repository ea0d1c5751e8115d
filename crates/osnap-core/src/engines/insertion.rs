//! 插入点捕捉
//!
//! 纯数据提取，没有几何计算：按实体类型读取命名点——
//! 文本基准点、块插入点、标注定义点、引线顶点、
//! 样条控制点。

use super::{cap_candidates, SnapContext, SnapEngine};
use crate::geometry::Geometry;
use crate::math::Point2;
use crate::snap::{SnapCandidate, SnapMode};

pub struct InsertionEngine;

impl SnapEngine for InsertionEngine {
    fn mode(&self) -> SnapMode {
        SnapMode::Insertion
    }

    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate> {
        let mut out = Vec::new();

        for entity in ctx.active_entities() {
            let points: Vec<Point2> = match &entity.geometry {
                Geometry::Text(t) => vec![t.position],
                Geometry::Insert(i) => vec![i.position],
                Geometry::Dimension(d) => vec![d.definition_point1, d.definition_point2],
                Geometry::Leader(l) => l.vertices.clone(),
                Geometry::Spline(s) => s.control_points.clone(),
                _ => continue,
            };

            for point in points {
                ctx.push_if_within(&mut out, point, SnapMode::Insertion, cursor, entity.id);
            }
        }

        cap_candidates(out, ctx.max_candidates())
    }
}
