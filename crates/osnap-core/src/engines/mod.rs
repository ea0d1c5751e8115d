//! 捕捉引擎
//!
//! 每种捕捉模式一个引擎，遵循统一契约：
//! 同一帧内所有引擎消费同一个光标点和同一个实体子集，
//! 各自产出零到多个本模式的候选；引擎之间互不修改状态，
//! 也从不修改实体。
//!
//! 引擎按模式一文件组织。

mod center;
mod endpoint;
mod extension;
mod grid;
mod insertion;
mod intersection;
mod midpoint;
mod nearest;
mod node;
mod parallel;
mod perpendicular;
mod quadrant;
mod tangent;

pub use center::CenterEngine;
pub use endpoint::EndpointEngine;
pub use extension::ExtensionEngine;
pub use grid::GridEngine;
pub use insertion::InsertionEngine;
pub use intersection::IntersectionEngine;
pub use midpoint::MidpointEngine;
pub use nearest::NearestEngine;
pub use node::NodeEngine;
pub use parallel::ParallelEngine;
pub use perpendicular::PerpendicularEngine;
pub use quadrant::QuadrantEngine;
pub use tangent::TangentEngine;

use crate::entity::{Entity, EntityId};
use crate::kernel;
use crate::math::{is_finite_point, Point2};
use crate::snap::{SnapCandidate, SnapConfig, SnapMode};
use crate::spatial::SpatialIndex;
use crate::tolerance::ToleranceModel;

/// 单帧捕捉上下文
///
/// 收集阶段构造一次，只读地供给所有引擎。
pub struct SnapContext<'a> {
    /// 本帧的候选实体
    pub entities: &'a [Entity],
    /// 捕捉点空间索引（端点引擎使用）
    pub index: &'a SpatialIndex,
    /// 配置
    pub config: &'a SnapConfig,
    /// 本帧容差模型
    pub tolerance: ToleranceModel,
    /// 排除的实体（正在绘制中的实体不参与捕捉）
    pub excluded: Option<EntityId>,
    /// 参考点（进行中命令的起点，切点/平行捕捉使用）
    pub reference_point: Option<Point2>,
}

impl<'a> SnapContext<'a> {
    /// 指定模式的世界捕捉半径
    pub fn world_radius_for(&self, mode: SnapMode) -> f64 {
        self.tolerance.radius_for(mode)
    }

    /// 基础世界半径（系数1）
    pub fn base_radius(&self) -> f64 {
        self.tolerance.base_radius()
    }

    /// 每引擎的候选数上限
    pub fn max_candidates(&self) -> usize {
        self.config.max_candidates
    }

    /// 参与捕捉的实体：跳过被排除的和坐标非有限的
    pub fn active_entities(&self) -> impl Iterator<Item = &'a Entity> + '_ {
        let excluded = self.excluded;
        self.entities
            .iter()
            .filter(move |e| Some(e.id) != excluded)
            .filter(|e| e.geometry.is_finite())
    }

    /// 构造候选
    pub fn candidate(
        &self,
        point: Point2,
        mode: SnapMode,
        cursor: &Point2,
        source: EntityId,
    ) -> SnapCandidate {
        SnapCandidate::new(
            point,
            mode,
            self.config.priority(mode),
            kernel::distance(&point, cursor),
            source,
        )
    }

    /// 点在模式半径内时构造候选并推入列表
    pub fn push_if_within(
        &self,
        out: &mut Vec<SnapCandidate>,
        point: Point2,
        mode: SnapMode,
        cursor: &Point2,
        source: EntityId,
    ) {
        if !is_finite_point(&point) {
            return;
        }
        let dist = kernel::distance(&point, cursor);
        if dist <= self.world_radius_for(mode) {
            out.push(SnapCandidate::new(
                point,
                mode,
                self.config.priority(mode),
                dist,
                source,
            ));
        }
    }
}

/// 捕捉引擎契约
///
/// `initialize`/`dispose` 是可选的生命周期钩子
/// （如索引预构建）；大多数引擎无状态，使用默认实现。
pub trait SnapEngine {
    /// 引擎负责的捕捉模式
    fn mode(&self) -> SnapMode;

    /// 可选的预处理
    fn initialize(&mut self, _entities: &[Entity]) {}

    /// 针对光标位置产出本模式的候选
    fn find_candidates(&self, cursor: &Point2, ctx: &SnapContext<'_>) -> Vec<SnapCandidate>;

    /// 可选的清理
    fn dispose(&mut self) {}
}

/// 截断到每引擎候选上限
///
/// 先按（距离、实体ID、模式）全序排序再截断，
/// 保证密集场景下留下的候选逐帧一致。
pub fn cap_candidates(mut candidates: Vec<SnapCandidate>, max: usize) -> Vec<SnapCandidate> {
    candidates.sort_by(|a, b| {
        a.distance_to_cursor
            .total_cmp(&b.distance_to_cursor)
            .then_with(|| a.source_entity_id.cmp(&b.source_entity_id))
            .then_with(|| a.mode.cmp(&b.mode))
    });
    candidates.truncate(max);
    candidates
}

/// 构造全部十三个引擎（按模式声明顺序）
pub fn all_engines() -> Vec<Box<dyn SnapEngine>> {
    vec![
        Box::new(EndpointEngine),
        Box::new(MidpointEngine),
        Box::new(IntersectionEngine),
        Box::new(CenterEngine),
        Box::new(QuadrantEngine),
        Box::new(TangentEngine),
        Box::new(PerpendicularEngine),
        Box::new(ParallelEngine),
        Box::new(NearestEngine),
        Box::new(NodeEngine),
        Box::new(ExtensionEngine),
        Box::new(InsertionEngine),
        Box::new(GridEngine),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_engines_cover_all_modes() {
        let engines = all_engines();
        assert_eq!(engines.len(), SnapMode::COUNT);
        for (engine, mode) in engines.iter().zip(SnapMode::ALL) {
            assert_eq!(engine.mode(), mode);
        }
    }

    #[test]
    fn test_cap_candidates_deterministic() {
        use crate::entity::EntityId;

        let make = |x: f64, dist: f64, id: u64| {
            SnapCandidate::new(
                Point2::new(x, 0.0),
                SnapMode::Endpoint,
                0,
                dist,
                EntityId::from_raw(id),
            )
        };

        let capped = cap_candidates(vec![make(3.0, 3.0, 1), make(1.0, 1.0, 2), make(2.0, 2.0, 3)], 2);
        assert_eq!(capped.len(), 2);
        assert!((capped[0].distance_to_cursor - 1.0).abs() < f64::EPSILON);
        assert!((capped[1].distance_to_cursor - 2.0).abs() < f64::EPSILON);
    }
}
