//! 捕捉解析器
//!
//! 每帧解析的状态机（帧间无状态，会话状态除外）：
//!
//! 1. **收集**: 对 `启用模式 ∪ 临时覆盖` 中的每个模式，
//!    经容差模型算出世界半径后调用该模式引擎一次
//! 2. **合并**: 所有引擎返回的候选拼成一个列表
//! 3. **排序**: 严格全序
//!    `(优先级升序, 距离升序, 实体ID升序, 模式升序)`——
//!    四个键保证几何重合的候选也有唯一确定的赢家
//! 4. **选取**: 排序后的第一个候选；列表为空则本帧"无捕捉"
//! 5. **快照**: 结果写入会话；悬停标记和点击提交都消费
//!    这份快照，不允许各自重新解析
//! 6. **循环**: 显式用户动作（如反复Tab）在本帧已排序的
//!    列表内按实际长度取模推进，不重新收集
//!
//! 确定性契约：固定的
//! `(实体集, 启用模式, 光标, 视图缩放)` 输入必须
//! 逐次产生完全相同的解析结果。

use crate::engines::{all_engines, SnapContext, SnapEngine};
use crate::entity::{Entity, EntityId};
use crate::math::{is_finite_point, Point2};
use crate::session::SnapSessionState;
use crate::snap::{SnapCandidate, SnapConfig};
use crate::spatial::SpatialIndex;
use crate::tolerance::ToleranceModel;
use tracing::{debug, warn};

/// 捕捉解析器
///
/// 持有配置、空间索引和全部模式引擎。
/// 会话状态由外部拥有、按引用传入——没有进程级单例，
/// 多个绘图会话可以共用一个解析器而互不串扰。
pub struct SnapResolver {
    config: SnapConfig,
    index: SpatialIndex,
    engines: Vec<Box<dyn SnapEngine>>,
}

impl SnapResolver {
    pub fn new(config: SnapConfig) -> Self {
        let index = SpatialIndex::new(config.cell_size);
        Self {
            config,
            index,
            engines: all_engines(),
        }
    }

    /// 获取配置
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// 获取配置（可变；下一帧生效）
    pub fn config_mut(&mut self) -> &mut SnapConfig {
        &mut self.config
    }

    /// 结构性变化通知
    ///
    /// 实体所有者在增删改实体后调用，使空间索引失效；
    /// 索引在下一帧开始时惰性重建。
    pub fn notify_entities_changed(&mut self) {
        self.index.mark_dirty();
    }

    /// 单帧解析入口
    ///
    /// 对给定输入纯函数式地解析出最优捕捉点（或无），
    /// 唯一的副作用是把结果快照写入 `session`。
    pub fn resolve(
        &mut self,
        cursor: Point2,
        view_scale: f64,
        entities: &[Entity],
        session: &mut SnapSessionState,
    ) -> Option<SnapCandidate> {
        self.resolve_with(cursor, view_scale, entities, session, None, None)
    }

    /// 带命令上下文的解析入口
    ///
    /// - `excluded`: 正在绘制中的实体，不参与捕捉
    /// - `reference_point`: 进行中命令的起点（切点/平行捕捉需要）
    pub fn resolve_with(
        &mut self,
        cursor: Point2,
        view_scale: f64,
        entities: &[Entity],
        session: &mut SnapSessionState,
        excluded: Option<EntityId>,
        reference_point: Option<Point2>,
    ) -> Option<SnapCandidate> {
        // 临时覆盖恰好参与一次解析，即使本帧提前结束也被消耗
        let override_mode = session.take_temporary_override();

        let mut active = session.enabled_modes();
        if let Some(mode) = override_mode {
            active.set(mode, true);
        }

        // 无效输入/空模式集确定性地解析为"无捕捉"
        if !is_finite_point(&cursor) || active.is_empty() {
            session.store_tick(vec![]);
            return None;
        }

        let Some(tolerance) =
            ToleranceModel::new(&self.config, session.aperture_pixels(), view_scale)
        else {
            warn!(
                aperture = session.aperture_pixels(),
                view_scale, "invalid aperture or view scale, resolving to no snap"
            );
            session.store_tick(vec![]);
            return None;
        };

        // 配置的单元大小变化时重建索引
        if (self.index.cell_size() - self.config.cell_size).abs() > f64::EPSILON {
            self.index = SpatialIndex::new(self.config.cell_size);
        }

        // 过期检测：实体数对不上说明调用方漏了
        // notify_entities_changed()。记录契约违规并自愈，
        // 而不是崩溃。
        if !self.index.is_dirty() && self.index.indexed_entities() != entities.len() {
            warn!(
                indexed = self.index.indexed_entities(),
                actual = entities.len(),
                "entity set changed without notify_entities_changed(), rebuilding"
            );
            self.index.mark_dirty();
        }
        self.index.ensure_built(entities);

        // 激活引擎的可选预处理钩子
        for engine in &mut self.engines {
            if active.is_enabled(engine.mode()) {
                engine.initialize(entities);
            }
        }

        let ctx = SnapContext {
            entities,
            index: &self.index,
            config: &self.config,
            tolerance,
            excluded,
            reference_point,
        };

        // 收集 + 合并
        let mut merged: Vec<SnapCandidate> = Vec::new();
        for engine in &self.engines {
            if !active.is_enabled(engine.mode()) {
                continue;
            }
            merged.extend(engine.find_candidates(&cursor, &ctx));
        }

        // 排序：四键严格全序
        merged.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.distance_to_cursor.total_cmp(&b.distance_to_cursor))
                .then_with(|| a.source_entity_id.cmp(&b.source_entity_id))
                .then_with(|| a.mode.cmp(&b.mode))
        });

        debug!(
            candidates = merged.len(),
            winner = ?merged.first().map(|c| c.mode),
            "snap tick resolved"
        );

        // 快照
        session.store_tick(merged);
        session.last_snapshot().cloned()
    }

    /// 循环到下一个候选
    ///
    /// 只在最近一帧已排序的候选列表内推进并重写快照，
    /// 不触发新的收集。
    pub fn cycle_next(&self, session: &mut SnapSessionState) -> Option<SnapCandidate> {
        session.cycle()
    }
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::new(SnapConfig::default())
    }
}

impl Drop for SnapResolver {
    fn drop(&mut self) {
        for engine in &mut self.engines {
            engine.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, Geometry, Line};
    use crate::snap::{SnapMode, SnapModeSet};

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Entity {
        Entity::new(Geometry::Line(Line::new(
            Point2::new(x1, y1),
            Point2::new(x2, y2),
        )))
    }

    fn circle(cx: f64, cy: f64, r: f64) -> Entity {
        Entity::new(Geometry::Circle(Circle::new(Point2::new(cx, cy), r)))
    }

    fn session_with(modes: &[SnapMode]) -> SnapSessionState {
        let mut session = SnapSessionState::default();
        session.set_enabled_modes(SnapModeSet::from_modes(modes.iter().copied()));
        session
    }

    #[test]
    fn test_empty_scene_resolves_to_none() {
        let mut resolver = SnapResolver::default();
        let mut session = SnapSessionState::default();

        let result = resolver.resolve(Point2::new(3.0, 4.0), 1.0, &[], &mut session);
        assert!(result.is_none());
        assert!(session.last_snapshot().is_none());
    }

    #[test]
    fn test_empty_mode_set_resolves_to_none() {
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[]);
        let entities = vec![line(0.0, 0.0, 10.0, 0.0)];

        let result = resolver.resolve(Point2::new(0.5, 0.5), 1.0, &entities, &mut session);
        assert!(result.is_none());
    }

    #[test]
    fn test_determinism() {
        let entities = vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(5.0, -5.0, 5.0, 5.0),
            circle(5.0, 3.0, 2.0),
        ];
        let cursor = Point2::new(4.8, 0.3);

        let mut resolver = SnapResolver::default();
        let mut s1 = SnapSessionState::default();
        let mut s2 = SnapSessionState::default();

        let a = resolver.resolve(cursor, 1.0, &entities, &mut s1);
        let b = resolver.resolve(cursor, 1.0, &entities, &mut s2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_priority_decides_before_distance() {
        // 两条线交于 (5,0)，第三条线的端点也在 (5,0)：
        // 候选几何重合，只有优先级表决定模式赢家
        let entities = vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(5.0, -5.0, 5.0, 5.0),
            line(5.0, 0.0, 9.0, 6.0),
        ];
        let cursor = Point2::new(5.2, 0.2);

        let mut config = SnapConfig::default();
        config.set_priority(SnapMode::Endpoint, 5);
        config.set_priority(SnapMode::Intersection, 0);
        let mut resolver = SnapResolver::new(config);
        let mut session = session_with(&[SnapMode::Endpoint, SnapMode::Intersection]);

        let winner = resolver
            .resolve(cursor, 1.0, &entities, &mut session)
            .unwrap();
        assert_eq!(winner.mode, SnapMode::Intersection);

        // 交换优先级后赢家翻转，与调用顺序无关
        let mut config = SnapConfig::default();
        config.set_priority(SnapMode::Endpoint, 0);
        config.set_priority(SnapMode::Intersection, 5);
        let mut resolver = SnapResolver::new(config);
        let mut session = session_with(&[SnapMode::Endpoint, SnapMode::Intersection]);

        let winner = resolver
            .resolve(cursor, 1.0, &entities, &mut session)
            .unwrap();
        assert_eq!(winner.mode, SnapMode::Endpoint);
    }

    #[test]
    fn test_tie_break_by_entity_id() {
        // 两条线共享端点 (5,5)：同优先级、同距离，
        // 较小的实体ID获胜
        let e1 = line(5.0, 5.0, 10.0, 10.0);
        let e2 = line(5.0, 5.0, 0.0, 10.0);
        let smaller = e1.id.min(e2.id);
        let entities = vec![e1, e2];

        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint]);

        let winner = resolver
            .resolve(Point2::new(5.1, 5.1), 1.0, &entities, &mut session)
            .unwrap();
        assert_eq!(winner.source_entity_id, smaller);
    }

    #[test]
    fn test_radius_scales_with_zoom() {
        // 端点在世界距离4处；孔径8px：
        // 缩放1时半径8，捕捉到；缩放4时半径2，捕捉不到
        let entities = vec![line(4.0, 0.0, 20.0, 0.0)];
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint]);
        session.set_aperture_pixels(8.0);

        let cursor = Point2::new(0.0, 0.0);
        assert!(resolver
            .resolve(cursor, 1.0, &entities, &mut session)
            .is_some());
        assert!(resolver
            .resolve(cursor, 4.0, &entities, &mut session)
            .is_none());
    }

    #[test]
    fn test_dense_intersection_scenario() {
        // 三角形三条边加内部圆；光标正落在一个顶点上，
        // 端点和交点引擎给出同一个点，结果就是该顶点
        let entities = vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(10.0, 0.0, 5.0, 8.0),
            line(5.0, 8.0, 0.0, 0.0),
            circle(5.0, 2.8, 2.0),
        ];
        let cursor = Point2::new(0.0, 0.0);

        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint, SnapMode::Intersection]);

        let winner = resolver
            .resolve(cursor, 1.0, &entities, &mut session)
            .unwrap();
        assert!(winner.point.x.abs() < 1e-9);
        assert!(winner.point.y.abs() < 1e-9);
        assert!(winner.distance_to_cursor < 1e-9);
    }

    #[test]
    fn test_extension_probe_beyond_endpoint() {
        // 线段 (0,0)-(10,0)，光标在 (15,0)：基础半径2，
        // 延伸模式解析到端点之外延长线上的点，而不是端点本身
        let entities = vec![line(0.0, 0.0, 10.0, 0.0)];
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Extension]);
        session.set_aperture_pixels(2.0);

        let winner = resolver
            .resolve(Point2::new(15.0, 0.0), 1.0, &entities, &mut session)
            .unwrap();
        assert_eq!(winner.mode, SnapMode::Extension);
        assert!(winner.point.x > 10.0, "must land on the extension ray");
        assert!(winner.point.y.abs() < 1e-9);
    }

    #[test]
    fn test_cycle_wraps_at_candidate_count() {
        let entities = vec![line(0.0, 0.0, 10.0, 0.0)];
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint]);

        let first = resolver
            .resolve(Point2::new(5.0, 0.0), 1.0, &entities, &mut session)
            .unwrap();
        let n = session.candidate_count();
        assert_eq!(n, 2);

        // N次循环回到第一个候选；索引永不越过实际长度
        let mut last = None;
        for _ in 0..n {
            last = resolver.cycle_next(&mut session);
        }
        assert_eq!(last.unwrap(), first);
    }

    #[test]
    fn test_snapshot_shared_by_hover_and_commit() {
        let entities = vec![line(0.0, 0.0, 10.0, 0.0)];
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint]);

        let resolved = resolver.resolve(Point2::new(0.3, 0.2), 1.0, &entities, &mut session);
        // 提交方读取的快照与悬停方拿到的返回值是同一份
        assert_eq!(resolved.as_ref(), session.last_snapshot());
    }

    #[test]
    fn test_temporary_override_lasts_one_tick() {
        let entities = vec![circle(3.0, 0.0, 2.0)];
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint]);

        let cursor = Point2::new(2.5, 0.5);
        // 无覆盖：圆没有端点，解析为空
        assert!(resolver
            .resolve(cursor, 1.0, &entities, &mut session)
            .is_none());

        session.set_temporary_override(SnapMode::Center);
        let with_override = resolver
            .resolve(cursor, 1.0, &entities, &mut session)
            .unwrap();
        assert_eq!(with_override.mode, SnapMode::Center);

        // 覆盖只存活一帧
        assert!(resolver
            .resolve(cursor, 1.0, &entities, &mut session)
            .is_none());
    }

    #[test]
    fn test_grid_snap_uses_null_entity() {
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Grid]);

        let winner = resolver
            .resolve(Point2::new(12.0, 14.0), 1.0, &[], &mut session)
            .unwrap();
        assert_eq!(winner.mode, SnapMode::Grid);
        assert_eq!(winner.source_entity_id, EntityId::NULL);
        assert!((winner.point.x - 10.0).abs() < 1e-9);
        assert!((winner.point.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_excluded_entity_ignored() {
        let drawing = line(0.0, 0.0, 10.0, 0.0);
        let excluded_id = drawing.id;
        let entities = vec![drawing];

        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint]);

        let result = resolver.resolve_with(
            Point2::new(0.3, 0.2),
            1.0,
            &entities,
            &mut session,
            Some(excluded_id),
            None,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_malformed_entity_does_not_abort_tick() {
        let entities = vec![
            line(f64::NAN, 0.0, 10.0, 0.0),
            line(0.0, 0.0, 4.0, 4.0),
        ];
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint]);

        // 坏实体被跳过，其余实体照常解析
        let winner = resolver
            .resolve(Point2::new(0.2, 0.1), 1.0, &entities, &mut session)
            .unwrap();
        assert!((winner.point.x).abs() < 1e-9);
    }

    #[test]
    fn test_stale_index_self_heals() {
        let mut entities = vec![line(0.0, 0.0, 10.0, 0.0)];
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Endpoint]);

        resolver.resolve(Point2::new(0.3, 0.0), 1.0, &entities, &mut session);

        // 调用方忘记notify：实体数检测触发重建而不是崩溃
        entities.push(line(100.0, 100.0, 110.0, 100.0));
        let winner = resolver
            .resolve(Point2::new(100.2, 100.0), 1.0, &entities, &mut session)
            .unwrap();
        assert!((winner.point.x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tangent_requires_reference_point() {
        let entities = vec![circle(0.0, 0.0, 3.0)];
        let mut resolver = SnapResolver::default();
        let mut session = session_with(&[SnapMode::Tangent]);

        // 切点候选靠参考点定义
        let without = resolver.resolve(Point2::new(1.9, 2.5), 1.0, &entities, &mut session);
        assert!(without.is_none());

        let mut session = session_with(&[SnapMode::Tangent]);
        let with_reference = resolver.resolve_with(
            Point2::new(1.9, 2.5),
            1.0,
            &entities,
            &mut session,
            None,
            Some(Point2::new(5.0, 0.0)),
        );
        let winner = with_reference.unwrap();
        assert_eq!(winner.mode, SnapMode::Tangent);
        // 切点在圆上
        assert!(((winner.point - Point2::origin()).norm() - 3.0).abs() < 1e-9);
    }
}
