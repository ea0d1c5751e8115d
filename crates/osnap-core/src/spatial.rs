//! 空间索引
//!
//! 网格分桶的捕捉点索引，支持：
//! - 近邻查询（端点捕捉的候选查找）
//! - 实体集结构变化后的惰性重建
//!
//! 重建由结构性变化触发（增删改实体），与相机移动无关。
//! 变更后未通知索引属于调用方契约违规：debug构建下告警，
//! release构建下退化为使用过期结果而不是崩溃。

use crate::entity::{Entity, EntityId};
use crate::math::Point2;
use std::collections::HashMap;
use tracing::debug;

/// 默认网格单元大小（世界单位）
pub const DEFAULT_CELL_SIZE: f64 = 100.0;

/// 捕捉点空间索引（基于网格）
#[derive(Debug)]
pub struct SpatialIndex {
    /// 网格单元大小
    cell_size: f64,

    /// 网格映射：网格坐标 -> 该单元内的捕捉点
    grid: HashMap<(i64, i64), Vec<(Point2, EntityId)>>,

    /// 需要重建
    dirty: bool,

    /// 上次重建时的实体数（用于过期检测）
    indexed_entities: usize,

    /// 索引的捕捉点总数
    point_count: usize,
}

impl SpatialIndex {
    /// 创建新的空间索引
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: if cell_size > 0.0 && cell_size.is_finite() {
                cell_size
            } else {
                DEFAULT_CELL_SIZE
            },
            grid: HashMap::new(),
            dirty: true,
            indexed_entities: 0,
            point_count: 0,
        }
    }

    /// 使用默认网格大小创建
    pub fn default_grid() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }

    /// 将世界坐标转换为网格坐标
    fn to_cell(&self, x: f64, y: f64) -> (i64, i64) {
        (
            (x / self.cell_size).floor() as i64,
            (y / self.cell_size).floor() as i64,
        )
    }

    /// 标记索引失效
    ///
    /// 实体所有者在结构性变化（添加/删除/编辑实体）后调用；
    /// 下一次解析开始时惰性重建。
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// 网格单元大小
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// 上次重建时的实体数
    pub fn indexed_entities(&self) -> usize {
        self.indexed_entities
    }

    /// 索引的捕捉点总数
    pub fn len(&self) -> usize {
        self.point_count
    }

    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    /// 惰性重建：仅在失效时从实体集重建
    pub fn ensure_built(&mut self, entities: &[Entity]) {
        if !self.dirty {
            return;
        }
        self.rebuild(entities);
    }

    /// 从实体的派生捕捉点重建索引
    pub fn rebuild(&mut self, entities: &[Entity]) {
        self.grid.clear();
        self.point_count = 0;

        for entity in entities {
            if !entity.geometry.is_finite() {
                continue;
            }
            for point in entity.geometry.endpoint_anchors() {
                let cell = self.to_cell(point.x, point.y);
                self.grid.entry(cell).or_default().push((point, entity.id));
                self.point_count += 1;
            }
        }

        self.indexed_entities = entities.len();
        self.dirty = false;

        debug!(
            entities = entities.len(),
            points = self.point_count,
            "spatial index rebuilt"
        );
    }

    /// 近邻查询：返回指定半径内的所有捕捉点
    ///
    /// 扫描点所在单元周围 `ceil(radius/cell_size)` 圈的单元，
    /// 再按实际距离过滤。扫描顺序固定，结果顺序由实体集
    /// 顺序决定，保证逐帧一致。
    pub fn query_nearby(&self, point: &Point2, radius: f64) -> Vec<(Point2, EntityId)> {
        if !radius.is_finite() || radius <= 0.0 {
            return vec![];
        }

        let ring = (radius / self.cell_size).ceil() as i64;
        let (cx, cy) = self.to_cell(point.x, point.y);

        let mut result = Vec::new();
        for gx in (cx - ring)..=(cx + ring) {
            for gy in (cy - ring)..=(cy + ring) {
                if let Some(points) = self.grid.get(&(gx, gy)) {
                    for &(p, id) in points {
                        if (p - *point).norm() <= radius {
                            result.push((p, id));
                        }
                    }
                }
            }
        }

        result
    }

    /// 清空索引
    pub fn clear(&mut self) {
        self.grid.clear();
        self.point_count = 0;
        self.indexed_entities = 0;
        self.dirty = true;
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::default_grid()
    }
}
