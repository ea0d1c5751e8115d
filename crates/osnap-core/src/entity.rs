//! 实体定义
//!
//! `Entity` 把唯一标识符和几何数据绑定在一起。
//! 解析过程中实体只被借用，引擎从不修改实体。

use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// 实体唯一标识符
///
/// 单调递增分配；有全序，解析策略用它做确定性的
/// 同分决胜键。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(u64);

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// 保留的空ID，永不分配给实体
    ///
    /// 不属于任何实体的合成候选（如网格点）使用它。
    pub const NULL: EntityId = EntityId(0);

    /// 分配新的实体ID
    pub fn new() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// 从已知的数值构造（文件导入等外部来源）
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 图形实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub geometry: Geometry,
}

impl Entity {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: EntityId::new(),
            geometry,
        }
    }

    pub fn with_id(id: EntityId, geometry: Geometry) -> Self {
        Self { id, geometry }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;
    use crate::math::Point2;

    #[test]
    fn test_entity_id_ordering() {
        let a = EntityId::from_raw(3);
        let b = EntityId::from_raw(7);
        assert!(a < b);
        assert!(EntityId::NULL < a);
    }

    #[test]
    fn test_entity_id_allocation_monotonic() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert!(a < b);
        assert_ne!(a, EntityId::NULL);
    }

    #[test]
    fn test_entity_construction() {
        let e = Entity::new(Geometry::Line(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        )));
        assert_eq!(e.geometry.type_name(), "Line");
    }
}
