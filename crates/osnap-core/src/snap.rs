//! 捕捉类型与配置
//!
//! 参考 LibreCAD/AutoCAD 的对象捕捉设计。
//!
//! 支持的捕捉类型：
//! - 端点 (Endpoint)
//! - 中点 (Midpoint)
//! - 交点 (Intersection)
//! - 圆心 (Center)
//! - 象限点 (Quadrant)
//! - 切点 (Tangent)
//! - 垂足 (Perpendicular)
//! - 平行 (Parallel)
//! - 最近点 (Nearest)
//! - 节点 (Node)
//! - 延伸 (Extension)
//! - 插入点 (Insertion)
//! - 网格点 (Grid)
//!
//! 优先级表、半径系数和延伸距离阶梯都是配置项而不是
//! 硬编码常量；但"存在唯一一张确定性优先级表"是结构性
//! 约束：每个模式有且只有一个优先级，启动时设定，
//! 解析过程中不按调用覆盖。

use crate::entity::EntityId;
use crate::math::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 捕捉类型
///
/// 封闭枚举；声明顺序同时是排序决胜的最后一个键。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SnapMode {
    /// 端点捕捉
    Endpoint,
    /// 中点捕捉
    Midpoint,
    /// 交点捕捉
    Intersection,
    /// 圆心捕捉
    Center,
    /// 象限点（圆/弧的0°, 90°, 180°, 270°位置）
    Quadrant,
    /// 切点捕捉
    Tangent,
    /// 垂足捕捉
    Perpendicular,
    /// 平行捕捉
    Parallel,
    /// 最近点捕捉
    Nearest,
    /// 节点捕捉（点实体）
    Node,
    /// 延伸捕捉（端点外的虚拟延长线）
    Extension,
    /// 插入点捕捉（文本/块/标注的基准点）
    Insertion,
    /// 网格点捕捉
    Grid,
}

impl SnapMode {
    /// 模式总数
    pub const COUNT: usize = 13;

    /// 全部模式（声明顺序）
    pub const ALL: [SnapMode; Self::COUNT] = [
        SnapMode::Endpoint,
        SnapMode::Midpoint,
        SnapMode::Intersection,
        SnapMode::Center,
        SnapMode::Quadrant,
        SnapMode::Tangent,
        SnapMode::Perpendicular,
        SnapMode::Parallel,
        SnapMode::Nearest,
        SnapMode::Node,
        SnapMode::Extension,
        SnapMode::Insertion,
        SnapMode::Grid,
    ];

    /// 获取捕捉类型的名称
    pub fn name(&self) -> &'static str {
        match self {
            SnapMode::Endpoint => "端点",
            SnapMode::Midpoint => "中点",
            SnapMode::Intersection => "交点",
            SnapMode::Center => "圆心",
            SnapMode::Quadrant => "象限点",
            SnapMode::Tangent => "切点",
            SnapMode::Perpendicular => "垂足",
            SnapMode::Parallel => "平行",
            SnapMode::Nearest => "最近点",
            SnapMode::Node => "节点",
            SnapMode::Extension => "延伸",
            SnapMode::Insertion => "插入点",
            SnapMode::Grid => "网格点",
        }
    }

    /// 获取捕捉类型的快捷键
    pub fn shortcut(&self) -> &'static str {
        match self {
            SnapMode::Endpoint => "END",
            SnapMode::Midpoint => "MID",
            SnapMode::Intersection => "INT",
            SnapMode::Center => "CEN",
            SnapMode::Quadrant => "QUA",
            SnapMode::Tangent => "TAN",
            SnapMode::Perpendicular => "PER",
            SnapMode::Parallel => "PAR",
            SnapMode::Nearest => "NEA",
            SnapMode::Node => "NOD",
            SnapMode::Extension => "EXT",
            SnapMode::Insertion => "INS",
            SnapMode::Grid => "GRI",
        }
    }

    #[inline]
    fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

/// 捕捉模式集合（位域，用于快速启用/禁用捕捉类型）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapModeSet {
    bits: u16,
}

impl SnapModeSet {
    pub const NONE: SnapModeSet = SnapModeSet { bits: 0 };
    pub const ALL: SnapModeSet = SnapModeSet { bits: (1 << SnapMode::COUNT as u16) - 1 };

    pub fn new(bits: u16) -> Self {
        Self {
            bits: bits & Self::ALL.bits,
        }
    }

    /// 从模式列表构建
    pub fn from_modes(modes: impl IntoIterator<Item = SnapMode>) -> Self {
        let mut set = Self::NONE;
        for mode in modes {
            set.set(mode, true);
        }
        set
    }

    pub fn is_enabled(&self, mode: SnapMode) -> bool {
        self.bits & mode.bit() != 0
    }

    pub fn set(&mut self, mode: SnapMode, enabled: bool) {
        if enabled {
            self.bits |= mode.bit();
        } else {
            self.bits &= !mode.bit();
        }
    }

    pub fn toggle(&mut self, mode: SnapMode) {
        self.bits ^= mode.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// 按声明顺序迭代启用的模式
    pub fn iter(&self) -> impl Iterator<Item = SnapMode> + '_ {
        SnapMode::ALL.into_iter().filter(|m| self.is_enabled(*m))
    }
}

impl Default for SnapModeSet {
    fn default() -> Self {
        // 默认启用常用的捕捉类型
        Self::from_modes([
            SnapMode::Endpoint,
            SnapMode::Midpoint,
            SnapMode::Center,
            SnapMode::Intersection,
        ])
    }
}

/// 捕捉候选点
///
/// 每个捕捉引擎对自己的模式产出零到多个候选；
/// 候选逐帧重新生成，从不持久化。
#[derive(Debug, Clone, PartialEq)]
pub struct SnapCandidate {
    /// 捕捉到的世界坐标
    pub point: Point2,
    /// 捕捉类型
    pub mode: SnapMode,
    /// 优先级（越小越优先）
    pub priority: u8,
    /// 到光标的世界距离（用于排序）
    pub distance_to_cursor: f64,
    /// 来源实体ID
    ///
    /// 交点候选涉及两个实体时记录较小的ID；
    /// 网格点等合成候选使用 `EntityId::NULL`。
    pub source_entity_id: EntityId,
    /// 显示标签（标记/提示用）
    pub label: String,
}

impl SnapCandidate {
    pub fn new(
        point: Point2,
        mode: SnapMode,
        priority: u8,
        distance_to_cursor: f64,
        source_entity_id: EntityId,
    ) -> Self {
        Self {
            point,
            mode,
            priority,
            distance_to_cursor,
            source_entity_id,
            label: mode.name().to_string(),
        }
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapConfigError {
    #[error("Invalid aperture: {0} (must be finite and positive)")]
    InvalidAperture(f64),

    #[error("Invalid grid spacing: {0} (must be finite and positive)")]
    InvalidGridSpacing(f64),

    #[error("Invalid spatial cell size: {0} (must be finite and positive)")]
    InvalidCellSize(f64),

    #[error("Extension ladder is empty")]
    EmptyExtensionLadder,

    #[error("Invalid extension distance: {0} (must be finite and positive)")]
    InvalidExtensionDistance(f64),

    #[error("max_candidates must be at least 1")]
    InvalidMaxCandidates,
}

/// 捕捉配置
///
/// 产品调优常量的唯一来源：优先级表、半径系数、
/// 延伸距离阶梯、网格间距等。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapConfig {
    /// 捕捉孔径（屏幕像素）
    pub aperture_pixels: f64,
    /// 网格间距（世界单位）
    pub grid_spacing: f64,
    /// 空间索引单元大小（世界单位）
    pub cell_size: f64,
    /// 每个引擎单帧最多返回的候选数
    pub max_candidates: usize,
    /// 延伸捕捉的探测距离阶梯（端点外的世界距离）
    pub extension_ladder: Vec<f64>,
    /// 是否显示捕捉标记
    pub show_markers: bool,
    /// 是否显示捕捉提示
    pub show_tooltips: bool,
    /// 每模式优先级（越小越优先），按 `SnapMode` 声明顺序索引
    priorities: [u8; SnapMode::COUNT],
    /// 每模式世界半径系数，按 `SnapMode` 声明顺序索引
    radius_factors: [f64; SnapMode::COUNT],
}

impl SnapConfig {
    /// 模式的优先级
    pub fn priority(&self, mode: SnapMode) -> u8 {
        self.priorities[mode as usize]
    }

    /// 覆盖模式的优先级（启动/设置期调用，解析期间不变）
    pub fn set_priority(&mut self, mode: SnapMode, priority: u8) {
        self.priorities[mode as usize] = priority;
    }

    /// 模式的世界半径系数
    ///
    /// 延伸默认用2倍基础半径向更远处搜索；交点用1.5倍
    /// 过滤已求出的交点。
    pub fn radius_factor(&self, mode: SnapMode) -> f64 {
        self.radius_factors[mode as usize]
    }

    pub fn set_radius_factor(&mut self, mode: SnapMode, factor: f64) {
        self.radius_factors[mode as usize] = factor;
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), SnapConfigError> {
        if !self.aperture_pixels.is_finite() || self.aperture_pixels <= 0.0 {
            return Err(SnapConfigError::InvalidAperture(self.aperture_pixels));
        }
        if !self.grid_spacing.is_finite() || self.grid_spacing <= 0.0 {
            return Err(SnapConfigError::InvalidGridSpacing(self.grid_spacing));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SnapConfigError::InvalidCellSize(self.cell_size));
        }
        if self.extension_ladder.is_empty() {
            return Err(SnapConfigError::EmptyExtensionLadder);
        }
        for &d in &self.extension_ladder {
            if !d.is_finite() || d <= 0.0 {
                return Err(SnapConfigError::InvalidExtensionDistance(d));
            }
        }
        if self.max_candidates == 0 {
            return Err(SnapConfigError::InvalidMaxCandidates);
        }
        Ok(())
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        let mut priorities = [0u8; SnapMode::COUNT];
        for mode in SnapMode::ALL {
            priorities[mode as usize] = match mode {
                SnapMode::Endpoint | SnapMode::Intersection => 0,
                SnapMode::Midpoint
                | SnapMode::Center
                | SnapMode::Node
                | SnapMode::Insertion => 1,
                SnapMode::Quadrant => 2,
                SnapMode::Tangent | SnapMode::Perpendicular | SnapMode::Parallel => 3,
                SnapMode::Extension => 4,
                SnapMode::Nearest => 5,
                SnapMode::Grid => 6,
            };
        }

        let mut radius_factors = [1.0f64; SnapMode::COUNT];
        radius_factors[SnapMode::Extension as usize] = 2.0;
        radius_factors[SnapMode::Intersection as usize] = 1.5;

        Self {
            aperture_pixels: 10.0, // 10像素
            grid_spacing: 10.0,
            cell_size: crate::spatial::DEFAULT_CELL_SIZE,
            max_candidates: 16,
            extension_ladder: vec![25.0, 50.0, 100.0, 200.0, 300.0],
            show_markers: true,
            show_tooltips: true,
            priorities,
            radius_factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_set() {
        let mut set = SnapModeSet::default();
        assert!(set.is_enabled(SnapMode::Endpoint));
        assert!(set.is_enabled(SnapMode::Midpoint));
        assert!(!set.is_enabled(SnapMode::Nearest));

        set.set(SnapMode::Nearest, true);
        assert!(set.is_enabled(SnapMode::Nearest));

        set.toggle(SnapMode::Endpoint);
        assert!(!set.is_enabled(SnapMode::Endpoint));
        set.toggle(SnapMode::Endpoint);
        assert!(set.is_enabled(SnapMode::Endpoint));
    }

    #[test]
    fn test_mode_set_iter_order() {
        let set = SnapModeSet::from_modes([SnapMode::Grid, SnapMode::Endpoint]);
        let modes: Vec<_> = set.iter().collect();
        assert_eq!(modes, vec![SnapMode::Endpoint, SnapMode::Grid]);
    }

    #[test]
    fn test_every_mode_has_priority_and_factor() {
        let config = SnapConfig::default();
        for mode in SnapMode::ALL {
            // 访问本身即索引有效性检查
            let _ = config.priority(mode);
            assert!(config.radius_factor(mode) > 0.0);
        }
        assert_eq!(config.priority(SnapMode::Endpoint), 0);
        assert_eq!(config.priority(SnapMode::Intersection), 0);
        assert!((config.radius_factor(SnapMode::Extension) - 2.0).abs() < f64::EPSILON);
        assert!((config.radius_factor(SnapMode::Intersection) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_validation() {
        let mut config = SnapConfig::default();
        assert!(config.validate().is_ok());

        config.aperture_pixels = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(SnapConfigError::InvalidAperture(_))
        ));

        config.aperture_pixels = 10.0;
        config.extension_ladder.clear();
        assert_eq!(
            config.validate(),
            Err(SnapConfigError::EmptyExtensionLadder)
        );
    }

    #[test]
    fn test_candidate_label_from_mode() {
        let c = SnapCandidate::new(
            Point2::new(1.0, 2.0),
            SnapMode::Midpoint,
            1,
            0.5,
            EntityId::NULL,
        );
        assert_eq!(c.label, SnapMode::Midpoint.name());
    }
}
