//! 容差模型
//!
//! 把用户配置的像素孔径换算为世界空间的捕捉半径：
//! `world_radius = aperture_pixels / view_scale × 模式系数`。
//!
//! 缩放连续变化，每次解析都重新计算，从不跨帧缓存。

use crate::snap::{SnapConfig, SnapMode};

/// 单帧容差模型
///
/// 在一次解析开始时由孔径和当前视图缩放构造，
/// 帧内对所有引擎提供每模式的世界半径。
#[derive(Debug, Clone, Copy)]
pub struct ToleranceModel {
    base_world_radius: f64,
    radius_factors: [f64; SnapMode::COUNT],
}

impl ToleranceModel {
    /// 从配置、孔径和视图缩放构造
    ///
    /// 孔径或缩放为非正/非有限值时返回 `None`，
    /// 调用方将该帧解析为"无捕捉"。
    pub fn new(config: &SnapConfig, aperture_pixels: f64, view_scale: f64) -> Option<Self> {
        if !aperture_pixels.is_finite() || aperture_pixels <= 0.0 {
            return None;
        }
        if !view_scale.is_finite() || view_scale <= 0.0 {
            return None;
        }

        let mut radius_factors = [1.0f64; SnapMode::COUNT];
        for mode in SnapMode::ALL {
            radius_factors[mode as usize] = config.radius_factor(mode);
        }

        Some(Self {
            base_world_radius: aperture_pixels / view_scale,
            radius_factors,
        })
    }

    /// 基础世界半径（系数为1的模式使用）
    pub fn base_radius(&self) -> f64 {
        self.base_world_radius
    }

    /// 指定模式的世界半径
    pub fn radius_for(&self, mode: SnapMode) -> f64 {
        self.base_world_radius * self.radius_factors[mode as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_scaling_with_zoom() {
        let config = SnapConfig::default();

        let at_1x = ToleranceModel::new(&config, 8.0, 1.0).unwrap();
        let at_2x = ToleranceModel::new(&config, 8.0, 2.0).unwrap();

        assert!((at_1x.base_radius() - 8.0).abs() < f64::EPSILON);
        // 缩放加倍，世界半径减半
        assert!((at_2x.base_radius() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mode_factors() {
        let config = SnapConfig::default();
        let tol = ToleranceModel::new(&config, 10.0, 1.0).unwrap();

        assert!((tol.radius_for(SnapMode::Endpoint) - 10.0).abs() < f64::EPSILON);
        assert!((tol.radius_for(SnapMode::Extension) - 20.0).abs() < f64::EPSILON);
        assert!((tol.radius_for(SnapMode::Intersection) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_inputs() {
        let config = SnapConfig::default();
        assert!(ToleranceModel::new(&config, 0.0, 1.0).is_none());
        assert!(ToleranceModel::new(&config, -5.0, 1.0).is_none());
        assert!(ToleranceModel::new(&config, f64::NAN, 1.0).is_none());
        assert!(ToleranceModel::new(&config, 8.0, 0.0).is_none());
        assert!(ToleranceModel::new(&config, 8.0, f64::INFINITY).is_none());
    }
}
