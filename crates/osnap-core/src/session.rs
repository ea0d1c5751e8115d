//! 捕捉会话状态
//!
//! 每个绘图会话拥有一份 `SnapSessionState`，通过引用传入
//! 解析入口；没有进程级单例，多个会话互不串扰。
//!
//! 状态只通过定义好的转换变化：
//! - 设置项（启用模式、孔径）由用户设置动作修改，下一帧生效
//! - 快照和循环索引只由解析器在每帧的快照/循环步骤修改

use crate::snap::{SnapCandidate, SnapConfig, SnapMode, SnapModeSet};

/// 捕捉会话状态
#[derive(Debug, Clone)]
pub struct SnapSessionState {
    /// 启用的捕捉模式
    enabled_modes: SnapModeSet,
    /// 一次性临时覆盖模式（按修饰键触发），参与一次解析后清除
    temporary_override: Option<SnapMode>,
    /// 捕捉孔径（屏幕像素）
    aperture_pixels: f64,
    /// 最近一次解析的结果快照
    ///
    /// 悬停标记和点击提交消费同一份快照，不允许各自
    /// 重新解析——那是"看到的"与"画下的"不一致的最大来源。
    last_snapshot: Option<SnapCandidate>,
    /// 候选循环索引（Tab循环）
    cycle_index: usize,
    /// 最近一次解析的完整排序候选列表（循环用，不重新收集）
    last_candidates: Vec<SnapCandidate>,
}

impl SnapSessionState {
    /// 创建新会话，孔径取配置默认值
    pub fn new(config: &SnapConfig) -> Self {
        Self {
            enabled_modes: SnapModeSet::default(),
            temporary_override: None,
            aperture_pixels: config.aperture_pixels,
            last_snapshot: None,
            cycle_index: 0,
            last_candidates: Vec::new(),
        }
    }

    // ========== 用户设置转换 ==========

    /// 替换启用的模式集合（下一帧生效）
    pub fn set_enabled_modes(&mut self, modes: SnapModeSet) {
        self.enabled_modes = modes;
    }

    pub fn enabled_modes(&self) -> SnapModeSet {
        self.enabled_modes
    }

    /// 切换单个模式
    pub fn toggle_mode(&mut self, mode: SnapMode) {
        self.enabled_modes.toggle(mode);
    }

    pub fn is_mode_enabled(&self, mode: SnapMode) -> bool {
        self.enabled_modes.is_enabled(mode)
    }

    /// 设置捕捉孔径（像素，下一帧生效）
    pub fn set_aperture_pixels(&mut self, px: f64) {
        self.aperture_pixels = px;
    }

    pub fn aperture_pixels(&self) -> f64 {
        self.aperture_pixels
    }

    /// 设置一次性临时覆盖模式
    ///
    /// 像启用模式一样参与下一次解析，解析完成后自动清除；
    /// 不会进入 `enabled_modes`。
    pub fn set_temporary_override(&mut self, mode: SnapMode) {
        self.temporary_override = Some(mode);
    }

    /// 显式取消临时覆盖
    pub fn cancel_temporary_override(&mut self) {
        self.temporary_override = None;
    }

    pub fn temporary_override(&self) -> Option<SnapMode> {
        self.temporary_override
    }

    /// 取出并清除临时覆盖（解析器在收集阶段调用）
    pub(crate) fn take_temporary_override(&mut self) -> Option<SnapMode> {
        self.temporary_override.take()
    }

    // ========== 解析器快照转换 ==========

    /// 写入本帧的排序候选列表和获胜快照
    pub(crate) fn store_tick(&mut self, candidates: Vec<SnapCandidate>) {
        self.last_snapshot = candidates.first().cloned();
        self.last_candidates = candidates;
        self.cycle_index = 0;
    }

    /// 循环到下一个候选，返回新的快照
    ///
    /// 只在本帧已排序的列表内按实际长度取模推进，
    /// 不重新收集、不重新排序。
    pub(crate) fn cycle(&mut self) -> Option<SnapCandidate> {
        if self.last_candidates.is_empty() {
            return None;
        }
        self.cycle_index = (self.cycle_index + 1) % self.last_candidates.len();
        let snapshot = self.last_candidates[self.cycle_index].clone();
        self.last_snapshot = Some(snapshot.clone());
        Some(snapshot)
    }

    /// 最近一次解析的快照
    ///
    /// 渲染方据此绘制标记，命令方在点击时据此提交点。
    pub fn last_snapshot(&self) -> Option<&SnapCandidate> {
        self.last_snapshot.as_ref()
    }

    /// 当前循环索引
    pub fn cycle_index(&self) -> usize {
        self.cycle_index
    }

    /// 本帧候选总数
    pub fn candidate_count(&self) -> usize {
        self.last_candidates.len()
    }
}

impl Default for SnapSessionState {
    fn default() -> Self {
        Self::new(&SnapConfig::default())
    }
}
