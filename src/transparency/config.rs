//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `TransparencyConfig`，保证运行时行为可观测、可调整、可测试。
//! 匹配规则本身（目标色 + 容差）不属于配置，它们是每次调用的显式参数。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置。
//! - 页面渲染倍率 `render_scale` 与导出 DPI 是两个独立旋钮：
//!   前者决定像素尺寸，后者只写入 PNG 元数据。
//! - `validate` 在链路开始前拒绝无意义的取值。

use serde::{Deserialize, Serialize};

use super::{TransparencyError, PARALLEL_PIXEL_THRESHOLD};

/// PDF 渲染时的原生分辨率（点/英寸）。`render_scale = 1.0` 即按此分辨率出图。
pub const NATIVE_RENDER_DPI: f32 = 72.0;

/// 透明化处理配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransparencyConfig {
    /// 读取源文件时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 分页文档的渲染倍率，1.0 表示文档原生分辨率。
    pub render_scale: f32,
    /// 像素数达到该阈值时按行并行合成。
    pub parallel_pixel_threshold: usize,
}

impl Default for TransparencyConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            render_scale: 1.0,
            parallel_pixel_threshold: PARALLEL_PIXEL_THRESHOLD,
        }
    }
}

impl TransparencyConfig {
    /// 校验配置取值。
    pub fn validate(&self) -> Result<(), TransparencyError> {
        if self.max_file_size == 0 {
            return Err(TransparencyError::ResourceLimit(
                "max_file_size 必须大于 0".to_string(),
            ));
        }
        if self.max_decoded_pixels == 0 {
            return Err(TransparencyError::ResourceLimit(
                "max_decoded_pixels 必须大于 0".to_string(),
            ));
        }
        if !self.render_scale.is_finite() || self.render_scale <= 0.0 {
            return Err(TransparencyError::ResourceLimit(format!(
                "render_scale 必须为正数：{}",
                self.render_scale
            )));
        }
        Ok(())
    }

    /// 当前渲染倍率对应的有效渲染分辨率。
    pub fn render_dpi(&self) -> f32 {
        NATIVE_RENDER_DPI * self.render_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_renders_at_native_resolution() {
        let config = TransparencyConfig::default();

        config.validate().expect("default config should be valid");
        assert_eq!(config.render_dpi(), NATIVE_RENDER_DPI);
    }

    #[test]
    fn validate_rejects_non_positive_render_scale() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = TransparencyConfig {
                render_scale: scale,
                ..TransparencyConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(TransparencyError::ResourceLimit(_))
            ));
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: TransparencyConfig =
            serde_json::from_str(r#"{ "render_scale": 2.0 }"#).expect("parse partial config");

        assert_eq!(config.render_scale, 2.0);
        assert_eq!(config.max_file_size, TransparencyConfig::default().max_file_size);
    }
}
