//! 设置文件模块
//!
//! # 设计思路
//!
//! 允许用 JSON 文件预置常用参数（目标色、容差、DPI、渲染倍率与资源上限）。
//! 设置文件只提供默认值，命令行显式参数始终优先。
//!
//! # 实现思路
//!
//! - 所有字段可缺省，缺省时回退到内置默认值。
//! - 用户显式指定的文件读取或解析失败时报错，而不是静默回退。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::transparency::TransparencyConfig;

/// 设置文件内容。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 目标色字面量（`R,G,B` 或 `#RRGGBB`）。
    pub color: Option<String>,
    pub tolerance: Option<u8>,
    /// 输出 DPI（水平与垂直相同）。
    pub dpi: Option<u32>,
    /// 核心处理配置。
    #[serde(flatten)]
    pub transparency: TransparencyConfig,
}

/// 从指定路径读取设置。
pub fn load_settings_from_path(path: &Path) -> Result<Settings, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Settings(format!("读取设置文件 '{}' 失败: {}", path.display(), e))
    })?;

    let settings = serde_json::from_str::<Settings>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;

    settings
        .transparency
        .validate()
        .map_err(|e| AppError::Settings(e.to_string()))?;

    log::debug!("⚙️ 已加载设置文件: {}", path.display());
    Ok(settings)
}

/// 将设置写入指定路径（格式化 JSON）。
pub fn save_settings_to_path(path: &Path, settings: &Settings) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;

    fs::write(path, content)?;
    Ok(())
}
