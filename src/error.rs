//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义适配层统一的 `AppError` 枚举，CLI 入口只面对这一种错误。
//! 核心错误 `TransparencyError` 原样包裹，错误码与阶段信息不丢失。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `TransparencyError`、`ColorParseError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，便于以 JSON 输出给上层脚本。

use serde::Serialize;

use crate::color::ColorParseError;
use crate::transparency::TransparencyError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 透明化链路错误（获取 / 保存）
    #[error("{0}")]
    Transparency(#[from] TransparencyError),

    /// 颜色字面量无效
    #[error("{0}")]
    Color(#[from] ColorParseError),

    /// 命令行参数无效
    #[error("参数无效: {0}")]
    InvalidArgument(String),

    /// 设置文件读取或解析失败
    #[error("设置文件错误: {0}")]
    Settings(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transparency(err) => err.code(),
            Self::Color(_) => "invalid_color",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Settings(_) => "settings",
            Self::Io(_) => "io",
        }
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
