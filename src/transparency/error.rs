//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载“获取 → 合成 → 保存”链路中的所有失败来源。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//! 所有错误都是终止性的：核心内部从不重试。

/// 透明化处理统一错误类型。
///
/// 该类型会在适配层被上转为 `AppError`，最终由 CLI 打印。
#[derive(Debug, thiserror::Error)]
pub enum TransparencyError {
    /// 输入字节不是有效图片（或文档无法打开/渲染）。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 请求的页码超出文档页数。
    #[error("页码越界：请求第 {requested} 页（从 0 开始），文档共 {available} 页")]
    PageOutOfRange { requested: usize, available: usize },

    /// 输入或输出的声明格式不受支持。
    #[error("不支持的格式：{0}")]
    UnsupportedFormat(String),

    /// 编码或写入输出文件失败。
    #[error("写入错误：{0}")]
    Write(String),

    /// 读取源文件失败（不存在、无权限等）。
    #[error("文件错误：{0}")]
    Read(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl TransparencyError {
    /// 稳定错误码，供调用方按类型渲染提示。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::PageOutOfRange { .. } => "page_out_of_range",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::Write(_) => "write",
            Self::Read(_) => "read",
            Self::ResourceLimit(_) => "resource_limit",
        }
    }

    /// 出错所在阶段。
    ///
    /// 合成阶段没有错误分支，因此这里只会返回 `acquire` 或 `save`。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Decode(_)
            | Self::PageOutOfRange { .. }
            | Self::Read(_)
            | Self::ResourceLimit(_) => "acquire",
            Self::UnsupportedFormat(_) | Self::Write(_) => "save",
        }
    }
}
