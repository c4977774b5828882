//! # 数据源模型
//!
//! ## 设计思路
//!
//! 将“外部输入”和“声明格式”绑定在一起：
//! - `SourceKind` 表示调用方声明的输入种类（静态图片 / 分页文档）
//! - `RasterSource` 表示已读入内存、尚未解码的字节
//!
//! 种类完全由声明格式（扩展名或显式参数）决定，不做内容嗅探。

use std::path::Path;

use image::ImageFormat;

/// 输入种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// 单帧静态图片，附带声明的编码格式。
    StillImage(ImageFormat),
    /// 分页文档（PDF），页码从 0 开始。
    Paginated,
}

impl SourceKind {
    /// 根据扩展名（不区分大小写，可带前导 `.`）推断种类。
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        if extension.eq_ignore_ascii_case("pdf") {
            return Some(Self::Paginated);
        }
        ImageFormat::from_extension(extension).map(Self::StillImage)
    }

    /// 根据路径扩展名推断种类；无扩展名时返回 `None`。
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn is_paginated(self) -> bool {
        matches!(self, Self::Paginated)
    }
}

/// 加载阶段输出：原始字节与声明种类。
#[derive(Debug, Clone)]
pub struct RasterSource {
    /// 原始文件字节。
    pub(crate) bytes: Vec<u8>,
    /// 声明的输入种类。
    pub(crate) kind: SourceKind,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

impl RasterSource {
    /// 以显式声明的种类包装内存字节。
    pub fn from_bytes(bytes: Vec<u8>, kind: SourceKind) -> Self {
        Self {
            bytes,
            kind,
            source_hint: "memory".to_string(),
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn source_hint(&self) -> &str {
        &self.source_hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_is_paginated_regardless_of_case() {
        assert_eq!(SourceKind::from_extension("pdf"), Some(SourceKind::Paginated));
        assert_eq!(SourceKind::from_extension(".PDF"), Some(SourceKind::Paginated));
        assert!(SourceKind::from_path(Path::new("scan.Pdf"))
            .expect("pdf kind")
            .is_paginated());
    }

    #[test]
    fn image_extensions_map_to_declared_format() {
        assert_eq!(
            SourceKind::from_extension("PNG"),
            Some(SourceKind::StillImage(ImageFormat::Png))
        );
        assert_eq!(
            SourceKind::from_path(Path::new("photo.jpeg")),
            Some(SourceKind::StillImage(ImageFormat::Jpeg))
        );
    }

    #[test]
    fn unknown_or_missing_extension_is_rejected() {
        assert_eq!(SourceKind::from_extension("docx"), None);
        assert_eq!(SourceKind::from_path(Path::new("README")), None);
    }
}
