//! # 栅格获取模块
//!
//! ## 设计思路
//!
//! 统一处理“读取源文件 → 按声明种类分派 → 得到独立持有的栅格”。
//! 在“尽可能早”的阶段执行输入校验，尽快失败，减少不必要的内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + 扩展名声明种类 + metadata 体积限制 + 读取。
//! - 静态图片：交给 `pipeline` 按声明格式解码。
//! - 分页文档：交给 `document` 选页渲染，默认第一页。
//! - 静态图片忽略页码参数（仅记录 debug 日志）。

use std::path::Path;

use super::document::{self, PagedDocument};
use super::pipeline::decode_still_image;
use super::source::{RasterSource, SourceKind};
use super::{Raster, TransparencyConfig, TransparencyError};

/// 从本地路径读取源文件，并按扩展名声明种类。
pub fn load_source(path: &Path, config: &TransparencyConfig) -> Result<RasterSource, TransparencyError> {
    log::info!("📁 开始读取输入文件 - 路径: {}", path.display());

    if !path.exists() {
        return Err(TransparencyError::Read(format!("文件不存在：{}", path.display())));
    }

    let kind = SourceKind::from_path(path).ok_or_else(|| {
        TransparencyError::Decode(format!("无法识别的输入格式：{}", path.display()))
    })?;

    let metadata = std::fs::metadata(path)
        .map_err(|e| TransparencyError::Read(format!("无法读取文件信息：{}", e)))?;

    if !metadata.is_file() {
        return Err(TransparencyError::Read(format!("不是普通文件：{}", path.display())));
    }

    if metadata.len() > config.max_file_size {
        return Err(TransparencyError::ResourceLimit(format!(
            "文件过大：{:.2} MB（限制：{:.2} MB）",
            metadata.len() as f64 / 1024.0 / 1024.0,
            config.max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| TransparencyError::Read(format!("无法读取输入文件：{}", e)))?;

    Ok(RasterSource {
        bytes,
        kind,
        source_hint: path.display().to_string(),
    })
}

/// 获取栅格：静态图片直接解码，分页文档选页后渲染。
pub fn acquire(
    source: &RasterSource,
    page_index: Option<usize>,
    config: &TransparencyConfig,
) -> Result<Raster, TransparencyError> {
    config.validate()?;

    if source.bytes.len() as u64 > config.max_file_size {
        return Err(TransparencyError::ResourceLimit(format!(
            "输入过大：{} 字节（限制：{} 字节）",
            source.bytes.len(),
            config.max_file_size
        )));
    }

    let raster = match source.kind {
        SourceKind::StillImage(format) => {
            if let Some(page) = page_index {
                log::debug!("静态图片忽略页码参数：{}", page);
            }
            decode_still_image(&source.bytes, format, config)?
        }
        SourceKind::Paginated => document::acquire_paginated(&source.bytes, page_index, config)?,
    };

    log::info!(
        "✅ 栅格获取完成 - 来源: {} 尺寸: {}x{}",
        source.source_hint,
        raster.width(),
        raster.height()
    );

    Ok(raster)
}

/// 从已打开的分页文档获取栅格。
///
/// 供自带文档后端的调用方使用，选页规则与 `acquire` 完全一致。
pub fn acquire_page<D>(
    document: &D,
    page_index: Option<usize>,
    config: &TransparencyConfig,
) -> Result<Raster, TransparencyError>
where
    D: PagedDocument + ?Sized,
{
    config.validate()?;
    let raster = document::render_selected_page(document, page_index, config.render_scale)?;
    super::pipeline::validate_pixel_limits(config, raster.width(), raster.height())?;
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let img = ImageBuffer::from_pixel(width, height, Rgb([10_u8, 20, 30]));
        let path = dir.path().join(name);
        DynamicImage::ImageRgb8(img)
            .save_with_format(&path, ImageFormat::Png)
            .expect("write test png");
        path
    }

    #[test]
    fn load_and_acquire_still_image() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_png(&dir, "in.png", 4, 3);
        let config = TransparencyConfig::default();

        let source = load_source(&path, &config).expect("load should succeed");
        let raster = acquire(&source, None, &config).expect("acquire should succeed");

        assert_eq!(source.kind(), SourceKind::StillImage(ImageFormat::Png));
        assert_eq!((raster.width(), raster.height()), (4, 3));
    }

    #[test]
    fn still_image_ignores_page_index() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_png(&dir, "in.png", 2, 2);
        let config = TransparencyConfig::default();
        let source = load_source(&path, &config).expect("load should succeed");

        let raster = acquire(&source, Some(7), &config).expect("page index is ignored");

        assert_eq!(raster.width(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("create temp dir");

        let result = load_source(&dir.path().join("absent.png"), &TransparencyConfig::default());

        assert!(matches!(result, Err(TransparencyError::Read(_))));
    }

    #[test]
    fn missing_file_with_unknown_extension_is_still_a_read_error() {
        let dir = TempDir::new().expect("create temp dir");

        let result = load_source(&dir.path().join("notes.txt"), &TransparencyConfig::default());

        assert!(matches!(result, Err(TransparencyError::Read(_))));
    }

    #[test]
    fn unknown_extension_is_a_decode_error() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").expect("write file");

        let result = load_source(&path, &TransparencyConfig::default());

        assert!(matches!(result, Err(TransparencyError::Decode(_))));
    }

    #[test]
    fn oversized_file_is_rejected_before_reading() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_png(&dir, "big.png", 64, 64);
        let config = TransparencyConfig {
            max_file_size: 8,
            ..TransparencyConfig::default()
        };

        let result = load_source(&path, &config);

        assert!(matches!(result, Err(TransparencyError::ResourceLimit(_))));
    }

    #[test]
    fn corrupt_bytes_with_image_extension_fail_to_decode() {
        let source = RasterSource::from_bytes(
            b"not an image".to_vec(),
            SourceKind::StillImage(ImageFormat::Png),
        );

        let result = acquire(&source, None, &TransparencyConfig::default());

        assert!(matches!(result, Err(TransparencyError::Decode(_))));
    }
}
