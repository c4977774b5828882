//! # 静态图片解码模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → RGB(A) 栅格”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 按声明格式读取 header 尺寸
//! 2. 按像素上限快速拒绝
//! 3. 按声明格式完整解码
//! 4. 转换为 8 位 RGB(A)，并校验字节长度一致性

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{Raster, TransparencyConfig, TransparencyError};

/// 以声明格式解码静态图片。
pub(crate) fn decode_still_image(
    bytes: &[u8],
    format: ImageFormat,
    config: &TransparencyConfig,
) -> Result<Raster, TransparencyError> {
    if bytes.is_empty() {
        return Err(TransparencyError::Decode("图片内容为空".to_string()));
    }

    let (header_width, header_height) = inspect_dimensions(bytes, format)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| TransparencyError::Decode(format!("图片解码失败：{}", e)))?;

    let raster = Raster::from_dynamic(decoded)
        .ok_or_else(|| TransparencyError::Decode("解码后像素数据长度异常".to_string()))?;
    validate_pixel_limits(config, raster.width(), raster.height())?;

    log::info!(
        "✅ 图片解码成功 - 格式: {:?} 尺寸: {}x{} 通道: {:?}",
        format,
        raster.width(),
        raster.height(),
        raster.channels()
    );

    Ok(raster)
}

/// 仅通过图片头信息读取宽高。
///
/// 用于在完整解码前做像素限制检查。
fn inspect_dimensions(bytes: &[u8], format: ImageFormat) -> Result<(u32, u32), TransparencyError> {
    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format);

    reader
        .into_dimensions()
        .map_err(|e| TransparencyError::Decode(format!("无法读取图片尺寸：{}", e)))
}

/// 校验像素数量是否超过配置上限。
pub(crate) fn validate_pixel_limits(
    config: &TransparencyConfig,
    width: u32,
    height: u32,
) -> Result<(), TransparencyError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| TransparencyError::ResourceLimit("图片像素数溢出".to_string()))?;

    if pixels > config.max_decoded_pixels {
        return Err(TransparencyError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}
