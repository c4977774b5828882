//! # PNG 持久化模块
//!
//! ## 设计思路
//!
//! 输出契约只有一种：8 位 RGBA PNG，带 `pHYs` 物理分辨率元数据。
//! 其它扩展名直接拒绝，不做任何回退转换。
//!
//! ## 实现思路
//!
//! 1. 扩展名校验（不触碰文件系统）
//! 2. 在内存中完成 PNG 编码，DPI 换算为“像素/米”
//! 3. 写入目标目录下的临时文件并 `fsync`
//! 4. 重命名覆盖目标路径；任一步失败时临时文件随 drop 删除，
//!    目标路径上不会出现写了一半的 PNG

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::{Channels, Raster, TransparencyError};

const METERS_PER_INCH: f64 = 0.0254;

/// 输出 PNG 的水平/垂直 DPI。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dpi {
    x: u32,
    y: u32,
}

impl Dpi {
    pub const DEFAULT: Dpi = Dpi { x: 300, y: 300 };

    /// 任一方向为 0 时返回 `None`。
    pub fn new(x: u32, y: u32) -> Option<Self> {
        (x > 0 && y > 0).then_some(Self { x, y })
    }

    pub fn uniform(value: u32) -> Option<Self> {
        Self::new(value, value)
    }

    pub fn x(self) -> u32 {
        self.x
    }

    pub fn y(self) -> u32 {
        self.y
    }

    /// 换算为 PNG 原生密度单位（像素/米），四舍五入。
    pub fn pixels_per_meter(self) -> (u32, u32) {
        (dpi_to_ppm(self.x), dpi_to_ppm(self.y))
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// 将 RGBA 栅格保存为带 DPI 元数据的 PNG。
pub fn save(raster: &Raster, destination: &Path, dpi: Dpi) -> Result<(), TransparencyError> {
    ensure_png_destination(destination)?;

    let encoded = encode_png(raster, dpi)?;

    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| TransparencyError::Write(format!("无法创建临时文件：{}", e)))?;
    temp.write_all(&encoded)
        .map_err(|e| TransparencyError::Write(format!("写入临时文件失败：{}", e)))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| TransparencyError::Write(format!("刷新临时文件失败：{}", e)))?;
    temp.persist(destination).map_err(|e| {
        TransparencyError::Write(format!(
            "无法写入目标文件 {}：{}",
            destination.display(),
            e.error
        ))
    })?;

    log::info!(
        "💾 已保存 PNG - 路径: {} 尺寸: {}x{} DPI: {}x{} 大小: {}KB",
        destination.display(),
        raster.width(),
        raster.height(),
        dpi.x(),
        dpi.y(),
        encoded.len() / 1024
    );

    Ok(())
}

/// 目标扩展名必须是 `png`（不区分大小写）。
fn ensure_png_destination(destination: &Path) -> Result<(), TransparencyError> {
    let extension = destination
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    if extension.eq_ignore_ascii_case("png") {
        return Ok(());
    }

    let shown = if extension.is_empty() {
        "（无扩展名）".to_string()
    } else {
        extension.to_string()
    };
    Err(TransparencyError::UnsupportedFormat(format!(
        "{}，输出必须为 PNG",
        shown
    )))
}

/// 在内存中编码 PNG。
pub(crate) fn encode_png(raster: &Raster, dpi: Dpi) -> Result<Vec<u8>, TransparencyError> {
    if raster.channels() != Channels::Rgba {
        return Err(TransparencyError::Write(
            "保存前栅格必须为 RGBA（请先执行透明合成）".to_string(),
        ));
    }

    let (xppu, yppu) = dpi.pixels_per_meter();
    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, raster.width(), raster.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu,
            yppu,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder
            .write_header()
            .map_err(|e| TransparencyError::Write(format!("PNG 头写入失败：{}", e)))?;
        writer
            .write_image_data(raster.as_bytes())
            .map_err(|e| TransparencyError::Write(format!("PNG 编码失败：{}", e)))?;
        writer
            .finish()
            .map_err(|e| TransparencyError::Write(format!("PNG 收尾失败：{}", e)))?;
    }

    Ok(buffer)
}
