//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `process` 只负责流程编排，不持有任何状态。处理链路固定为：
//! 1. 读取源文件并获取栅格
//! 2. 透明合成
//! 3. 保存 PNG
//!
//! 任一阶段失败立即返回，后续阶段不会执行。
//!
//! ## 实现思路
//!
//! - 所有参数通过 `ProcessRequest` 显式传入，配置以只读引用传入。
//! - 记录 `load/composite/save/total` 阶段耗时，便于性能诊断。

use std::path::PathBuf;
use std::time::Instant;

use super::compositor::{composite_with_threshold, count_transparent};
use super::loader::{acquire, load_source};
use super::writer::{save, Dpi};
use super::{Color, Tolerance, TransparencyConfig, TransparencyError};

/// 单次处理请求。
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// 输入图片或 PDF 路径。
    pub input: PathBuf,
    /// 输出 PNG 路径。
    pub output: PathBuf,
    /// 要变为透明的颜色。
    pub target: Color,
    pub tolerance: Tolerance,
    /// PDF 页码（从 0 开始），缺省为第一页。
    pub page: Option<usize>,
    pub dpi: Dpi,
}

/// 处理结果摘要。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    pub width: u32,
    pub height: u32,
    pub transparent_pixels: usize,
    pub total_pixels: usize,
}

impl ProcessReport {
    /// 透明像素占比（0.0 ~ 1.0）。
    pub fn transparent_ratio(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        self.transparent_pixels as f64 / self.total_pixels as f64
    }
}

/// 处理主入口：获取 → 合成 → 保存。
///
/// # 示例
/// ```rust,no_run
/// use rmbg::transparency::{process, Color, Dpi, ProcessRequest, Tolerance, TransparencyConfig};
///
/// let request = ProcessRequest {
///     input: "scan.pdf".into(),
///     output: "scan.png".into(),
///     target: Color::WHITE,
///     tolerance: Tolerance::DEFAULT,
///     page: Some(0),
///     dpi: Dpi::DEFAULT,
/// };
/// let report = process(&request, &TransparencyConfig::default())?;
/// println!("{} 个像素变为透明", report.transparent_pixels);
/// # Ok::<(), rmbg::transparency::TransparencyError>(())
/// ```
pub fn process(
    request: &ProcessRequest,
    config: &TransparencyConfig,
) -> Result<ProcessReport, TransparencyError> {
    let total_start = Instant::now();

    let load_start = Instant::now();
    let source = load_source(&request.input, config)?;
    let raster = acquire(&source, request.page, config)?;
    drop(source);
    let load_elapsed = load_start.elapsed();

    let composite_start = Instant::now();
    let result = composite_with_threshold(
        &raster,
        request.target,
        request.tolerance,
        config.parallel_pixel_threshold,
    );
    drop(raster);
    let composite_elapsed = composite_start.elapsed();

    let save_start = Instant::now();
    save(&result, &request.output, request.dpi)?;
    let save_elapsed = save_start.elapsed();

    let report = ProcessReport {
        width: result.width(),
        height: result.height(),
        transparent_pixels: count_transparent(&result),
        total_pixels: result.pixel_count(),
    };

    log::info!(
        "✅ 透明化处理完成 - 目标色: {} 容差: {} 透明像素: {}/{} load={}ms composite={}ms save={}ms total={}ms",
        request.target,
        request.tolerance.get(),
        report.transparent_pixels,
        report.total_pixels,
        load_elapsed.as_millis(),
        composite_elapsed.as_millis(),
        save_elapsed.as_millis(),
        total_start.elapsed().as_millis()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use tempfile::TempDir;

    fn request(dir: &TempDir, input: &str, output: &str) -> ProcessRequest {
        ProcessRequest {
            input: dir.path().join(input),
            output: dir.path().join(output),
            target: Color::WHITE,
            tolerance: Tolerance::DEFAULT,
            page: None,
            dpi: Dpi::DEFAULT,
        }
    }

    fn write_half_white(dir: &TempDir, name: &str) {
        let img = ImageBuffer::from_fn(10, 10, |x, _| {
            if x < 5 { Rgb([250_u8, 250, 250]) } else { Rgb([0, 0, 255]) }
        });
        DynamicImage::ImageRgb8(img)
            .save_with_format(dir.path().join(name), ImageFormat::Png)
            .expect("write test png");
    }

    #[test]
    fn process_reports_transparent_pixels() {
        let dir = TempDir::new().expect("create temp dir");
        write_half_white(&dir, "in.png");

        let report = process(&request(&dir, "in.png", "out.png"), &TransparencyConfig::default())
            .expect("process should succeed");

        assert_eq!(report.total_pixels, 100);
        assert_eq!(report.transparent_pixels, 50);
        assert!((report.transparent_ratio() - 0.5).abs() < f64::EPSILON);
        assert!(dir.path().join("out.png").exists());
    }

    #[test]
    fn failed_acquire_never_creates_output() {
        let dir = TempDir::new().expect("create temp dir");

        let result = process(&request(&dir, "missing.png", "out.png"), &TransparencyConfig::default());

        assert!(matches!(result, Err(TransparencyError::Read(_))));
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn unsupported_output_is_reported_after_processing() {
        let dir = TempDir::new().expect("create temp dir");
        write_half_white(&dir, "in.png");

        let result = process(&request(&dir, "in.png", "out.jpg"), &TransparencyConfig::default());

        assert!(matches!(result, Err(TransparencyError::UnsupportedFormat(_))));
        assert!(!dir.path().join("out.jpg").exists());
    }
}
