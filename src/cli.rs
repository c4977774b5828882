//! # 命令行适配层
//!
//! ## 设计思路
//!
//! 命令行层仅做参数接收、颜色字面量解析与默认值合并，不承载业务逻辑。
//! 所有实际处理交由 `transparency::process`，保持适配层薄、稳定、易测试。
//!
//! 取值优先级：命令行显式参数 > 设置文件 > 内置默认值。
//! `--save-settings` 在处理成功后把合并结果写回 JSON，下次可用 `--settings` 复用。

use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::Parser;

use crate::color::{parse_color, ColorArg};
use crate::error::AppError;
use crate::settings::{load_settings_from_path, save_settings_to_path, Settings};
use crate::transparency::{self, Color, Dpi, ProcessReport, ProcessRequest, Tolerance};

/// 允许的输出 DPI 范围。
pub const DPI_RANGE: RangeInclusive<u32> = 72..=1200;
const DEFAULT_DPI: u32 = 300;

/// Make a specific color transparent in an image or PDF page.
#[derive(Parser, Debug, Clone)]
#[command(name = "rmbg", version, about, long_about = None)]
pub struct Cli {
    /// Path to input image or PDF file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Path to output PNG file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Target color in format R,G,B or #RRGGBB (default: white)
    #[arg(short, long)]
    pub color: Option<ColorArg>,

    /// Color matching tolerance (0-255, default: 10)
    #[arg(short, long)]
    pub tolerance: Option<u8>,

    /// PDF page number (0-based, default: first page)
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Output DPI for the PNG file (72-1200, default: 300)
    #[arg(long)]
    pub dpi: Option<u32>,

    /// JSON settings file providing defaults
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub settings: Option<PathBuf>,

    /// Write the effective settings of this run to a JSON file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub save_settings: Option<PathBuf>,
}

impl Cli {
    /// 合并设置文件与命令行参数，得到处理请求。
    pub fn to_request(&self, settings: &Settings) -> Result<ProcessRequest, AppError> {
        let target = match (self.color, settings.color.as_deref()) {
            (Some(ColorArg(color)), _) => color,
            (None, Some(literal)) => parse_color(literal)?,
            (None, None) => Color::WHITE,
        };

        let tolerance = self
            .tolerance
            .or(settings.tolerance)
            .map(Tolerance)
            .unwrap_or_default();

        let dpi_value = self.dpi.or(settings.dpi).unwrap_or(DEFAULT_DPI);
        if !DPI_RANGE.contains(&dpi_value) {
            return Err(AppError::InvalidArgument(format!(
                "dpi 必须在 {}~{} 之间：{}",
                DPI_RANGE.start(),
                DPI_RANGE.end(),
                dpi_value
            )));
        }
        let dpi = Dpi::uniform(dpi_value)
            .ok_or_else(|| AppError::InvalidArgument(format!("dpi 无效：{}", dpi_value)))?;

        Ok(ProcessRequest {
            input: self.input.clone(),
            output: self.output.clone(),
            target,
            tolerance,
            page: self.page,
            dpi,
        })
    }
}

/// 执行一次命令。
pub fn run(cli: &Cli) -> Result<ProcessReport, AppError> {
    let settings = match &cli.settings {
        Some(path) => load_settings_from_path(path)?,
        None => Settings::default(),
    };

    let request = cli.to_request(&settings)?;
    log::debug!(
        "🎯 目标色: {} 容差: {} 页码: {:?} DPI: {}",
        request.target,
        request.tolerance.get(),
        request.page,
        request.dpi.x()
    );

    let report = transparency::process(&request, &settings.transparency)?;

    if let Some(path) = &cli.save_settings {
        save_settings_to_path(path, &effective_settings(&request, &settings))?;
        log::info!("💾 已保存本次设置: {}", path.display());
    }

    Ok(report)
}

/// 本次实际生效的参数，写回设置文件后可原样复用。
fn effective_settings(request: &ProcessRequest, settings: &Settings) -> Settings {
    Settings {
        color: Some(request.target.to_string()),
        tolerance: Some(request.tolerance.get()),
        dpi: Some(request.dpi.x()),
        transparency: settings.transparency.clone(),
    }
}
