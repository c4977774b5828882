//! # rmbg — 应用入口
//!
//! 本文件仅负责日志初始化、参数解析与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::process::ExitCode;

use clap::Parser;
use rmbg::cli::{self, Cli};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    match cli::run(&args) {
        Ok(report) => {
            println!(
                "已处理 {} -> {}（{}x{}，透明像素 {:.1}%）",
                args.input.display(),
                args.output.display(),
                report.width,
                report.height,
                report.transparent_ratio() * 100.0
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("处理失败 [{}]: {err}", err.code());
            eprintln!("错误: {err}");
            ExitCode::FAILURE
        }
    }
}
