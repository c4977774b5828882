//! # 透明化模块（transparency）
//!
//! ## 设计思路
//!
//! 该模块将“栅格获取 → 透明合成 → PNG 持久化”按职责拆分为多个子模块，
//! 三个阶段都是纯函数，阶段之间转移栅格所有权，不存在共享可变状态。
//!
//! - `source`：输入种类与已加载字节
//! - `loader`：读取源文件、按声明种类分派
//! - `pipeline`：静态图片解码与像素上限校验
//! - `document`：分页文档选页与渲染（MuPDF 后端位于默认开启的 `pdf` feature 下）
//! - `compositor`：按容差把目标色变为透明
//! - `writer`：带 DPI 元数据的 PNG 原子写入
//! - `handler`：编排整条链路并记录阶段耗时
//! - `config/error/raster`：配置、错误、栅格与颜色模型
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! cli.rs（参数适配 + 颜色字面量解析）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（读取源文件 + 体积校验）
//!    │    ├─ pipeline.rs（静态图片解码 + 像素限制）
//!    │    └─ document.rs（选页 + 页面渲染）
//!    ├─ compositor.rs（逐像素容差匹配，按行并行）
//!    └─ writer.rs（PNG 编码 + pHYs + 临时文件重命名）
//!    ↓
//! 返回 AppError 给 CLI
//! ```
//!
//! ## 分层职责建议
//!
//! - 匹配规则变更只改 `compositor.rs`
//! - 新输入格式优先改 `source.rs` 与 `loader.rs`
//! - 新文档后端实现 `PagedDocument` 即可，无需改选页逻辑
//! - 输出格式/元数据变更只改 `writer.rs`

mod compositor;
mod config;
mod document;
mod error;
mod handler;
mod loader;
mod pipeline;
mod raster;
mod source;
mod writer;

pub use compositor::{
    composite, composite_with_threshold, count_transparent, matches_color,
    PARALLEL_PIXEL_THRESHOLD,
};
pub use config::{TransparencyConfig, NATIVE_RENDER_DPI};
#[cfg(feature = "pdf")]
pub use document::MupdfDocument;
pub use document::{render_selected_page, PagedDocument};
pub use error::TransparencyError;
pub use handler::{process, ProcessReport, ProcessRequest};
pub use loader::{acquire, acquire_page, load_source};
pub use raster::{Channels, Color, Raster, Tolerance};
pub use source::{RasterSource, SourceKind};
pub use writer::{save, Dpi};
