//! # rmbg — 按颜色透明化工具库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  适配层 (CLI)                             │
//! │                                                          │
//! │  cli ── color (字面量解析) ── settings (JSON 默认值)      │
//! │       │  (统一错误处理 AppError)                          │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↓ ProcessRequest
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↓            核心 (transparency)                    │
//! │                                                          │
//! │  ┌─ loader ────── 读取源文件 / 按声明种类分派              │
//! │  │   ├─ pipeline   静态图片解码 + 像素上限                │
//! │  │   └─ document   PDF 选页 + 渲染                        │
//! │  ├─ compositor ── 容差匹配 → alpha（rayon 按行并行）      │
//! │  └─ writer ────── PNG + pHYs DPI，临时文件原子替换        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，CLI 入口的返回类型 |
//! | [`transparency`] | 栅格获取、透明合成、PNG 持久化 |
//! | [`color`] | `R,G,B` / `#RRGGBB` 颜色字面量解析 |
//! | [`settings`] | JSON 设置文件读写 |
//! | [`cli`] | clap 参数定义与默认值合并 |

pub mod cli;
pub mod color;
pub mod error;
pub mod settings;
pub mod transparency;
