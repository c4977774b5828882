//! 颜色字面量解析模块
//!
//! # 设计思路
//!
//! 核心只接受已解析的 `Color`，字符串解析属于适配层。
//! 支持两种写法：
//! - 十进制三元组 `R,G,B`（每段可带空白，范围 0~255）
//! - 十六进制 `#RRGGBB`（大小写均可）

use std::str::FromStr;

use crate::transparency::Color;

/// 颜色字面量解析错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("十六进制颜色必须为 #RRGGBB 格式")]
    HexLength,

    #[error("颜色必须为 R,G,B 或 #RRGGBB 格式：{0:?}")]
    Format(String),
}

/// 解析 `R,G,B` 或 `#RRGGBB`。
pub fn parse_color(literal: &str) -> Result<Color, ColorParseError> {
    let literal = literal.trim();

    if let Some(hex) = literal.strip_prefix('#') {
        return parse_hex(hex.trim_start_matches('#'), literal);
    }

    let parts: Vec<&str> = literal.split(',').collect();
    if parts.len() != 3 {
        return Err(ColorParseError::Format(literal.to_string()));
    }

    let mut channels = [0_u8; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        *channel = part
            .trim()
            .parse::<u8>()
            .map_err(|_| ColorParseError::Format(literal.to_string()))?;
    }

    Ok(Color::new(channels[0], channels[1], channels[2]))
}

fn parse_hex(hex: &str, literal: &str) -> Result<Color, ColorParseError> {
    if hex.len() != 6 {
        return Err(ColorParseError::HexLength);
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorParseError::Format(literal.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::Format(literal.to_string()))
    };

    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// 供 clap `value_parser` 使用的包装。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorArg(pub Color);

impl FromStr for ColorArg {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).map(ColorArg)
    }
}
