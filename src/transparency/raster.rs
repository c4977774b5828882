//! # 栅格与颜色模型
//!
//! ## 设计思路
//!
//! `Raster` 是整条链路唯一的像素容器：行优先、每通道 8 位、通道数全图统一。
//! 字段私有，只能通过校验过的构造函数创建，从类型层面保证
//! “宽高 > 0、行长一致、通道数统一”三条不变式。
//!
//! `Color` 与 `Tolerance` 是纯值类型，核心从不解析字符串；
//! 颜色字面量的解析放在适配层（`crate::color`）。

use std::fmt;

use image::DynamicImage;

/// 像素通道布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    /// 每像素字节数。
    pub fn count(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// 已解码的二维像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Raster {
    /// 从 RGB 字节构建栅格；尺寸为 0 或长度不符时返回 `None`。
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        Self::new(width, height, Channels::Rgb, data)
    }

    /// 从 RGBA 字节构建栅格；尺寸为 0 或长度不符时返回 `None`。
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        Self::new(width, height, Channels::Rgba, data)
    }

    fn new(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(channels.count())?;
        if data.len() != expected {
            return None;
        }

        Some(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// 尺寸沿用已校验栅格时使用，跳过重复校验。
    pub(crate) fn rgba_from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            channels: Channels::Rgba,
            data,
        }
    }

    /// 用单一颜色填充的 RGB 栅格。
    pub fn filled(width: u32, height: u32, color: Color) -> Option<Self> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        let data = [color.r, color.g, color.b].repeat(pixels);
        Self::from_rgb8(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// 单行字节数。
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// 读取 `(x, y)` 处的像素字节（3 或 4 个）。
    ///
    /// 越界时返回 `None`。
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let stride = self.channels.count();
        let start = (y as usize * self.width as usize + x as usize) * stride;
        self.data.get(start..start + stride)
    }

    /// 取样某个坐标的 RGB 颜色（忽略 alpha）。
    pub fn sample_color(&self, x: u32, y: u32) -> Option<Color> {
        self.pixel(x, y).map(|p| Color::new(p[0], p[1], p[2]))
    }

    /// 读取 `(x, y)` 的 alpha；RGB 栅格视为完全不透明。
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|p| match self.channels {
            Channels::Rgb => u8::MAX,
            Channels::Rgba => p[3],
        })
    }

    /// 将任意解码结果转换为 8 位 RGB(A) 栅格。
    ///
    /// 无 alpha 的图片保持 3 通道，其余统一转换为 RGBA8；
    /// 16 位、灰度等格式在这里降为 8 位 RGB(A)。
    pub(crate) fn from_dynamic(image: DynamicImage) -> Option<Self> {
        if image.color().has_alpha() {
            let rgba = image.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self::from_rgba8(width, height, rgba.into_raw())
        } else {
            let rgb = image.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self::from_rgb8(width, height, rgb.into_raw())
        }
    }
}

/// 目标颜色（不含 alpha）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// 每通道容差，取值范围恰好是 `[0, 255]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tolerance(pub u8);

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance(10);
    pub const EXACT: Tolerance = Tolerance(0);
    pub const ANY: Tolerance = Tolerance(u8::MAX);

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for Tolerance {
    fn from(value: u8) -> Self {
        Self(value)
    }
}
