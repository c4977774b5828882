//! # 透明合成模块
//!
//! ## 设计思路
//!
//! 对每个像素独立判定是否“命中”目标色：三个通道各自的绝对差都不超过容差
//! （颜色空间中的轴对齐立方体，上界包含）。命中像素 alpha 置 0，其余置 255。
//! RGB 原样透传，输入已有的 alpha 一律丢弃。
//!
//! ## 实现思路
//!
//! - 输出是新分配的 RGBA 栅格，输入只读借用，同一份解码结果可反复合成。
//! - 像素数达到阈值时按行并行（rayon），各行输出切片互不重叠，无需同步。
//! - 并行与串行结果逐字节一致。

use rayon::prelude::*;

use super::{Channels, Color, Raster, Tolerance};

/// 默认并行阈值（像素数）。
pub const PARALLEL_PIXEL_THRESHOLD: usize = 32 * 1024;

const OPAQUE: u8 = u8::MAX;
const TRANSPARENT: u8 = 0;

/// 单个像素的 RGB 是否落在目标色的容差立方体内。
#[inline]
pub fn matches_color(rgb: [u8; 3], target: Color, tolerance: Tolerance) -> bool {
    let t = tolerance.get();
    rgb[0].abs_diff(target.r) <= t
        && rgb[1].abs_diff(target.g) <= t
        && rgb[2].abs_diff(target.b) <= t
}

/// 将目标色（容差内）变为透明，返回新的 RGBA 栅格。
pub fn composite(raster: &Raster, target: Color, tolerance: Tolerance) -> Raster {
    composite_with_threshold(raster, target, tolerance, PARALLEL_PIXEL_THRESHOLD)
}

/// 同 `composite`，可指定并行阈值。
pub fn composite_with_threshold(
    raster: &Raster,
    target: Color,
    tolerance: Tolerance,
    parallel_pixel_threshold: usize,
) -> Raster {
    let width = raster.width() as usize;
    let src_stride = raster.channels().count();
    let src_row_len = raster.row_len();
    let dst_row_len = width * Channels::Rgba.count();

    let mut out = vec![0_u8; dst_row_len * raster.height() as usize];
    let src = raster.as_bytes();

    let mask_row = |(dst_row, src_row): (&mut [u8], &[u8])| {
        for (dst, pixel) in dst_row
            .chunks_exact_mut(4)
            .zip(src_row.chunks_exact(src_stride))
        {
            let rgb = [pixel[0], pixel[1], pixel[2]];
            dst[..3].copy_from_slice(&rgb);
            dst[3] = if matches_color(rgb, target, tolerance) {
                TRANSPARENT
            } else {
                OPAQUE
            };
        }
    };

    if raster.pixel_count() >= parallel_pixel_threshold {
        log::debug!(
            "🧵 并行合成 {}x{}（阈值 {} 像素）",
            raster.width(),
            raster.height(),
            parallel_pixel_threshold
        );
        out.par_chunks_exact_mut(dst_row_len)
            .zip(src.par_chunks_exact(src_row_len))
            .for_each(mask_row);
    } else {
        out.chunks_exact_mut(dst_row_len)
            .zip(src.chunks_exact(src_row_len))
            .for_each(mask_row);
    }

    Raster::rgba_from_parts(raster.width(), raster.height(), out)
}

/// 统计栅格中完全透明的像素数；RGB 栅格恒为 0。
pub fn count_transparent(raster: &Raster) -> usize {
    match raster.channels() {
        Channels::Rgb => 0,
        Channels::Rgba => raster
            .as_bytes()
            .chunks_exact(4)
            .filter(|pixel| pixel[3] == TRANSPARENT)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::WHITE;
    const RED: Color = Color::new(255, 0, 0);

    /// 100x100 白底，中心 50x50 红色方块。
    fn red_square_on_white() -> Raster {
        let mut data = Vec::with_capacity(100 * 100 * 3);
        for y in 0..100 {
            for x in 0..100 {
                let inside = (25..75).contains(&x) && (25..75).contains(&y);
                let c = if inside { RED } else { WHITE };
                data.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        Raster::from_rgb8(100, 100, data).expect("valid raster")
    }

    fn in_square(x: u32, y: u32) -> bool {
        (25..75).contains(&x) && (25..75).contains(&y)
    }

    #[test]
    fn inclusive_bound_matches_difference_equal_to_tolerance() {
        assert!(matches_color([0, 0, 0], Color::new(10, 10, 10), Tolerance(10)));
        assert!(!matches_color([11, 0, 0], Color::BLACK, Tolerance(10)));
    }

    #[test]
    fn all_three_channels_must_match() {
        assert!(!matches_color([0, 0, 200], Color::BLACK, Tolerance(100)));
        assert!(matches_color([100, 100, 100], Color::BLACK, Tolerance(100)));
    }

    #[test]
    fn white_target_clears_background_and_keeps_square() {
        let out = composite(&red_square_on_white(), WHITE, Tolerance(10));

        assert_eq!(out.channels(), Channels::Rgba);
        for y in 0..100 {
            for x in 0..100 {
                let expected = if in_square(x, y) { 255 } else { 0 };
                assert_eq!(out.alpha_at(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
        assert_eq!(count_transparent(&out), 100 * 100 - 50 * 50);
    }

    #[test]
    fn red_target_clears_only_square() {
        let out = composite(&red_square_on_white(), RED, Tolerance(10));

        for y in 0..100 {
            for x in 0..100 {
                let expected = if in_square(x, y) { 0 } else { 255 };
                assert_eq!(out.alpha_at(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn existing_alpha_is_discarded() {
        let input = Raster::from_rgba8(2, 1, vec![9, 9, 9, 0, 200, 0, 0, 17]).expect("valid raster");

        let out = composite(&input, Color::new(9, 9, 9), Tolerance::EXACT);

        assert_eq!(out.as_bytes(), &[9, 9, 9, 0, 200, 0, 0, 255]);
    }

    #[test]
    fn input_is_left_untouched() {
        let input = red_square_on_white();
        let before = input.clone();

        let _ = composite(&input, WHITE, Tolerance::ANY);

        assert_eq!(input, before);
    }

    #[test]
    fn parallel_and_sequential_paths_agree() {
        let input = red_square_on_white();

        let sequential = composite_with_threshold(&input, RED, Tolerance(3), usize::MAX);
        let parallel = composite_with_threshold(&input, RED, Tolerance(3), 0);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn count_transparent_is_zero_for_rgb() {
        assert_eq!(count_transparent(&red_square_on_white()), 0);
    }
}
