//! # 分页文档渲染模块
//!
//! ## 设计思路
//!
//! 分页文档（PDF）的“选页 + 栅格化”与具体渲染库解耦：
//! - `PagedDocument` 只描述两件事：页数、按倍率渲染某一页为 RGB 栅格
//! - 选页与越界校验只实现一次（`render_selected_page`），任何后端共用
//! - MuPDF 后端在 `pdf` feature（默认开启）下编译，关闭后分页输入直接报解码错误
//!
//! ## 实现思路
//!
//! 文档句柄是局部值，在渲染函数返回前随作用域释放，成功与失败路径一致。
//! 渲染倍率来自配置，与导出 DPI 无关。

use super::{Raster, TransparencyConfig, TransparencyError};

/// 分页文档后端。
pub trait PagedDocument {
    /// 打开时即确定的页数。
    fn page_count(&self) -> usize;

    /// 以给定倍率渲染第 `index` 页（从 0 开始）为 3 通道 RGB 栅格。
    ///
    /// 调用方保证 `index < page_count()`。
    fn render_page(&self, index: usize, scale: f32) -> Result<Raster, TransparencyError>;
}

/// 选页并渲染。
///
/// `page_index` 缺省为第一页；越界时返回 `PageOutOfRange`。
pub fn render_selected_page<D>(
    document: &D,
    page_index: Option<usize>,
    scale: f32,
) -> Result<Raster, TransparencyError>
where
    D: PagedDocument + ?Sized,
{
    let requested = page_index.unwrap_or(0);
    let available = document.page_count();

    if requested >= available {
        return Err(TransparencyError::PageOutOfRange {
            requested,
            available,
        });
    }

    log::debug!("📄 渲染第 {}/{} 页（scale={}）", requested + 1, available, scale);
    document.render_page(requested, scale)
}

/// 从内存字节打开分页文档。
#[cfg(feature = "pdf")]
pub(crate) fn open_document(
    bytes: &[u8],
    _config: &TransparencyConfig,
) -> Result<Box<dyn PagedDocument>, TransparencyError> {
    Ok(Box::new(mupdf_backend::MupdfDocument::from_bytes(bytes)?))
}

#[cfg(not(feature = "pdf"))]
pub(crate) fn open_document(
    _bytes: &[u8],
    _config: &TransparencyConfig,
) -> Result<Box<dyn PagedDocument>, TransparencyError> {
    Err(TransparencyError::Decode(
        "当前构建未启用 `pdf` 功能，无法渲染分页文档".to_string(),
    ))
}

/// 打开、选页、渲染，一次完成；文档句柄在返回前释放。
pub(crate) fn acquire_paginated(
    bytes: &[u8],
    page_index: Option<usize>,
    config: &TransparencyConfig,
) -> Result<Raster, TransparencyError> {
    let document = open_document(bytes, config)?;
    let raster = render_selected_page(document.as_ref(), page_index, config.render_scale)?;
    drop(document);
    Ok(raster)
}

#[cfg(feature = "pdf")]
pub use mupdf_backend::MupdfDocument;

#[cfg(feature = "pdf")]
mod mupdf_backend {
    use mupdf::{Colorspace, Document, Matrix};

    use super::PagedDocument;
    use crate::transparency::{Raster, TransparencyError};

    const PDF_MAGIC: &str = "application/pdf";

    /// 基于 MuPDF 的 PDF 文档。
    pub struct MupdfDocument {
        document: Document,
        page_count: usize,
    }

    impl MupdfDocument {
        pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransparencyError> {
            let document = Document::from_bytes(bytes, PDF_MAGIC)
                .map_err(|e| TransparencyError::Decode(format!("无法打开 PDF：{}", e)))?;
            let page_count = document
                .page_count()
                .map_err(|e| TransparencyError::Decode(format!("无法读取 PDF 页数：{}", e)))?;
            let page_count = usize::try_from(page_count)
                .map_err(|_| TransparencyError::Decode(format!("PDF 页数异常：{}", page_count)))?;

            Ok(Self {
                document,
                page_count,
            })
        }
    }

    impl PagedDocument for MupdfDocument {
        fn page_count(&self) -> usize {
            self.page_count
        }

        fn render_page(&self, index: usize, scale: f32) -> Result<Raster, TransparencyError> {
            let page_no = i32::try_from(index)
                .map_err(|_| TransparencyError::Decode(format!("页码过大：{}", index)))?;
            let page = self
                .document
                .load_page(page_no)
                .map_err(|e| TransparencyError::Decode(format!("无法加载第 {} 页：{}", index, e)))?;

            let matrix = Matrix::new_scale(scale, scale);
            let pixmap = page
                .to_pixmap(&matrix, &Colorspace::device_rgb(), 0.0, false)
                .map_err(|e| TransparencyError::Decode(format!("页面渲染失败：{}", e)))?;

            let width = pixmap.width() as u32;
            let height = pixmap.height() as u32;
            let components = pixmap.n() as usize;
            let stride = pixmap.stride() as usize;
            let samples = pixmap.samples();

            if components < 3 {
                return Err(TransparencyError::Decode(format!(
                    "页面像素通道数异常：{}",
                    components
                )));
            }

            // pixmap 行可能带填充，逐行拷贝并只保留 RGB
            let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
            for row in samples.chunks(stride).take(height as usize) {
                for pixel in row.chunks_exact(components).take(width as usize) {
                    rgb.extend_from_slice(&pixel[..3]);
                }
            }

            Raster::from_rgb8(width, height, rgb)
                .ok_or_else(|| TransparencyError::Decode("页面像素数据长度异常".to_string()))
        }
    }
}
