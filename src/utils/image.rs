//! 图片来源工具
//! 处理画廊图片覆盖和缩略图加载失败时的回退

use crate::catalog::model::{BuildRecord, GalleryItem};

/// 图片回退工具
pub struct ImageFallback;

impl ImageFallback {
    /// 画廊展示图：手动覆盖优先
    pub fn gallery_image(item: &GalleryItem) -> &str {
        item.image_override
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&item.image_url)
    }

    /// 当前图片加载失败后的下一个来源
    /// 仅在存在回退图且与当前来源不同时返回，避免重复加载同一地址
    pub fn next<'a>(current: &str, record: &'a BuildRecord) -> Option<&'a str> {
        record
            .fallback_image_url
            .as_deref()
            .filter(|fallback| *fallback != current)
    }
}
