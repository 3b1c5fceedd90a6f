//! 工具模块：slug 生成、图片回退、属性文本拆分
pub mod slug;
pub mod image;
pub mod stat_line;

// 导出核心接口
pub use self::slug::slugify;
pub use self::image::ImageFallback;
pub use self::stat_line::StatLine;
