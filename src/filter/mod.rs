//! 过滤模块：目录过滤、搜索提示、分类网格
pub mod query;
pub mod catalog_filter;
pub mod hints;
pub mod grid;

// 导出核心接口
pub use self::query::Query;
pub use self::catalog_filter::{CatalogFilter, FilterOutcome, filter_catalog, DEFAULT_TITLE};
pub use self::hints::{SearchHints, MAX_SUGGESTIONS};
pub use self::grid::{CategoryPreview, category_previews, articles, MAX_ITEMS_PER_CATEGORY, HOME_CATEGORIES};
