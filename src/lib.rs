//! gekicatalog - GekiGaming RagnaTales 构建指南目录引擎

// 导出全局错误类型
pub use self::error::{CatalogError, CatalogResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder, CatalogSource, RetryPolicy};

// 导出目录模块核心接口
pub use self::catalog::{
    BuildRecord, BuildStage, CatalogData, ClassGroupTable, ContentCategory, Equipment, EquipmentSlot,
    GalleryItem, CatalogLoader, CatalogCacheManager
};

// 导出过滤模块核心接口
pub use self::filter::{
    Query, CatalogFilter, FilterOutcome, filter_catalog, SearchHints, CategoryPreview,
    MAX_ITEMS_PER_CATEGORY, MAX_SUGGESTIONS, HOME_CATEGORIES
};

// 导出阶段模块核心接口
pub use self::stage::{EffectiveStage, StageResolver, resolve_stage};

// 导出工具模块核心接口
pub use self::utils::{slugify, ImageFallback, StatLine};

// 导出分类模块核心接口
pub use self::classify::{ClassifierRules, VideoClassifier, Classification, ClassMatch};

// 导出订阅源模块核心接口
pub use self::feed::{
    FeedSource, FeedVideo, FeedIngestor, FeedFetcher, IngestReport, IngestedVideo, ThumbnailResolver,
    UNCATEGORIZED_LABEL
};

// 导出构建目录核心接口（含全局简化接口）
pub use self::library::{
    BuildLibrary,
    init_library,
    init_library_with_config,
    get_global_library,
    filter_builds,
    resolve_build_stage,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod catalog;
pub mod filter;
pub mod stage;
pub mod utils;
pub mod classify;
pub mod feed;
pub mod library;
