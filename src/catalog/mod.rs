//! 目录模块：负责目录的数据模型定义、加载、缓存
pub mod model;
pub mod cache;
pub mod loader;

// 导出核心接口
pub use self::model::{
    AttributePhase, BuildRecord, BuildStage, BuildTip, CatalogData, ClassGroupTable, ContentCategory,
    Difficulty, Equipment, EquipmentSlot, GalleryItem, SkillNote, StatItem, StatValue, TipKind,
};
pub use self::loader::CatalogLoader;
pub use self::cache::CatalogCacheManager;
