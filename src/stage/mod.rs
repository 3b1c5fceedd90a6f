//! 阶段模块：构建进度阶段的装备继承解析
pub mod resolver;

// 导出核心接口
pub use self::resolver::{EffectiveStage, StageResolver, resolve_stage};
