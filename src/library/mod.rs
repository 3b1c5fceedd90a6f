//! 构建目录模块：目录视图与全局单例
pub mod build_library;
pub mod global;

// 导出核心接口
pub use self::build_library::BuildLibrary;
pub use self::global::{
    filter_builds, get_global_library, init_library, init_library_with_config, resolve_build_stage,
};
