//! 全局构建目录单例管理
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::build_library::BuildLibrary;
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::{CatalogError, CatalogResult};
use crate::filter::{FilterOutcome, Query};
use crate::stage::EffectiveStage;

/// 全局构建目录实例
static GLOBAL_LIBRARY: Lazy<Arc<OnceCell<BuildLibrary>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 初始化全局构建目录（默认配置）
pub async fn init_library() -> CatalogResult<()> {
    init_library_with_config(ConfigManager::get_default()).await
}

/// 带自定义配置初始化全局构建目录；已初始化时直接返回
pub async fn init_library_with_config(config: GlobalConfig) -> CatalogResult<()> {
    if GLOBAL_LIBRARY.get().is_some() {
        return Ok(());
    }

    GLOBAL_LIBRARY
        .get_or_try_init(|| BuildLibrary::new(config))
        .await?;
    Ok(())
}

/// 获取全局构建目录
pub fn get_global_library() -> CatalogResult<&'static BuildLibrary> {
    GLOBAL_LIBRARY.get()
        .ok_or(CatalogError::LibraryNotInitialized)
}

/// 使用全局构建目录过滤
pub fn filter_builds(query: &Query) -> CatalogResult<FilterOutcome<'static>> {
    Ok(get_global_library()?.filter(query))
}

/// 使用全局构建目录解析阶段
pub fn resolve_build_stage<I>(identifier: &str, index: I) -> CatalogResult<Option<EffectiveStage<'static>>>
where
    I: TryInto<usize>,
{
    Ok(get_global_library()?.resolve_stage(identifier, index))
}
