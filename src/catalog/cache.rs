//! 目录快照缓存
//! 仅处理目录文档的本地序列化（MessagePack）和反序列化

use rmp_serde::{Serializer, from_slice};
use serde::Serialize;
use tracing::debug;

use super::model::CatalogData;
use crate::config::GlobalConfig;
use crate::error::{CatalogError, CatalogResult};

/// 目录缓存管理器
pub struct CatalogCacheManager;

impl CatalogCacheManager {
    /// 从本地缓存加载目录
    pub async fn load_from_cache(config: &GlobalConfig) -> CatalogResult<CatalogData> {
        let cache_data = tokio::fs::read(&config.cache_path).await?;

        let catalog: CatalogData = from_slice(&cache_data)
            .map_err(|e| CatalogError::MsgPackError(format!("反序列化失败：{}", e)))?;

        debug!(
            "缓存文件反序列化成功，记录数：{}，职业分组数：{}",
            catalog.builds.len(),
            catalog.class_groups.len()
        );
        Ok(catalog)
    }

    /// 将目录缓存到本地
    pub async fn save_to_cache(config: &GlobalConfig, catalog: &CatalogData) -> CatalogResult<()> {
        let mut cache_data = Vec::new();

        // 可选字段会被跳过，必须按字段名编码
        catalog
            .serialize(&mut Serializer::new(&mut cache_data).with_struct_map())
            .map_err(|e| CatalogError::MsgPackError(format!("序列化失败：{}", e)))?;

        debug!("目录序列化成功，序列化后数据大小：{} 字节", cache_data.len());

        if let Some(parent) = config.cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CatalogError::CatalogCacheError(format!("创建缓存目录失败：{}", e)))?;
        }
        tokio::fs::write(&config.cache_path, cache_data).await?;
        Ok(())
    }

    /// 清除本地缓存
    pub async fn clear_cache(config: &GlobalConfig) -> CatalogResult<()> {
        if tokio::fs::try_exists(&config.cache_path).await? {
            tokio::fs::remove_file(&config.cache_path).await?;
        }
        Ok(())
    }
}
