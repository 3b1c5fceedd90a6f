//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

use crate::catalog::model::ContentCategory;
use crate::feed::FeedSource;

/// 静态目录来源
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// 编译期内置目录（embedded-catalog 特性）
    Embedded,
    /// 本地 JSON 目录文件
    LocalFile(PathBuf),
}

/// 重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    Never,     // 不重试
    Times(u8), // 固定次数重试（不含第一次）
}

impl RetryPolicy {
    /// 最大重试次数
    pub fn max_retries(&self) -> usize {
        match self {
            RetryPolicy::Never => 0,
            RetryPolicy::Times(n) => *n as usize,
        }
    }
}

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 基础目录来源
    pub catalog_source: CatalogSource,
    // 目录快照缓存路径
    pub cache_path: PathBuf,
    // 视频订阅源（None 表示不拉取）
    pub feed_source: Option<FeedSource>,
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    pub thumbnail_timeout: u64,
    pub retry: RetryPolicy,
    // 是否探测 maxres 缩略图
    pub check_thumbnails: bool,
    // 构建网格可列出的分类
    pub listable_category: ContentCategory,
    // 加载时是否根据标题补全 slug
    pub derive_slugs: bool,
    // 订阅源生成记录的作者
    pub author: String,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            catalog_source: CatalogSource::Embedded,
            cache_path: PathBuf::from("gekicatalog_cache.mp"),
            feed_source: None,
            http_timeout: 30,
            thumbnail_timeout: 5,
            retry: RetryPolicy::Times(2),
            check_thumbnails: false,
            listable_category: ContentCategory::Builds,
            derive_slugs: true,
            author: "GekiGaming".to_string(),
            verbose: false,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn catalog_source(mut self, source: CatalogSource) -> Self {
        self.config.catalog_source = source;
        self
    }

    pub fn local_catalog(self, path: impl Into<PathBuf>) -> Self {
        self.catalog_source(CatalogSource::LocalFile(path.into()))
    }

    pub fn cache_path(mut self, path: PathBuf) -> Self {
        self.config.cache_path = path;
        self
    }

    pub fn feed_source(mut self, source: FeedSource) -> Self {
        self.config.feed_source = Some(source);
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn thumbnail_timeout(mut self, timeout: u64) -> Self {
        self.config.thumbnail_timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn check_thumbnails(mut self, check: bool) -> Self {
        self.config.check_thumbnails = check;
        self
    }

    pub fn listable_category(mut self, category: ContentCategory) -> Self {
        self.config.listable_category = category;
        self
    }

    pub fn derive_slugs(mut self, derive: bool) -> Self {
        self.config.derive_slugs = derive;
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.config.author = author.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ConfigManager::custom()
            .local_catalog("site/catalog.json")
            .http_timeout(10)
            .retry(RetryPolicy::Never)
            .author("Geki")
            .verbose(true)
            .build();

        assert!(matches!(config.catalog_source, CatalogSource::LocalFile(ref p) if p == &PathBuf::from("site/catalog.json")));
        assert_eq!(config.http_timeout, 10);
        assert_eq!(config.retry.max_retries(), 0);
        assert_eq!(config.author, "Geki");
        assert!(config.verbose);
        assert!(!ConfigManager::get_default().verbose);
        // 未覆盖的字段保持默认
        assert_eq!(config.thumbnail_timeout, 5);
        assert_eq!(config.listable_category, ContentCategory::Builds);
        assert!(config.feed_source.is_none());
    }
}
