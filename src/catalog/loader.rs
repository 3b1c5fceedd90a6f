//! 目录加载管理器
//! 负责从本地缓存、订阅源或基础目录（内置 / 本地文件）加载目录，并做一次性的加载期整理

use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::cache::CatalogCacheManager;
use super::model::{BuildRecord, CatalogData};
use crate::config::{CatalogSource, GlobalConfig};
use crate::error::{CatalogError, CatalogResult};
use crate::feed::{FeedIngestor, FeedSource};
use crate::utils::slugify;

/// 编译期内置目录
#[cfg(feature = "embedded-catalog")]
const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// 目录加载管理器
pub struct CatalogLoader;

impl CatalogLoader {
    /// 加载目录
    /// 配置了订阅源时：本地缓存 > 订阅源（合并后写缓存）> 基础目录；否则直接使用基础目录
    pub async fn load(config: &GlobalConfig) -> CatalogResult<CatalogData> {
        let Some(feed_source) = &config.feed_source else {
            let base = Self::load_base(config).await?;
            return Self::prepare(base, config);
        };

        // 1. 优先加载本地缓存
        match CatalogCacheManager::load_from_cache(config).await {
            Ok(catalog) => {
                debug!("从本地缓存加载目录成功");
                return Self::prepare(catalog, config);
            }
            Err(e) => debug!("本地缓存不可用：{}", e),
        }

        let base = Self::load_base(config).await?;

        // 2. 订阅源导入（尽力而为）
        let feed_records = match Self::ingest_feed(config, feed_source).await {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                warn!("订阅源没有可用视频，使用基础目录");
                return Self::prepare(base, config);
            }
            Err(e) => {
                warn!("订阅源导入失败：{}，使用基础目录", e);
                return Self::prepare(base, config);
            }
        };

        let catalog = Self::prepare(Self::merge_feed(base, feed_records), config)?;

        // 3. 缓存到本地
        if let Err(e) = CatalogCacheManager::save_to_cache(config, &catalog).await {
            warn!("目录缓存到本地失败：{}", e);
        } else {
            debug!("订阅源目录已缓存到本地");
        }

        Ok(catalog)
    }

    /// 加载基础目录（未整理）
    pub async fn load_base(config: &GlobalConfig) -> CatalogResult<CatalogData> {
        match &config.catalog_source {
            CatalogSource::Embedded => Self::load_embedded(),
            CatalogSource::LocalFile(path) => {
                let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                    CatalogError::CatalogLoadError(format!("读取目录文件 {} 失败：{}", path.display(), e))
                })?;
                let catalog = Self::from_json(&text)?;
                info!("从本地文件加载目录：{}，记录数：{}", path.display(), catalog.builds.len());
                Ok(catalog)
            }
        }
    }

    #[cfg(feature = "embedded-catalog")]
    fn load_embedded() -> CatalogResult<CatalogData> {
        let catalog = Self::from_json(EMBEDDED_CATALOG)?;
        debug!("加载内置目录，记录数：{}", catalog.builds.len());
        Ok(catalog)
    }

    #[cfg(not(feature = "embedded-catalog"))]
    fn load_embedded() -> CatalogResult<CatalogData> {
        Err(CatalogError::CatalogLoadError(
            "未启用 embedded-catalog 特性，请指定本地目录文件".to_string(),
        ))
    }

    /// 解析目录 JSON 文档
    pub fn from_json(text: &str) -> CatalogResult<CatalogData> {
        serde_json::from_str(text)
            .map_err(|e| CatalogError::CatalogLoadError(format!("目录JSON解析失败：{}", e)))
    }

    async fn ingest_feed(config: &GlobalConfig, source: &FeedSource) -> CatalogResult<Vec<BuildRecord>> {
        let report = FeedIngestor::new(config)?.run(source).await?;
        Ok(report.to_records(&config.author))
    }

    /// 合并订阅源记录与基础目录
    /// 订阅源记录在前；同 id 的基础记录提供详细数据（slug、装备进度等）；其余基础记录追加在后
    pub fn merge_feed(mut base: CatalogData, feed_records: Vec<BuildRecord>) -> CatalogData {
        let mut remaining = std::mem::take(&mut base.builds);
        let mut builds = Vec::with_capacity(feed_records.len() + remaining.len());

        for mut record in feed_records {
            if let Some(pos) = remaining.iter().position(|b| b.id == record.id) {
                let detail = remaining.remove(pos);
                Self::attach_details(&mut record, detail);
            }
            builds.push(record);
        }
        builds.extend(remaining);

        debug!("订阅源合并完成，记录数：{}", builds.len());
        base.builds = builds;
        base
    }

    fn attach_details(record: &mut BuildRecord, detail: BuildRecord) {
        record.slug = record.slug.take().or(detail.slug);
        record.tldr = record.tldr.take().or(detail.tldr);
        record.difficulty = record.difficulty.or(detail.difficulty);
        record.stages = record.stages.take().or(detail.stages);
        if record.attribute_phases.is_empty() {
            record.attribute_phases = detail.attribute_phases;
        }
        if record.skills.is_empty() {
            record.skills = detail.skills;
        }
        if record.tips.is_empty() {
            record.tips = detail.tips;
        }
    }

    /// 加载期整理：补全 slug，然后校验
    pub fn prepare(mut catalog: CatalogData, config: &GlobalConfig) -> CatalogResult<CatalogData> {
        if config.derive_slugs {
            Self::derive_slugs(&mut catalog.builds);
        }
        Self::validate(&catalog)?;
        Ok(catalog)
    }

    /// 为缺少 slug 的记录按标题生成 slug；冲突时追加 id
    pub fn derive_slugs(records: &mut [BuildRecord]) {
        let mut taken: HashSet<String> = records.iter().filter_map(|r| r.slug.clone()).collect();
        let mut derived = 0;

        for record in records.iter_mut().filter(|r| r.slug.is_none()) {
            let mut slug = slugify(&record.title);
            if slug.is_empty() {
                continue;
            }
            if taken.contains(&slug) {
                slug = format!("{}-{}", slug, slugify(&record.id));
            }
            taken.insert(slug.clone());
            record.slug = Some(slug);
            derived += 1;
        }

        debug!("补全slug：{}条", derived);
    }

    /// 校验：id 唯一、slug 唯一、stages 若存在则非空
    pub fn validate(catalog: &CatalogData) -> CatalogResult<()> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();

        for record in &catalog.builds {
            if !ids.insert(record.id.as_str()) {
                return Err(CatalogError::CatalogValidation(format!("重复的记录id：{}", record.id)));
            }
            if let Some(slug) = &record.slug {
                if !slugs.insert(slug.as_str()) {
                    return Err(CatalogError::CatalogValidation(format!("重复的slug：{}", slug)));
                }
            }
            if record.stages.as_ref().is_some_and(Vec::is_empty) {
                return Err(CatalogError::CatalogValidation(format!("记录 {} 的装备阶段列表为空", record.id)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{BuildStage, ContentCategory};
    use crate::config::{ConfigManager, RetryPolicy};
    use std::io::Write;

    fn record(id: &str, title: &str) -> BuildRecord {
        BuildRecord::new(id, title, ContentCategory::Builds)
    }

    #[cfg(feature = "embedded-catalog")]
    #[tokio::test]
    async fn test_load_embedded_catalog() {
        let catalog = CatalogLoader::load(&ConfigManager::get_default()).await.unwrap();
        assert!(!catalog.builds.is_empty());
        assert!(catalog.class_groups.get("Espadachim").is_some());
        assert!(!catalog.gallery.is_empty());

        let archmage = catalog.builds.iter().find(|b| b.id == "ragna-6").unwrap();
        assert_eq!(archmage.slug.as_deref(), Some("campo-gravitacional"));
        assert!(archmage.has_stages());
        // 其余记录按标题补全 slug
        assert!(catalog.builds.iter().all(|b| b.slug.is_some()));
    }

    #[tokio::test]
    async fn test_load_local_file_without_slug_derivation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = CatalogData {
            builds: vec![record("a", "Sniper Tiro Preciso")],
            ..CatalogData::default()
        };
        tokio::fs::write(&path, serde_json::to_string(&catalog).unwrap()).await.unwrap();

        let config = ConfigManager::custom().local_catalog(&path).derive_slugs(false).build();
        let loaded = CatalogLoader::load(&config).await.unwrap();
        assert_eq!(loaded.builds.len(), 1);
        assert_eq!(loaded.builds[0].slug, None);
    }

    #[tokio::test]
    async fn test_missing_local_file() {
        let config = ConfigManager::custom().local_catalog("/nonexistent/catalog.json").build();
        let err = CatalogLoader::load(&config).await.unwrap_err();
        assert!(matches!(err, CatalogError::CatalogLoadError(_)));
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty_stages() {
        let duplicated = CatalogData {
            builds: vec![record("a", "One"), record("a", "Two")],
            ..CatalogData::default()
        };
        assert!(matches!(CatalogLoader::validate(&duplicated), Err(CatalogError::CatalogValidation(_))));

        let mut empty_stages = record("b", "Three");
        empty_stages.stages = Some(Vec::new());
        let catalog = CatalogData {
            builds: vec![empty_stages],
            ..CatalogData::default()
        };
        assert!(matches!(CatalogLoader::validate(&catalog), Err(CatalogError::CatalogValidation(_))));
    }

    #[test]
    fn test_derive_slugs_resolves_collisions() {
        let mut records = vec![
            record("ragna-1", "Build Sniper"),
            record("ragna-2", "Build Sniper"),
            record("ragna-3", "Ação Total!"),
        ];
        records[2].slug = Some("manual".to_string());
        CatalogLoader::derive_slugs(&mut records);

        assert_eq!(records[0].slug.as_deref(), Some("build-sniper"));
        assert_eq!(records[1].slug.as_deref(), Some("build-sniper-ragna-2"));
        assert_eq!(records[2].slug.as_deref(), Some("manual"));
    }

    #[test]
    fn test_merge_feed_attaches_details() {
        let mut detailed = record("ragna-2", "Arquimago antigo");
        detailed.slug = Some("campo-gravitacional".to_string());
        detailed.stages = Some(vec![BuildStage {
            label: "Starter".to_string(),
            attributes: Vec::new(),
            equipment: Default::default(),
            pet: None,
        }]);
        let base = CatalogData {
            builds: vec![record("ragna-1", "Base"), detailed, record("extra", "Extra")],
            ..CatalogData::default()
        };

        let merged = CatalogLoader::merge_feed(base, vec![record("ragna-2", "Arquimago novo")]);
        let ids: Vec<&str> = merged.builds.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["ragna-2", "ragna-1", "extra"]);
        assert_eq!(merged.builds[0].title, "Arquimago novo");
        assert_eq!(merged.builds[0].slug.as_deref(), Some("campo-gravitacional"));
        assert!(merged.builds[0].has_stages());
    }

    #[tokio::test]
    async fn test_feed_is_merged_then_cached() {
        let dir = tempfile::tempdir().unwrap();
        let feed_path = dir.path().join("videos.jsonl");
        let mut feed = std::fs::File::create(&feed_path).unwrap();
        writeln!(feed, r#"{{"id":"v1","title":"Build Sniper RagnaTales","description":"","upload_date":"20240101"}}"#).unwrap();

        let catalog_path = dir.path().join("catalog.json");
        let base = CatalogData {
            builds: vec![record("base-1", "Base Build")],
            ..CatalogData::default()
        };
        tokio::fs::write(&catalog_path, serde_json::to_string(&base).unwrap()).await.unwrap();

        let config = ConfigManager::custom()
            .local_catalog(&catalog_path)
            .cache_path(dir.path().join("cache.mp"))
            .feed_source(FeedSource::LocalFile(feed_path))
            .retry(RetryPolicy::Never)
            .build();

        let catalog = CatalogLoader::load(&config).await.unwrap();
        let ids: Vec<&str> = catalog.builds.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["ragna-1", "base-1"]);
        assert_eq!(catalog.builds[0].class_name.as_deref(), Some("Atirador de Elite"));
        assert!(config.cache_path.exists());

        // 第二次加载命中缓存
        let cached = CatalogCacheManager::load_from_cache(&config).await.unwrap();
        assert_eq!(cached, catalog);
        assert_eq!(CatalogLoader::load(&config).await.unwrap(), catalog);
    }

    #[tokio::test]
    async fn test_feed_failure_falls_back_to_base() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        let base = CatalogData {
            builds: vec![record("base-1", "Base Build")],
            ..CatalogData::default()
        };
        tokio::fs::write(&catalog_path, serde_json::to_string(&base).unwrap()).await.unwrap();

        let config = ConfigManager::custom()
            .local_catalog(&catalog_path)
            .cache_path(dir.path().join("cache.mp"))
            .feed_source(FeedSource::LocalFile(dir.path().join("missing.jsonl")))
            .build();

        let catalog = CatalogLoader::load(&config).await.unwrap();
        assert_eq!(catalog.builds.len(), 1);
        assert_eq!(catalog.builds[0].slug.as_deref(), Some("base-build"));
        assert!(!config.cache_path.exists());
    }
}
