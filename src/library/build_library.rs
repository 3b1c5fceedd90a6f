//! 构建目录：整合加载好的目录数据，向展示层提供过滤、阶段解析、文章浏览等视图
use std::sync::Arc;
use tracing::debug;

use crate::catalog::CatalogLoader;
use crate::catalog::model::{BuildRecord, CatalogData, ClassGroupTable, ContentCategory, GalleryItem};
use crate::config::GlobalConfig;
use crate::error::CatalogResult;
use crate::filter::{CatalogFilter, CategoryPreview, FilterOutcome, Query, SearchHints, articles, category_previews};
use crate::stage::{EffectiveStage, StageResolver};

/// 构建目录（不可变，可跨线程共享）
#[derive(Debug, Clone)]
pub struct BuildLibrary {
    catalog: Arc<CatalogData>,
    // 可列出分类的记录，保持目录顺序
    listable: Arc<Vec<BuildRecord>>,
    hints: Arc<SearchHints>,
    config: GlobalConfig,
}

impl BuildLibrary {
    /// 加载目录并创建
    pub async fn new(config: GlobalConfig) -> CatalogResult<Self> {
        let catalog = CatalogLoader::load(&config).await?;
        Ok(Self::from_catalog(catalog, config))
    }

    /// 由已整理的目录数据创建
    pub fn from_catalog(catalog: CatalogData, config: GlobalConfig) -> Self {
        let listable: Vec<BuildRecord> = catalog
            .builds
            .iter()
            .filter(|record| record.category == config.listable_category)
            .cloned()
            .collect();
        let hints = SearchHints::build(&listable);

        debug!(
            "构建目录就绪：记录{}条，可列出{}条，搜索提示{}条",
            catalog.builds.len(),
            listable.len(),
            hints.all().len()
        );

        Self {
            catalog: Arc::new(catalog),
            listable: Arc::new(listable),
            hints: Arc::new(hints),
            config,
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// 全部记录
    pub fn records(&self) -> &[BuildRecord] {
        &self.catalog.builds
    }

    pub fn class_groups(&self) -> &ClassGroupTable {
        &self.catalog.class_groups
    }

    /// 可列出分类的记录（目录顺序）
    pub fn listable_builds(&self) -> &[BuildRecord] {
        &self.listable
    }

    /// 过滤可列出的构建
    pub fn filter(&self, query: &Query) -> FilterOutcome<'_> {
        CatalogFilter::apply(&self.listable, &self.catalog.class_groups, query)
    }

    /// 文章浏览：None 返回全部记录
    pub fn articles(&self, category: Option<ContentCategory>) -> Vec<&BuildRecord> {
        articles(&self.catalog.builds, category)
    }

    /// 首页分类网格
    pub fn category_previews(&self, categories: &[ContentCategory]) -> Vec<CategoryPreview<'_>> {
        category_previews(&self.catalog.builds, categories)
    }

    pub fn search_hints(&self) -> &[String] {
        self.hints.all()
    }

    pub fn suggest(&self, input: &str) -> Vec<&str> {
        self.hints.suggest(input)
    }

    /// 按 id 或 slug 查找
    pub fn find(&self, identifier: &str) -> Option<&BuildRecord> {
        self.catalog
            .builds
            .iter()
            .find(|record| record.id == identifier || record.slug.as_deref() == Some(identifier))
    }

    /// 解析指定构建的生效阶段；构建不存在或没有阶段时返回 None
    pub fn resolve_stage<I>(&self, identifier: &str, index: I) -> Option<EffectiveStage<'_>>
    where
        I: TryInto<usize>,
    {
        let stages = self.find(identifier)?.stages.as_deref()?;
        StageResolver::resolve(stages, index)
    }

    pub fn gallery(&self) -> &[GalleryItem] {
        &self.catalog.gallery
    }
}
