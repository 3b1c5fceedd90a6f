//! 首页分类网格与文章页分类浏览

use crate::catalog::model::{BuildRecord, ContentCategory};

/// 首页每个分类最多展示的卡片数
pub const MAX_ITEMS_PER_CATEGORY: usize = 6;

/// 首页内容区默认展示的分类
pub const HOME_CATEGORIES: [ContentCategory; 4] = [
    ContentCategory::ZeroToRmt,
    ContentCategory::FamilyManMmo,
    ContentCategory::EssentialGuides,
    ContentCategory::PatchNotes,
];

/// 单个分类的预览
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPreview<'a> {
    pub category: ContentCategory,
    pub items: Vec<&'a BuildRecord>,
    /// 该分类下的记录总数（用于“查看全部”）
    pub total: usize,
}

impl CategoryPreview<'_> {
    pub fn has_more(&self) -> bool {
        self.total > self.items.len()
    }
}

/// 按分类生成预览，保持传入分类的顺序，空分类也会返回
pub fn category_previews<'a>(
    records: &'a [BuildRecord],
    categories: &[ContentCategory],
) -> Vec<CategoryPreview<'a>> {
    categories
        .iter()
        .map(|&category| {
            let mut matching = records.iter().filter(|record| record.category == category);
            let items: Vec<&BuildRecord> = matching.by_ref().take(MAX_ITEMS_PER_CATEGORY).collect();
            let total = items.len() + matching.count();
            CategoryPreview { category, items, total }
        })
        .collect()
}

/// 文章页：未选分类时返回全部记录
pub fn articles(records: &[BuildRecord], category: Option<ContentCategory>) -> Vec<&BuildRecord> {
    records
        .iter()
        .filter(|record| category.is_none_or(|cat| record.category == cat))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<BuildRecord> {
        let mut records: Vec<BuildRecord> = (0..8)
            .map(|i| BuildRecord::new(format!("guide-{}", i), "Guia", ContentCategory::EssentialGuides))
            .collect();
        records.insert(3, BuildRecord::new("patch-1", "Patch", ContentCategory::PatchNotes));
        records
    }

    #[test]
    fn test_previews_cap_items_and_count_total() {
        let records = catalog();
        let previews = category_previews(&records, &[ContentCategory::EssentialGuides, ContentCategory::ZeroToRmt]);

        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].items.len(), MAX_ITEMS_PER_CATEGORY);
        assert_eq!(previews[0].total, 8);
        assert!(previews[0].has_more());
        assert_eq!(previews[0].items[0].id, "guide-0");

        assert!(previews[1].items.is_empty());
        assert_eq!(previews[1].total, 0);
    }

    #[test]
    fn test_articles_filter_by_category() {
        let records = catalog();
        assert_eq!(articles(&records, None).len(), 9);

        let patches = articles(&records, Some(ContentCategory::PatchNotes));
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].id, "patch-1");
    }
}
