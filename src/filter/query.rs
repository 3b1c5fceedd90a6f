//! 查询对象：由展示层持有，每次求值时按值传入
//! 不持久化，导航时重置

use crate::catalog::model::ContentCategory;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// 画廊职业分组标签或具体职业名
    pub selected_class_filter: Option<String>,
    /// 自由文本搜索词（空串表示不搜索）
    pub search_term: String,
    /// 文章页分类
    pub selected_category: Option<ContentCategory>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_filter(mut self, class_filter: impl Into<String>) -> Self {
        self.selected_class_filter = Some(class_filter.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn category(mut self, category: ContentCategory) -> Self {
        self.selected_category = Some(category);
        self
    }

    /// 导航时清空所有条件
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 生效的职业筛选（仅空串视为未设置，纯空白按具体职业名精确匹配）
    pub fn active_class_filter(&self) -> Option<&str> {
        self.selected_class_filter
            .as_deref()
            .filter(|value| !value.is_empty())
    }

    /// 生效的搜索词（去除首尾空白后非空）
    pub fn active_search_term(&self) -> Option<&str> {
        Some(self.search_term.trim()).filter(|term| !term.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active_class_filter().is_none()
            && self.active_search_term().is_none()
            && self.selected_category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_inactive() {
        let query = Query::new().class_filter("").search("   ");
        assert!(query.active_class_filter().is_none());
        assert!(query.active_search_term().is_none());
        assert!(query.is_empty());
    }

    #[test]
    fn test_whitespace_class_filter_stays_active() {
        let query = Query::new().class_filter("  ");
        assert_eq!(query.active_class_filter(), Some("  "));
        assert!(!query.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut query = Query::new()
            .class_filter("Espadachim")
            .search("tyr")
            .category(ContentCategory::Builds);
        assert!(!query.is_empty());
        query.reset();
        assert_eq!(query, Query::default());
    }
}
