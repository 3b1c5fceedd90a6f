//! 目录过滤器：按职业（含分组别名）、搜索词、内容分类筛选构建记录
//! 纯函数：结果顺序与输入一致，不缓存、不持有任何状态

use tracing::debug;

use super::query::Query;
use crate::catalog::model::{BuildRecord, ClassGroupTable};

/// 无任何条件时的标题
pub const DEFAULT_TITLE: &str = "All Builds";

/// 过滤结果：命中的记录（借用自输入）+ 展示标题
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    pub results: Vec<&'a BuildRecord>,
    pub title: String,
}

impl FilterOutcome<'_> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.results.iter().map(|record| record.id.as_str()).collect()
    }
}

/// 职业筛选条件（分组别名已展开）
enum ClassConstraint<'q> {
    Group(&'q [String]),
    Exact(&'q str),
}

impl ClassConstraint<'_> {
    fn accepts(&self, record: &BuildRecord) -> bool {
        let Some(class) = record.class_name.as_deref() else {
            return false;
        };
        match self {
            ClassConstraint::Group(classes) => classes.iter().any(|c| c == class),
            ClassConstraint::Exact(wanted) => class == *wanted,
        }
    }
}

/// 目录过滤器
pub struct CatalogFilter;

impl CatalogFilter {
    /// 执行过滤
    ///
    /// 顺序：职业筛选 -> 搜索词 -> 内容分类，三者可叠加。
    /// 标题规则：职业筛选优先；仅搜索时为 `Results for "<term>"`；仅分类时为分类名。
    pub fn apply<'a>(
        records: &'a [BuildRecord],
        class_groups: &ClassGroupTable,
        query: &Query,
    ) -> FilterOutcome<'a> {
        let mut title = DEFAULT_TITLE.to_string();

        // 1. 职业筛选
        let class_constraint = query.active_class_filter().map(|filter| {
            match class_groups.get(filter) {
                Some(classes) => {
                    title = match classes {
                        [single] => Self::class_title(single),
                        _ => Self::class_title(filter),
                    };
                    ClassConstraint::Group(classes)
                }
                None => {
                    title = Self::class_title(filter);
                    ClassConstraint::Exact(filter)
                }
            }
        });

        // 2. 搜索词（忽略大小写的子串匹配）
        let search_term = query.active_search_term();
        let lowered_term = search_term.map(str::to_lowercase);
        if let Some(term) = search_term {
            if class_constraint.is_none() {
                title = format!("Results for \"{}\"", term);
            }
        }

        // 3. 内容分类（精确相等）
        let category = query.selected_category;
        if let Some(cat) = category {
            if class_constraint.is_none() && search_term.is_none() {
                title = cat.label().to_string();
            }
        }

        let results: Vec<&BuildRecord> = records
            .iter()
            .filter(|record| class_constraint.as_ref().is_none_or(|c| c.accepts(record)))
            .filter(|record| {
                lowered_term
                    .as_deref()
                    .is_none_or(|term| Self::matches_search(record, term))
            })
            .filter(|record| category.is_none_or(|cat| record.category == cat))
            .collect();

        debug!("目录过滤完成：输入{}条，命中{}条，标题={}", records.len(), results.len(), title);

        FilterOutcome { results, title }
    }

    /// 标题、职业或任一标签包含搜索词（搜索词需已转小写）
    pub fn matches_search(record: &BuildRecord, lowered_term: &str) -> bool {
        record.title.to_lowercase().contains(lowered_term)
            || record
                .class_name
                .as_deref()
                .is_some_and(|class| class.to_lowercase().contains(lowered_term))
            || record
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(lowered_term))
    }

    fn class_title(label: &str) -> String {
        format!("Builds of {}", label)
    }
}

/// 简化接口：等价于 `CatalogFilter::apply`
pub fn filter_catalog<'a>(
    records: &'a [BuildRecord],
    class_groups: &ClassGroupTable,
    query: &Query,
) -> FilterOutcome<'a> {
    CatalogFilter::apply(records, class_groups, query)
}
