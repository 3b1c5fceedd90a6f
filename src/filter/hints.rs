//! 搜索提示：由可列出构建的标题、职业、标签去重生成（保留首次出现顺序）

use std::collections::HashSet;

use crate::catalog::model::BuildRecord;

/// 下拉建议的最大条数
pub const MAX_SUGGESTIONS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHints {
    hints: Vec<String>,
}

impl SearchHints {
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BuildRecord>,
    {
        let mut seen = HashSet::new();
        let mut hints = Vec::new();

        for record in records {
            let candidates = std::iter::once(&record.title)
                .chain(record.class_name.as_ref())
                .chain(record.tags.iter());
            for candidate in candidates {
                if seen.insert(candidate.as_str()) {
                    hints.push(candidate.clone());
                }
            }
        }

        Self { hints }
    }

    pub fn all(&self) -> &[String] {
        &self.hints
    }

    /// 输入为空时返回前几条；否则返回忽略大小写包含输入的提示
    pub fn suggest(&self, input: &str) -> Vec<&str> {
        let input = input.trim();
        if input.is_empty() {
            return self.hints.iter().take(MAX_SUGGESTIONS).map(String::as_str).collect();
        }

        let lowered = input.to_lowercase();
        self.hints
            .iter()
            .filter(|hint| hint.to_lowercase().contains(&lowered))
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::ContentCategory;

    fn record(title: &str, class: &str, tags: &[&str]) -> BuildRecord {
        let mut record = BuildRecord::new(title, title, ContentCategory::Builds);
        record.class_name = Some(class.to_string());
        record.tags = tags.iter().map(|t| t.to_string()).collect();
        record
    }

    #[test]
    fn test_hints_are_unique_in_first_seen_order() {
        let records = vec![
            record("Lorde Tyr", "Lorde", &["lorde", "mvp"]),
            record("Lorde Bash", "Lorde", &["mvp", "farm"]),
        ];
        let hints = SearchHints::build(&records);
        assert_eq!(
            hints.all(),
            &["Lorde Tyr", "Lorde", "lorde", "mvp", "Lorde Bash", "farm"]
        );
    }

    #[test]
    fn test_suggest_limits_and_filters() {
        let records: Vec<BuildRecord> = (0..10)
            .map(|i| record(&format!("Build {}", i), "Ninja", &[]))
            .collect();
        let hints = SearchHints::build(&records);

        assert_eq!(hints.suggest("").len(), MAX_SUGGESTIONS);
        assert_eq!(hints.suggest("NIN"), vec!["Ninja"]);
        assert!(hints.suggest("xyz").is_empty());
    }
}
