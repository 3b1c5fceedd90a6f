//! 分类规则编译器
//! 仅负责将原始规则编译为可执行的匹配器

use std::time::Instant;
use regex::Regex;
use tracing::debug;

use super::pattern::{CompiledCategoryRule, CompiledClassRule, CompiledClassifier, Matcher};
use super::rules::{CategoryPatternRule, ClassifierRules};
use crate::error::CatalogResult;

/// 编译统计
#[derive(Debug, Default)]
struct CompileStats {
    word_count: usize,
    contains_count: usize,
    category_pattern_count: usize,
}

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则集
    pub fn compile(rules: &ClassifierRules) -> CatalogResult<CompiledClassifier> {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        // 1. 编译职业别名
        let mut classes = Vec::with_capacity(rules.classes.len());
        for class_rule in &rules.classes {
            let mut aliases = Vec::with_capacity(class_rule.aliases.len());
            for alias in &class_rule.aliases {
                aliases.push(Self::compile_alias(alias, rules.short_alias_max_len, &mut stats)?);
            }
            debug!(
                "职业 {} 别名：{:?}",
                class_rule.name,
                aliases.iter().map(Matcher::describe).collect::<Vec<_>>()
            );
            classes.push(CompiledClassRule {
                name: class_rule.name.clone(),
                subcategory: class_rule.subcategory.clone(),
                aliases,
            });
        }

        // 2. 分类关键词统一转小写
        let series = Self::compile_category_rules(&rules.series, &mut stats);
        let categories = Self::compile_category_rules(&rules.categories, &mut stats);

        debug!("分类规则编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "编译统计：整词别名{}条、子串别名{}条、分类关键词{}条",
            stats.word_count, stats.contains_count, stats.category_pattern_count
        );

        Ok(CompiledClassifier {
            relevance_keywords: Self::lowercase_all(&rules.relevance_keywords),
            relevance_tags: rules.relevance_tags.iter().map(|t| t.to_lowercase()).collect(),
            generic_patterns: Self::lowercase_all(&rules.generic_patterns),
            classes,
            series,
            categories,
        })
    }

    /// 短别名编译为整词正则，长别名直接子串匹配
    fn compile_alias(alias: &str, short_max_len: usize, stats: &mut CompileStats) -> CatalogResult<Matcher> {
        let alias = alias.to_lowercase();
        if alias.chars().count() <= short_max_len {
            let regex = Regex::new(&format!(r"\b{}\b", regex::escape(&alias)))?;
            stats.word_count += 1;
            Ok(Matcher::Word(regex))
        } else {
            stats.contains_count += 1;
            Ok(Matcher::Contains(alias))
        }
    }

    fn compile_category_rules(rules: &[CategoryPatternRule], stats: &mut CompileStats) -> Vec<CompiledCategoryRule> {
        rules
            .iter()
            .map(|rule| {
                stats.category_pattern_count += rule.patterns.len();
                CompiledCategoryRule {
                    category: rule.category,
                    patterns: Self::lowercase_all(&rule.patterns),
                }
            })
            .collect()
    }

    fn lowercase_all(items: &[String]) -> Vec<String> {
        items.iter().map(|s| s.to_lowercase()).collect()
    }
}
