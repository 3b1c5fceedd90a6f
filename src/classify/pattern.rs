//! 编译后的匹配模型

use std::collections::HashSet;
use regex::Regex;

use crate::catalog::model::ContentCategory;

#[derive(Debug, Clone)]
pub enum Matcher {
    Contains(String), // 子串匹配（输入需已转小写）
    Word(Regex),      // 整词匹配（短别名，避免 "mestre" 命中 "mestre-ferreiro" 以外的误报）
}

impl Matcher {
    /// 简单匹配判断（输入需已转小写）
    pub fn is_match(&self, lowered_input: &str) -> bool {
        match self {
            Matcher::Contains(s) => lowered_input.contains(s.as_str()),
            Matcher::Word(regex) => regex.is_match(lowered_input),
        }
    }

    /// 规则描述
    pub fn describe(&self) -> &str {
        match self {
            Matcher::Contains(s) => s,
            Matcher::Word(r) => r.as_str(),
        }
    }
}

/// 编译后的职业规则
#[derive(Debug, Clone)]
pub struct CompiledClassRule {
    pub name: String,
    pub subcategory: String,
    pub aliases: Vec<Matcher>,
}

/// 编译后的分类规则（关键词已转小写）
#[derive(Debug, Clone)]
pub struct CompiledCategoryRule {
    pub category: ContentCategory,
    pub patterns: Vec<String>,
}

/// 编译后的完整规则集
#[derive(Debug, Clone)]
pub struct CompiledClassifier {
    pub relevance_keywords: Vec<String>,
    pub relevance_tags: HashSet<String>,
    pub generic_patterns: Vec<String>,
    pub classes: Vec<CompiledClassRule>,
    pub series: Vec<CompiledCategoryRule>,
    pub categories: Vec<CompiledCategoryRule>,
}
