//! 视频分类器：相关性判断、职业识别、内容分类识别

use std::sync::Arc;
use tracing::debug;

use super::compiler::RuleCompiler;
use super::pattern::{CompiledCategoryRule, CompiledClassifier, Matcher};
use super::rules::ClassifierRules;
use super::score::ScoreBoard;
use crate::catalog::model::ContentCategory;
use crate::error::CatalogResult;
use crate::feed::model::FeedVideo;

/// 标题命中得分
const TITLE_POINTS: u32 = 3;
/// 仅简介命中得分
const BODY_POINTS: u32 = 1;

/// 职业识别结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMatch {
    pub class_name: String,
    pub subcategory: String,
}

/// 分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 职业构建
    Build(ClassMatch),
    /// 非职业内容
    Content(ContentCategory),
    /// 未归类（不进入目录）
    Uncategorized,
}

/// 视频分类器
#[derive(Debug, Clone)]
pub struct VideoClassifier {
    compiled: Arc<CompiledClassifier>,
}

impl VideoClassifier {
    /// 使用默认规则创建
    pub fn with_default_rules() -> CatalogResult<Self> {
        Self::new(&ClassifierRules::default())
    }

    pub fn new(rules: &ClassifierRules) -> CatalogResult<Self> {
        let compiled = RuleCompiler::compile(rules)?;
        Ok(Self {
            compiled: Arc::new(compiled),
        })
    }

    /// 是否为相关视频
    pub fn is_relevant(&self, video: &FeedVideo) -> bool {
        let text = format!("{} {}", video.lowered_title(), video.lowered_description());
        if self.compiled.relevance_keywords.iter().any(|kw| text.contains(kw.as_str())) {
            return true;
        }

        video.tags.iter().flatten().any(|tag| {
            let tag = tag.to_lowercase();
            self.compiled.relevance_tags.contains(&tag)
                || self.compiled.relevance_tags.contains(tag.trim_start_matches('#'))
        })
    }

    /// 识别职业
    pub fn detect_class(&self, video: &FeedVideo) -> Option<ClassMatch> {
        let title = video.lowered_title();
        let description = video.lowered_description();

        // 泛职业内容（排行、对比）不归属具体职业
        if self.compiled.generic_patterns.iter().any(|p| title.contains(p.as_str())) {
            return None;
        }

        let text = format!("{} {}", title, description);
        let mut board = ScoreBoard::new();
        for (idx, class_rule) in self.compiled.classes.iter().enumerate() {
            let mut score = 0;
            for alias in &class_rule.aliases {
                score += match alias {
                    Matcher::Word(_) => {
                        if alias.is_match(&title) {
                            TITLE_POINTS
                        } else if alias.is_match(&description) {
                            BODY_POINTS
                        } else {
                            0
                        }
                    }
                    Matcher::Contains(_) => {
                        if !alias.is_match(&text) {
                            0
                        } else if alias.is_match(&title) {
                            TITLE_POINTS
                        } else {
                            BODY_POINTS
                        }
                    }
                };
            }
            board.update(idx, score);
        }

        let best = &self.compiled.classes[board.best()?];
        debug!("职业识别：{} -> {}", video.title.as_deref().unwrap_or(""), best.name);
        Some(ClassMatch {
            class_name: best.name.clone(),
            subcategory: best.subcategory.clone(),
        })
    }

    /// 识别非职业内容的分类；系列规则优先
    pub fn detect_content_category(&self, video: &FeedVideo) -> Option<ContentCategory> {
        let title = video.lowered_title();

        // 1. 系列规则：仅匹配标题，按表顺序第一个命中即返回
        for rule in &self.compiled.series {
            if rule.patterns.iter().any(|p| title.contains(p.as_str())) {
                return Some(rule.category);
            }
        }

        // 2. 普通分类打分
        let text = format!("{} {}", title, video.lowered_description());
        let mut board = ScoreBoard::new();
        for rule in &self.compiled.categories {
            board.update(rule.category, Self::score_category(rule, &title, &text));
        }
        board.best()
    }

    /// 完整分类流程：先识别职业，失败再识别内容分类
    pub fn classify(&self, video: &FeedVideo) -> Classification {
        if let Some(class_match) = self.detect_class(video) {
            return Classification::Build(class_match);
        }
        match self.detect_content_category(video) {
            Some(category) => Classification::Content(category),
            None => Classification::Uncategorized,
        }
    }

    fn score_category(rule: &CompiledCategoryRule, title: &str, text: &str) -> u32 {
        rule.patterns
            .iter()
            .map(|p| {
                if title.contains(p.as_str()) {
                    TITLE_POINTS
                } else if text.contains(p.as_str()) {
                    BODY_POINTS
                } else {
                    0
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str, description: &str, tags: &[&str]) -> FeedVideo {
        FeedVideo {
            id: "vid".to_string(),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            upload_date: None,
        }
    }

    fn classifier() -> VideoClassifier {
        VideoClassifier::with_default_rules().unwrap()
    }

    #[test]
    fn test_relevance_by_keyword_and_tag() {
        let classifier = classifier();
        assert!(classifier.is_relevant(&video("Build no RagnaTales", "", &[])));
        assert!(classifier.is_relevant(&video("Build nova", "", &["#Ragnarok"])));
        assert!(!classifier.is_relevant(&video("Minecraft survival", "casual", &["minecraft"])));
    }

    #[test]
    fn test_detect_class_by_title_alias() {
        let classifier = classifier();
        let found = classifier
            .detect_class(&video("Arquimago Campo Gravitacional RagnaTales", "", &[]))
            .unwrap();
        assert_eq!(found.class_name, "Arquimago");
        assert_eq!(found.subcategory, "Mago");
    }

    #[test]
    fn test_short_alias_needs_whole_word() {
        let classifier = classifier();
        // "mestre-ferreiro" 不应让 "Mestre" 胜出
        let found = classifier
            .detect_class(&video("Mestre-Ferreiro Cart Termination", "", &[]))
            .unwrap();
        assert_eq!(found.class_name, "Mestre-Ferreiro");
        assert_eq!(found.subcategory, "Mercador");
    }

    #[test]
    fn test_generic_titles_have_no_class() {
        let classifier = classifier();
        let generic = video("Tier List - Melhores Classes para Sniper e Lorde", "", &[]);
        assert!(classifier.detect_class(&generic).is_none());
        assert_eq!(
            classifier.classify(&generic),
            Classification::Content(ContentCategory::EssentialGuides)
        );
    }

    #[test]
    fn test_series_has_priority_over_scoring() {
        let classifier = classifier();
        let episode = video("RMT do Zero - guia de farm e refino", "", &[]);
        assert_eq!(
            classifier.detect_content_category(&episode),
            Some(ContentCategory::ZeroToRmt)
        );
    }

    #[test]
    fn test_patch_notes_and_uncategorized() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify(&video("Patch Notes de Março", "", &[])),
            Classification::Content(ContentCategory::PatchNotes)
        );
        assert_eq!(
            classifier.classify(&video("Live de sexta", "bate papo", &[])),
            Classification::Uncategorized
        );
    }
}
