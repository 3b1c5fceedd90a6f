//! 分类模块：视频订阅源的相关性判断、职业与内容分类识别
pub mod rules;
pub mod pattern;
pub mod compiler;
pub mod score;
pub mod classifier;

// 导出核心接口
pub use self::rules::{ClassifierRules, ClassAliasRule, CategoryPatternRule};
pub use self::pattern::{Matcher, CompiledClassifier};
pub use self::compiler::RuleCompiler;
pub use self::classifier::{VideoClassifier, ClassMatch, Classification};
