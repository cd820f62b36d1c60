//! 分类模块：规则评估、计分与结果整形
pub mod result;
pub mod analyzer;
pub mod classifier;
pub mod global;

// 导出核心接口
pub use self::result::{
    CategoryScores, ClassificationAnalysis, ClassificationResult, RuleMatchDetail, NO_MATCH_REASON,
};
pub use self::analyzer::{RuleAnalyzer, RuleEvaluation};
pub use self::classifier::QuestionClassifier;
pub use self::global::{
    analyze_question_text, classify_question_text, init_classifier, init_classifier_with_config,
};
