//! qclassifier - 基于规则的问题分类引擎
//! 将自由文本问题判定为 objective / structured / opinion，并给出置信度与推理轨迹

// 导出全局错误类型
pub use self::error::{QcError, QcResult};

// 导出配置模块
pub use self::config::{ClassifierConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{builtin_rules, Category, RuleDefinition, RuleLibrary, RuleLoader};

// 导出编译模块核心接口
pub use self::compiler::{CompiledPattern, CompiledRule, CompiledRuleSet, RuleCompiler};

// 导出分类模块核心接口（含全局单例的简化接口）
pub use self::classifier::{
    QuestionClassifier,
    ClassificationResult,
    ClassificationAnalysis,
    RuleMatchDetail,
    NO_MATCH_REASON,
    init_classifier,
    init_classifier_with_config,
    classify_question_text,
    analyze_question_text,
};

// 导出服务模块核心接口
pub use self::service::{
    QuestionClassificationService, QuestionClassificationRecord, QuestionType,
    QuestionTypeBadge, QuestionTypeDescription, TypeValidation,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod utils;
pub mod compiler;
pub mod classifier;
pub mod service;
