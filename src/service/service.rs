//! 问题分类服务
//! 面向提交流程：标题 + 正文拼接后分类，并提供类型说明、徽章与类型校验

use once_cell::sync::Lazy;
use tracing::debug;

use super::model::{
    QuestionClassificationRecord, QuestionType, QuestionTypeBadge, QuestionTypeDescription,
    TypeValidation,
};
use crate::classifier::{ClassificationAnalysis, QuestionClassifier};
use crate::config::ClassifierConfig;
use crate::error::QcResult;
use crate::utils::join_title_content;

/// 默认服务实例（内置规则表）
static DEFAULT_SERVICE: Lazy<QuestionClassificationService> =
    Lazy::new(QuestionClassificationService::new);

/// 问题分类服务
#[derive(Debug, Clone, Default)]
pub struct QuestionClassificationService {
    classifier: QuestionClassifier,
}

impl QuestionClassificationService {
    pub fn new() -> Self {
        Self {
            classifier: QuestionClassifier::new(),
        }
    }

    pub fn with_config(config: ClassifierConfig) -> QcResult<Self> {
        Ok(Self {
            classifier: QuestionClassifier::with_config(config)?,
        })
    }

    pub fn with_classifier(classifier: QuestionClassifier) -> Self {
        Self { classifier }
    }

    /// 共享的默认服务
    pub fn shared() -> &'static QuestionClassificationService {
        &DEFAULT_SERVICE
    }

    pub fn classifier(&self) -> &QuestionClassifier {
        &self.classifier
    }

    /// 分类问题，返回存储侧结果
    pub fn classify_question(&self, title: &str, content: &str) -> QuestionClassificationRecord {
        let full_question = join_title_content(title, content);
        let result = self.classifier.classify(&full_question);

        QuestionClassificationRecord {
            question_type: result.category.into(),
            confidence: result.confidence,
            reasoning: result.reasoning,
        }
    }

    /// 问题的详细分析
    pub fn analyze_question(&self, title: &str, content: &str) -> ClassificationAnalysis {
        let full_question = join_title_content(title, content);
        self.classifier.analyze(&full_question)
    }

    /// 问题类型说明
    pub fn describe(question_type: QuestionType) -> QuestionTypeDescription {
        match question_type {
            QuestionType::Objective => QuestionTypeDescription {
                title: "Objective Question",
                description: "Fact-based questions with specific, correct answers",
                grading_method: "Exact match or multiple choice scoring",
            },
            QuestionType::Structured => QuestionTypeDescription {
                title: "Structured Question",
                description: "Explanations and analysis requiring detailed responses",
                grading_method: "Rubric-based scoring with key points",
            },
            QuestionType::Opinion => QuestionTypeDescription {
                title: "Opinion Question",
                description: "Personal reflection and discussion questions",
                grading_method: "Engagement scoring (no right/wrong answers)",
            },
        }
    }

    /// 问题类型徽章
    pub fn badge(question_type: QuestionType) -> QuestionTypeBadge {
        match question_type {
            QuestionType::Objective => QuestionTypeBadge {
                label: "Objective",
                color: "bg-blue-100 text-blue-800",
                icon: "🎯",
            },
            QuestionType::Structured => QuestionTypeBadge {
                label: "Structured",
                color: "bg-green-100 text-green-800",
                icon: "📝",
            },
            QuestionType::Opinion => QuestionTypeBadge {
                label: "Opinion",
                color: "bg-purple-100 text-purple-800",
                icon: "💭",
            },
        }
    }

    /// 校验作者声明的类型是否与分类结果一致
    pub fn validate_question_type(
        &self,
        declared: QuestionType,
        title: &str,
        content: &str,
    ) -> TypeValidation {
        let record = self.classify_question(title, content);
        let is_valid = record.question_type == declared;
        if !is_valid {
            debug!("声明类型 {} 与分类结果 {} 不一致", declared, record.question_type);
        }

        TypeValidation {
            is_valid,
            suggested_type: (!is_valid).then_some(record.question_type),
            confidence: record.confidence,
            reasoning: record.reasoning,
        }
    }
}
