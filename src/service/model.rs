//! 服务层数据模型：存储侧问题类型与展示信息

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::QcError;
use crate::rule::Category;

/// 存储侧问题类型（与数据库枚举保持一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Objective,
    Structured,
    Opinion,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Objective => "OBJECTIVE",
            QuestionType::Structured => "STRUCTURED",
            QuestionType::Opinion => "OPINION",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = QcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Category>().map(QuestionType::from)
    }
}

// ======== 分类器类别 <-> 存储类型 ========
impl From<Category> for QuestionType {
    fn from(category: Category) -> Self {
        match category {
            Category::Objective => QuestionType::Objective,
            Category::Structured => QuestionType::Structured,
            Category::Opinion => QuestionType::Opinion,
        }
    }
}

impl From<QuestionType> for Category {
    fn from(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Objective => Category::Objective,
            QuestionType::Structured => Category::Structured,
            QuestionType::Opinion => Category::Opinion,
        }
    }
}

/// 可直接落库的分类结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionClassificationRecord {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

/// 问题类型说明
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTypeDescription {
    pub title: &'static str,
    pub description: &'static str,
    pub grading_method: &'static str,
}

/// 问题类型徽章（标签 / 样式 / 图标）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionTypeBadge {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// 声明类型与分类结果的比对
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_type: Option<QuestionType>,
    pub confidence: f64,
    pub reasoning: Vec<String>,
}
