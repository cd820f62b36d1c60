//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::QcError;

/// 问题类别（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 客观题：有确定答案的事实/定义类问题
    Objective,
    /// 结构化题：需要解释、分析的开放问题
    Structured,
    /// 观点题：个人经验与看法
    Opinion,
}

impl Category {
    /// 全部类别，顺序即计分数组的下标顺序
    pub const ALL: [Category; 3] = [Category::Objective, Category::Structured, Category::Opinion];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Objective => "objective",
            Category::Structured => "structured",
            Category::Opinion => "opinion",
        }
    }

    /// 计分数组下标
    pub(crate) fn index(self) -> usize {
        match self {
            Category::Objective => 0,
            Category::Structured => 1,
            Category::Opinion => 2,
        }
    }
}

// ======== Display：推理轨迹中的 "(objective)" 即来源于此 ========
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = QcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "objective" => Ok(Category::Objective),
            "structured" => Ok(Category::Structured),
            "opinion" => Ok(Category::Opinion),
            other => Err(QcError::InvalidInput(format!("未知问题类别：{}", other))),
        }
    }
}

/// 单条分类规则（原始定义，未编译）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    pub category: Category,
    /// 正则模式，按声明顺序匹配，首个命中即停止
    #[serde(default)]
    pub patterns: Vec<String>,
    /// 关键词子串，全部参与计分
    #[serde(default)]
    pub keywords: Vec<String>,
    pub weight: f64,
}

impl RuleDefinition {
    /// 从字面量表快速构建（内置规则表使用）
    pub fn new(name: &str, category: Category, patterns: &[&str], keywords: &[&str], weight: f64) -> Self {
        Self {
            name: name.to_string(),
            category,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weight,
        }
    }
}

/// 完整规则库（有序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleLibrary {
    pub rules: Vec<RuleDefinition>,
}

impl RuleLibrary {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
