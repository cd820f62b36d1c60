//! 分类结果模型

use serde::{Deserialize, Serialize};

use crate::rule::Category;

/// 无任何规则命中时的唯一推理条目
pub const NO_MATCH_REASON: &str = "No specific patterns or keywords matched";

/// 分类结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub category: Category,
    /// 取值范围 [0, 1]：胜出类别得分 / 三类总分
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

/// 单条规则的命中详情（仅诊断接口输出）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatchDetail {
    pub rule_name: String,
    pub category: Category,
    pub matched: bool,
    pub score: f64,
}

/// 诊断分析结果：分类结果 + 全部规则的命中详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationAnalysis {
    pub classification: ClassificationResult,
    pub rule_matches: Vec<RuleMatchDetail>,
}

impl ClassificationAnalysis {
    /// 仅返回命中的规则
    pub fn matched_rules(&self) -> impl Iterator<Item = &RuleMatchDetail> {
        self.rule_matches.iter().filter(|m| m.matched)
    }
}

/// 三个类别的累计得分
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryScores([f64; 3]);

impl CategoryScores {
    pub fn add(&mut self, category: Category, score: f64) {
        self.0[category.index()] += score;
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0[category.index()]
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// 胜出类别：Structured / Opinion 必须严格大于另外两类，其余情况（含全部平局）归 Objective
    pub fn winner(&self) -> Category {
        let objective = self.get(Category::Objective);
        let structured = self.get(Category::Structured);
        let opinion = self.get(Category::Opinion);

        if structured > objective && structured > opinion {
            Category::Structured
        } else if opinion > objective && opinion > structured {
            Category::Opinion
        } else {
            Category::Objective
        }
    }

    /// 置信度 = 最高分 / 总分（上限 1.0）；总分为 0 时返回 fallback
    pub fn confidence(&self, fallback: f64) -> f64 {
        let total = self.total();
        if total > 0.0 {
            (self.max() / total).min(1.0)
        } else {
            fallback
        }
    }
}
