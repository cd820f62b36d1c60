//! 规则分析器：对单条规则计算命中情况与得分
use crate::compiler::CompiledRule;

/// 单条规则对某段文本的评估结果
#[derive(Debug, Clone)]
pub struct RuleEvaluation<'a> {
    pub rule: &'a CompiledRule,
    /// 首个命中的正则模式原文
    pub pattern: Option<&'a str>,
    /// 全部命中的关键词（声明顺序）
    pub keywords: Vec<&'a str>,
    pub score: f64,
}

impl RuleEvaluation<'_> {
    pub fn matched(&self) -> bool {
        self.pattern.is_some() || !self.keywords.is_empty()
    }
}

/// 规则分析器
pub struct RuleAnalyzer;

impl RuleAnalyzer {
    /// 评估单条规则；`normalized` 必须已去空白并转小写
    pub fn evaluate<'a>(
        rule: &'a CompiledRule,
        normalized: &str,
        keyword_factor: f64,
    ) -> RuleEvaluation<'a> {
        let mut score = 0.0;

        // 正则模式：首个命中即停止
        let pattern = rule
            .patterns
            .iter()
            .find(|pattern| pattern.is_match(normalized))
            .map(|pattern| pattern.source());
        if pattern.is_some() {
            score += rule.weight;
        }

        // 关键词：全部参与计分
        let mut keywords = Vec::new();
        for keyword in &rule.keywords {
            if normalized.contains(keyword.as_str()) {
                score += rule.weight * keyword_factor;
                keywords.push(keyword.as_str());
            }
        }

        RuleEvaluation {
            rule,
            pattern,
            keywords,
            score,
        }
    }
}
