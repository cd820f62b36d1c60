//! 内置参考规则表
//! 每个类别两条规则；声明顺序决定推理轨迹顺序

use super::model::{Category, RuleDefinition, RuleLibrary};

/// 构建内置规则库
pub fn builtin_rules() -> RuleLibrary {
    RuleLibrary {
        rules: vec![
            // 客观题
            RuleDefinition::new(
                "definition_question",
                Category::Objective,
                &[
                    r"what is\s+\w+",
                    r"define\s+\w+",
                    r"what does\s+\w+\s+mean",
                    r"what are\s+\w+",
                    r"list\s+\w+",
                    r"name\s+\w+",
                    r"identify\s+\w+",
                ],
                &["what is", "define", "definition", "list", "name", "identify", "constant", "value", "formula"],
                0.8,
            ),
            RuleDefinition::new(
                "factual_question",
                Category::Objective,
                &[
                    r"when\s+did\s+\w+",
                    r"where\s+is\s+\w+",
                    r"who\s+\w+",
                    r"how many\s+\w+",
                    r"what year\s+\w+",
                    r"what date\s+\w+",
                ],
                &["when", "where", "who", "how many", "year", "date", "number", "amount"],
                0.7,
            ),
            // 结构化题
            RuleDefinition::new(
                "explanation_question",
                Category::Structured,
                &[
                    r"explain\s+why\s+\w+",
                    r"explain\s+how\s+\w+",
                    r"describe\s+\w+",
                    r"analyze\s+\w+",
                    r"compare\s+\w+",
                    r"contrast\s+\w+",
                    r"discuss\s+\w+",
                    r"evaluate\s+\w+",
                ],
                &["explain", "describe", "analyze", "compare", "contrast", "discuss", "evaluate", "why", "how"],
                0.8,
            ),
            RuleDefinition::new(
                "process_question",
                Category::Structured,
                &[
                    r"how does\s+\w+",
                    r"what happens when\s+\w+",
                    r"what causes\s+\w+",
                    r"what leads to\s+\w+",
                    r"what results in\s+\w+",
                ],
                &["how does", "process", "happens", "causes", "leads to", "results in", "mechanism"],
                0.7,
            ),
            // 观点题
            RuleDefinition::new(
                "opinion_question",
                Category::Opinion,
                &[
                    r"what do you think\s+\w+",
                    r"what is your opinion\s+\w+",
                    r"how do you feel\s+\w+",
                    r"what would you do\s+\w+",
                    r"in your experience\s+\w+",
                    r"what motivates you\s+\w+",
                ],
                &["think", "opinion", "feel", "experience", "motivate", "prefer", "believe", "personal", "your opinion"],
                0.9,
            ),
            RuleDefinition::new(
                "reflection_question",
                Category::Opinion,
                &[
                    r"how do you stay\s+\w+",
                    r"what helps you\s+\w+",
                    r"what strategies do you use\s+\w+",
                    r"how do you approach\s+\w+",
                ],
                &["stay", "helps", "strategies", "approach", "tips", "advice", "personal"],
                0.7,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_shape() {
        let lib = builtin_rules();
        let names: Vec<&str> = lib.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "definition_question",
                "factual_question",
                "explanation_question",
                "process_question",
                "opinion_question",
                "reflection_question"
            ]
        );

        for category in Category::ALL {
            assert_eq!(lib.rules.iter().filter(|r| r.category == category).count(), 2);
        }
        assert!(lib.rules.iter().all(|r| r.weight > 0.0));
    }
}
