//! 分类器核心：整合规则分析结果，输出分类与推理轨迹
use tracing::debug;

use super::analyzer::{RuleAnalyzer, RuleEvaluation};
use super::result::{
    CategoryScores, ClassificationAnalysis, ClassificationResult, RuleMatchDetail, NO_MATCH_REASON,
};
use crate::compiler::{CompiledRuleSet, RuleCompiler};
use crate::config::ClassifierConfig;
use crate::error::QcResult;
use crate::rule::RuleLoader;
use crate::utils::{normalize_question, preview_text};

/// 问题分类器
///
/// 规则集构建后不可变，`classify` / `analyze` 只读共享状态，可在多线程间直接共享。
#[derive(Debug, Clone)]
pub struct QuestionClassifier {
    rules: CompiledRuleSet,
    config: ClassifierConfig,
}

impl Default for QuestionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionClassifier {
    /// 使用内置规则表与默认配置创建分类器
    pub fn new() -> Self {
        Self {
            rules: CompiledRuleSet::builtin(),
            config: ClassifierConfig::default(),
        }
    }

    /// 按配置创建分类器（可加载自定义规则文件）
    pub fn with_config(config: ClassifierConfig) -> QcResult<Self> {
        config.validate()?;
        let rules = match config.rule_file {
            Some(_) => {
                let rule_lib = RuleLoader::load(&config)?;
                RuleCompiler::compile(&rule_lib)?
            }
            None => CompiledRuleSet::builtin(),
        };
        Ok(Self { rules, config })
    }

    /// 使用已编译的规则集创建分类器
    pub fn from_rule_set(rules: CompiledRuleSet, config: ClassifierConfig) -> QcResult<Self> {
        config.validate()?;
        Ok(Self { rules, config })
    }

    pub fn rules(&self) -> &CompiledRuleSet {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// 对问题文本分类（任意输入均有结果，不会失败）
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = normalize_question(text);
        let (scores, evaluations) = self.score(&normalized);
        let result = self.build_result(&scores, &evaluations);

        if self.config.verbose {
            debug!(
                "分类完成：文本=\"{}\"，类别={}，置信度={:.3}",
                preview_text(&normalized, 60),
                result.category,
                result.confidence
            );
        }
        result
    }

    /// 诊断分析：分类结果 + 每条规则的命中详情（长度恒等于规则数）
    pub fn analyze(&self, text: &str) -> ClassificationAnalysis {
        let normalized = normalize_question(text);
        let (scores, evaluations) = self.score(&normalized);
        let classification = self.build_result(&scores, &evaluations);

        let rule_matches = evaluations
            .iter()
            .map(|eval| RuleMatchDetail {
                rule_name: eval.rule.name.clone(),
                category: eval.rule.category,
                matched: eval.matched(),
                score: eval.score,
            })
            .collect();

        ClassificationAnalysis {
            classification,
            rule_matches,
        }
    }

    /// 按声明顺序评估全部规则并累计类别得分
    fn score<'a>(&'a self, normalized: &str) -> (CategoryScores, Vec<RuleEvaluation<'a>>) {
        let mut scores = CategoryScores::default();
        let evaluations: Vec<RuleEvaluation<'a>> = self
            .rules
            .rules()
            .iter()
            .map(|rule| RuleAnalyzer::evaluate(rule, normalized, self.config.keyword_weight_factor))
            .collect();

        for eval in evaluations.iter().filter(|eval| eval.matched()) {
            scores.add(eval.rule.category, eval.score);
        }
        (scores, evaluations)
    }

    fn build_result(&self, scores: &CategoryScores, evaluations: &[RuleEvaluation<'_>]) -> ClassificationResult {
        let mut reasoning = Vec::new();
        for eval in evaluations.iter().filter(|eval| eval.matched()) {
            if let Some(pattern) = eval.pattern {
                reasoning.push(format!("Pattern match: \"{}\"", pattern));
            }
            for keyword in &eval.keywords {
                reasoning.push(format!("Keyword match: \"{}\"", keyword));
            }
            reasoning.push(format!("Applied rule: {} ({})", eval.rule.name, eval.rule.category));
        }
        if reasoning.is_empty() {
            reasoning.push(NO_MATCH_REASON.to_string());
        }

        ClassificationResult {
            category: scores.winner(),
            confidence: scores.confidence(self.config.no_evidence_confidence),
            reasoning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::rule::{Category, RuleLoader};

    fn classifier() -> QuestionClassifier {
        QuestionClassifier::new()
    }

    fn custom(json: &str) -> QuestionClassifier {
        let lib = RuleLoader::from_json_str(json).unwrap();
        let set = RuleCompiler::compile(&lib).unwrap();
        QuestionClassifier::from_rule_set(set, ConfigManager::get_default()).unwrap()
    }

    fn mentions(result: &ClassificationResult, needle: &str) -> bool {
        result.reasoning.iter().any(|r| r.contains(needle))
    }

    #[test]
    fn test_empty_input_is_no_evidence_result() {
        let result = classifier().classify("");
        assert_eq!(
            result,
            ClassificationResult {
                category: Category::Objective,
                confidence: 0.5,
                reasoning: vec![NO_MATCH_REASON.to_string()],
            }
        );
        assert_eq!(classifier().classify("   \n\t "), result);
    }

    #[test]
    fn test_text_matching_nothing() {
        let result = classifier().classify("Photosynthesis in leaves");
        assert_eq!(result.category, Category::Objective);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.reasoning, vec![NO_MATCH_REASON.to_string()]);
    }

    #[test]
    fn test_definition_question_full_trace() {
        let result = classifier().classify("What is Coulomb's law constant?");
        assert_eq!(result.category, Category::Objective);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(
            result.reasoning,
            vec![
                r#"Pattern match: "what is\s+\w+""#.to_string(),
                r#"Keyword match: "what is""#.to_string(),
                r#"Keyword match: "constant""#.to_string(),
                "Applied rule: definition_question (objective)".to_string(),
            ]
        );
    }

    #[test]
    fn test_explanation_question() {
        let result = classifier().classify("Explain why NaCl is ionic");
        assert_eq!(result.category, Category::Structured);
        assert!(result.confidence > 0.5);
        assert!(mentions(&result, "Applied rule: explanation_question (structured)"));
    }

    #[test]
    fn test_opinion_question() {
        let result = classifier().classify("What do you think about online learning?");
        assert_eq!(result.category, Category::Opinion);
        assert!(result.confidence > 0.5);
        assert!(mentions(&result, "opinion_question"));
    }

    #[test]
    fn test_process_pattern_outranks_objective_overlap() {
        let result = classifier().classify("How does the digestive system work?");
        assert_eq!(result.category, Category::Structured);
        assert!(mentions(&result, "process_question"));
    }

    #[test]
    fn test_reasoning_order_across_rules() {
        // explanation_question 先于 process_question 声明
        let result = classifier().classify("How does the digestive system work?");
        assert_eq!(
            result.reasoning,
            vec![
                r#"Keyword match: "how""#.to_string(),
                "Applied rule: explanation_question (structured)".to_string(),
                r#"Pattern match: "how does\s+\w+""#.to_string(),
                r#"Keyword match: "how does""#.to_string(),
                "Applied rule: process_question (structured)".to_string(),
            ]
        );
    }

    #[test]
    fn test_pattern_match_beats_keyword_overlap() {
        let result = classifier().classify("What is the process of photosynthesis?");
        assert_eq!(result.category, Category::Objective);
        // objective 1.2，structured 0.35
        assert!((result.confidence - 1.2 / 1.55).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_opinion_and_structured_evidence() {
        let result = classifier().classify("How do you stay motivated to code?");
        assert_eq!(result.category, Category::Opinion);
        // opinion 0.45 + 1.05 = 1.5，structured 0.4
        assert!((result.confidence - 1.5 / 1.9).abs() < 1e-9);
        assert!(mentions(&result, "reflection_question"));
    }

    #[test]
    fn test_high_confidence_for_clear_definition() {
        let result = classifier().classify("What is the definition of gravity?");
        assert_eq!(result.category, Category::Objective);
        assert!(result.confidence > 0.7);
    }

    #[test]
    fn test_specific_rules() {
        let explain = classifier().classify("Explain how computers work");
        assert_eq!(explain.category, Category::Structured);
        assert!(mentions(&explain, "explanation_question"));

        let meaning = classifier().classify("What is the meaning of life?");
        assert_eq!(meaning.category, Category::Objective);
        assert!(mentions(&meaning, "definition_question"));

        let ai = classifier().classify("What do you think about AI?");
        assert_eq!(ai.category, Category::Opinion);
        assert!(mentions(&ai, "opinion_question"));
    }

    #[test]
    fn test_labeled_question_battery() {
        let cases: &[(&str, Category)] = &[
            ("What is Coulomb's law constant?", Category::Objective),
            ("Define ionic bond", Category::Objective),
            ("What does NaCl mean?", Category::Objective),
            ("What are the three states of matter?", Category::Objective),
            ("List the elements in the periodic table", Category::Objective),
            ("Name the capital of France", Category::Objective),
            ("Identify the main components of a cell", Category::Objective),
            ("When did World War II end?", Category::Objective),
            ("Where is the Eiffel Tower located?", Category::Objective),
            ("Who discovered penicillin?", Category::Objective),
            ("How many planets are in our solar system?", Category::Objective),
            ("What year was the Declaration of Independence signed?", Category::Objective),
            ("Explain why NaCl is ionic", Category::Structured),
            ("Explain how photosynthesis works", Category::Structured),
            ("Describe the process of cellular respiration", Category::Structured),
            ("Analyze the causes of climate change", Category::Structured),
            ("Compare and contrast mitosis and meiosis", Category::Structured),
            ("Discuss the impact of technology on society", Category::Structured),
            ("Evaluate the effectiveness of renewable energy", Category::Structured),
            ("How does the digestive system work?", Category::Structured),
            ("What happens when you mix acid and base?", Category::Structured),
            ("What causes earthquakes?", Category::Structured),
            ("What leads to global warming?", Category::Structured),
            ("What results in the formation of clouds?", Category::Structured),
            ("What do you think about online learning?", Category::Opinion),
            ("What is your opinion on climate change?", Category::Opinion),
            ("How do you feel about remote work?", Category::Opinion),
            ("What would you do in this situation?", Category::Opinion),
            ("In your experience, what works best?", Category::Opinion),
            ("What motivates you to study?", Category::Opinion),
            ("How do you stay motivated to code?", Category::Opinion),
            ("What helps you focus during exams?", Category::Opinion),
            ("What strategies do you use for time management?", Category::Opinion),
            ("How do you approach problem-solving?", Category::Opinion),
        ];

        let c = classifier();
        for (question, expected) in cases {
            let result = c.classify(question);
            assert_eq!(result.category, *expected, "{question}: {:?}", result.reasoning);
            assert!(result.confidence > 0.5, "{question}: {}", result.confidence);
        }
    }

    #[test]
    fn test_multiple_families_in_one_question() {
        // objective 1.2（what is 模式 + 关键词），structured 0.4（explain 关键词）
        let result = classifier().classify("Explain what is the meaning of life?");
        assert_eq!(result.category, Category::Objective);
        assert!(result.confidence > 0.5);
        assert!((result.confidence - 1.2 / 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_word_patterns_ignore_non_ascii_letters() {
        // "who\s+\w+" 不命中 "who émile"，只剩 who 关键词 0.35 < explain 关键词 0.4
        let result = classifier().classify("Explain: who Émile Durkheim was");
        assert_eq!(result.category, Category::Structured);
        assert!(!mentions(&result, "Pattern match"));
        assert!(mentions(&result, r#"Keyword match: "who""#));
        assert!((result.confidence - 0.4 / 0.75).abs() < 1e-9);

        let ascii = classifier().classify("Explain: who Emile Durkheim was");
        assert_eq!(ascii.category, Category::Objective);
        assert!(mentions(&ascii, r#"Pattern match: "who\s+\w+""#));
    }

    #[test]
    fn test_three_way_tie_goes_to_objective() {
        let c = custom(
            r#"{"rules":[
                {"name":"a","category":"objective","keywords":["alpha"],"weight":1.0},
                {"name":"b","category":"structured","keywords":["beta"],"weight":1.0},
                {"name":"c","category":"opinion","keywords":["gamma"],"weight":1.0}
            ]}"#,
        );
        let result = c.classify("alpha beta gamma");
        assert_eq!(result.category, Category::Objective);
        assert!((result.confidence - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_way_ties_go_to_objective() {
        let c = custom(
            r#"{"rules":[
                {"name":"a","category":"objective","keywords":["alpha"],"weight":1.0},
                {"name":"b","category":"structured","keywords":["beta"],"weight":1.0},
                {"name":"c","category":"opinion","keywords":["gamma"],"weight":1.0}
            ]}"#,
        );
        assert_eq!(c.classify("alpha beta").category, Category::Objective);
        assert_eq!(c.classify("alpha gamma").category, Category::Objective);
        assert_eq!(c.classify("beta").category, Category::Structured);
    }

    #[test]
    fn test_rules_of_same_category_are_summed() {
        let c = custom(
            r#"{"rules":[
                {"name":"o1","category":"objective","patterns":["^x"],"weight":0.5},
                {"name":"o2","category":"objective","patterns":["y$"],"weight":0.5},
                {"name":"s","category":"structured","patterns":["x"],"weight":0.9}
            ]}"#,
        );
        // objective 0.5 + 0.5 = 1.0 > structured 0.9
        let result = c.classify("x and y");
        assert_eq!(result.category, Category::Objective);
    }

    #[test]
    fn test_input_is_normalized_before_keyword_match() {
        let result = classifier().classify("  EXPLAIN WHY Salt Dissolves  ");
        assert_eq!(result.category, Category::Structured);
        assert!(mentions(&result, r#"Keyword match: "explain""#));
    }

    #[test]
    fn test_confidence_always_in_unit_interval() {
        let inputs = [
            "",
            "Why?",
            "Compare and contrast mitosis and meiosis",
            "Who discovered penicillin?",
            "What helps you focus during exams? Any tips or advice?",
            "how how how why why why what is what is",
        ];
        for input in inputs {
            let result = classifier().classify(input);
            assert!((0.0..=1.0).contains(&result.confidence), "{input}: {}", result.confidence);
            assert!(Category::ALL.contains(&result.category));
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let c = classifier();
        let text = "What strategies do you use for time management?";
        let first = c.classify(text);
        let second = c.classify(text);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_analyze_reports_every_rule() {
        let analysis = classifier().analyze("Explain why NaCl is ionic");
        assert_eq!(analysis.classification.category, Category::Structured);
        assert!(analysis.classification.confidence > 0.5);
        assert_eq!(analysis.rule_matches.len(), 6);

        let matched: Vec<&str> = analysis.matched_rules().map(|m| m.rule_name.as_str()).collect();
        assert_eq!(matched, vec!["explanation_question"]);
        let explanation = &analysis.rule_matches[2];
        assert!((explanation.score - 1.6).abs() < 1e-9);
        assert!(analysis.rule_matches.iter().filter(|m| !m.matched).all(|m| m.score == 0.0));
    }

    #[test]
    fn test_analyze_length_independent_of_input() {
        let c = classifier();
        for input in ["", "What is love?", "random words only"] {
            assert_eq!(c.analyze(input).rule_matches.len(), c.rule_count());
        }
    }

    #[test]
    fn test_analyze_agrees_with_classify() {
        let c = classifier();
        let text = "Describe the process of cellular respiration";
        assert_eq!(c.analyze(text).classification, c.classify(text));
    }

    #[test]
    fn test_keyword_factor_is_configurable() {
        let config = ConfigManager::custom().keyword_weight_factor(0.0).build();
        let c = QuestionClassifier::from_rule_set(CompiledRuleSet::builtin(), config).unwrap();
        let analysis = c.analyze("why");
        // 命中但不得分：仍然记录推理，置信度回落到默认值
        assert!(analysis.rule_matches[2].matched);
        assert_eq!(analysis.rule_matches[2].score, 0.0);
        assert_eq!(analysis.classification.confidence, 0.5);
        assert!(mentions(&analysis.classification, "explanation_question"));
    }

    #[test]
    fn test_with_config_rejects_invalid_config() {
        let config = ConfigManager::custom().no_evidence_confidence(-0.1).build();
        assert!(QuestionClassifier::with_config(config).is_err());
    }

    #[test]
    fn test_empty_rule_set_always_no_evidence() {
        let c = custom(r#"{"rules":[]}"#);
        let analysis = c.analyze("What is anything?");
        assert!(analysis.rule_matches.is_empty());
        assert_eq!(analysis.classification.reasoning, vec![NO_MATCH_REASON.to_string()]);
    }

    #[test]
    fn test_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QuestionClassifier>();

        let c = classifier();
        let expected = c.classify("Analyze the causes of climate change");
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(c.classify("Analyze the causes of climate change"), expected);
                });
            }
        });
    }

    #[test]
    fn test_batch_of_short_questions() {
        let c = classifier();
        let start = std::time::Instant::now();
        for i in 0..100 {
            let result = c.classify(&format!("What is question number {}?", i));
            assert_eq!(result.category, Category::Objective);
            // definition_question 与 factual_question（"number"）同属 objective
            assert_eq!(result.confidence, 1.0);
        }
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
    }
}
