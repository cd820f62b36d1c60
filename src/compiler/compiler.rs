//! 规则编译器核心
//! 仅负责将原始规则编译为可执行的正则模式

use std::time::Instant;
use once_cell::sync::Lazy;
use regex::RegexBuilder;
use tracing::debug;

use super::pattern::{CompiledPattern, CompiledRule, CompiledRuleSet};
use crate::error::QcResult;
use crate::rule::{builtin_rules, RuleDefinition, RuleLibrary};

/// 内置规则表的编译结果（进程内只编译一次）
static BUILTIN_RULE_SET: Lazy<CompiledRuleSet> = Lazy::new(|| {
    RuleCompiler::compile(&builtin_rules()).expect("内置规则表必须可编译")
});

impl CompiledRuleSet {
    /// 获取内置规则集（共享同一份编译结果）
    pub fn builtin() -> CompiledRuleSet {
        BUILTIN_RULE_SET.clone()
    }
}

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则库，保持声明顺序
    pub fn compile(rule_lib: &RuleLibrary) -> QcResult<CompiledRuleSet> {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        let rules = rule_lib
            .rules
            .iter()
            .map(|rule| Self::compile_rule(rule, &mut stats))
            .collect::<QcResult<Vec<_>>>()?;

        debug!("✅ 规则编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "📊 编译统计：规则{}条、正则模式{}条、关键词{}个",
            rules.len(),
            stats.pattern_count,
            stats.keyword_count
        );

        Ok(CompiledRuleSet::new(rules))
    }

    /// 编译单条规则
    fn compile_rule(rule: &RuleDefinition, stats: &mut CompileStats) -> QcResult<CompiledRule> {
        let patterns = rule
            .patterns
            .iter()
            .map(|raw| Self::compile_single_pattern(raw))
            .collect::<QcResult<Vec<_>>>()?;
        let keywords: Vec<String> = rule.keywords.iter().map(|k| k.to_lowercase()).collect();

        stats.pattern_count += patterns.len();
        stats.keyword_count += keywords.len();

        Ok(CompiledRule {
            name: rule.name.clone(),
            category: rule.category,
            patterns,
            keywords,
            weight: rule.weight,
        })
    }

    /// 编译单个正则模式（忽略大小写，保留原始文本）
    fn compile_single_pattern(raw_pattern: &str) -> QcResult<CompiledPattern> {
        let ascii_pattern = Self::to_ascii_classes(raw_pattern);
        let regex = RegexBuilder::new(&ascii_pattern).case_insensitive(true).build()?;
        Ok(CompiledPattern {
            regex,
            source: raw_pattern.to_string(),
        })
    }

    /// 将 \w \W \d \D 改写为 ASCII 字符类（\s 仍保持 Unicode 空白语义）
    pub(crate) fn to_ascii_classes(s: &str) -> String {
        let mut result = String::with_capacity(s.len() + 16);
        let mut chars = s.chars();
        let mut in_charset = false;

        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    let Some(next_c) = chars.next() else {
                        result.push(c);
                        break;
                    };
                    let replacement = match (next_c, in_charset) {
                        ('w', false) => Some(r"(?-u:\w)"),
                        ('W', false) => Some(r"(?-i:[^0-9A-Za-z_])"),
                        ('d', false) => Some(r"(?-u:\d)"),
                        ('D', false) => Some(r"[^0-9]"),
                        ('w', true) => Some("[:word:]"),
                        ('W', true) => Some("[:^word:]"),
                        ('d', true) => Some("[:digit:]"),
                        ('D', true) => Some("[:^digit:]"),
                        _ => None,
                    };
                    match replacement {
                        Some(ascii) => result.push_str(ascii),
                        None => {
                            result.push(c);
                            result.push(next_c);
                        }
                    }
                }
                '[' if !in_charset => {
                    in_charset = true;
                    result.push(c);
                }
                ']' if in_charset => {
                    in_charset = false;
                    result.push(c);
                }
                _ => result.push(c),
            }
        }

        result
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    pattern_count: usize,
    keyword_count: usize,
}
