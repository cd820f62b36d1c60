//! 编译后模式模型
//! 正则编译后的结构，构建完成后只读

use std::sync::Arc;
use regex::Regex;

use crate::rule::Category;

/// 编译后的正则模式（忽略大小写，\w / \d 为 ASCII 语义）
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    /// 声明时的原始模式文本
    pub source: String,
}

impl CompiledPattern {
    /// 声明时的原始模式文本（推理轨迹中展示，不含 ASCII 改写）
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// 编译后的单条规则
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub category: Category,
    pub patterns: Vec<CompiledPattern>,
    /// 已转小写
    pub keywords: Vec<String>,
    pub weight: f64,
}

/// 编译后的规则集（有序、不可变、可跨线程共享）
#[derive(Debug, Clone)]
pub struct CompiledRuleSet {
    rules: Arc<[CompiledRule]>,
}

impl CompiledRuleSet {
    pub(crate) fn new(rules: Vec<CompiledRule>) -> Self {
        Self { rules: rules.into() }
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
