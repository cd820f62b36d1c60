//! 规则加载管理器
//! 负责从内置规则表或本地 JSON 文件加载规则库，并做结构校验

use std::path::Path;
use tracing::{debug, warn};

use super::builtin::builtin_rules;
use super::model::RuleLibrary;
use crate::config::ClassifierConfig;
use crate::error::{QcError, QcResult};

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 加载规则库（配置了规则文件则读文件，否则使用内置规则表）
    /// 每条加载路径只校验一次：文件经 `from_json_str` 校验，内置表在此校验
    pub fn load(config: &ClassifierConfig) -> QcResult<RuleLibrary> {
        let rule_lib = match &config.rule_file {
            Some(path) => Self::from_file(path)?,
            None => {
                debug!("未配置规则文件，使用内置规则表");
                let rule_lib = builtin_rules();
                Self::validate(&rule_lib)?;
                rule_lib
            }
        };

        if rule_lib.is_empty() {
            warn!("规则库为空，所有问题都将返回无证据的默认结果");
        }
        Ok(rule_lib)
    }

    /// 从本地 JSON 文件加载
    pub fn from_file(path: &Path) -> QcResult<RuleLibrary> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QcError::RuleLoadError(format!("读取规则文件 {} 失败：{}", path.display(), e))
        })?;
        let rule_lib = Self::from_json_str(&raw)?;
        debug!("从 {} 加载规则库成功，规则数：{}", path.display(), rule_lib.len());
        Ok(rule_lib)
    }

    /// 从 JSON 字符串解析规则库（格式：{"rules": [...]}）
    pub fn from_json_str(raw: &str) -> QcResult<RuleLibrary> {
        let rule_lib: RuleLibrary = serde_json::from_str(raw)?;
        Self::validate(&rule_lib)?;
        Ok(rule_lib)
    }

    /// 序列化为格式化 JSON（用于导出当前规则表）
    pub fn to_json_pretty(rule_lib: &RuleLibrary) -> QcResult<String> {
        Ok(serde_json::to_string_pretty(rule_lib)?)
    }

    /// 结构校验：名称非空、权重为正、模式/关键词非空
    pub fn validate(rule_lib: &RuleLibrary) -> QcResult<()> {
        for (idx, rule) in rule_lib.rules.iter().enumerate() {
            if rule.name.trim().is_empty() {
                return Err(QcError::RuleParseError(format!("第{}条规则缺少名称", idx + 1)));
            }
            if !rule.weight.is_finite() || rule.weight <= 0.0 {
                return Err(QcError::RuleParseError(format!(
                    "规则 [{}] 权重必须为正数，当前值：{}",
                    rule.name, rule.weight
                )));
            }
            if rule.patterns.iter().any(|p| p.is_empty()) {
                return Err(QcError::RuleParseError(format!("规则 [{}] 含空正则模式", rule.name)));
            }
            // 空关键词会命中任意文本
            if rule.keywords.iter().any(|k| k.is_empty()) {
                return Err(QcError::RuleParseError(format!("规则 [{}] 含空关键词", rule.name)));
            }
        }
        Ok(())
    }
}
