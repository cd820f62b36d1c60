//! 全局配置管理，存储所有可配置项

use std::path::PathBuf;

use crate::error::{QcError, QcResult};

/// 关键词命中的默认权重系数（相对于规则基础权重）
pub const DEFAULT_KEYWORD_WEIGHT_FACTOR: f64 = 0.5;
/// 无任何证据时的默认置信度
pub const DEFAULT_NO_EVIDENCE_CONFIDENCE: f64 = 0.5;

/// 分类器配置
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    // 自定义规则文件路径（JSON），None 表示使用内置规则表
    pub rule_file: Option<PathBuf>,
    // 关键词命中贡献 = 规则权重 * 该系数
    pub keyword_weight_factor: f64,
    // 总分为 0 时返回的置信度
    pub no_evidence_confidence: f64,
    // 是否输出逐条分类日志
    pub verbose: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rule_file: None,
            keyword_weight_factor: DEFAULT_KEYWORD_WEIGHT_FACTOR,
            no_evidence_confidence: DEFAULT_NO_EVIDENCE_CONFIDENCE,
            verbose: false,
        }
    }
}

impl ClassifierConfig {
    /// 校验数值配置项
    pub fn validate(&self) -> QcResult<()> {
        if !self.keyword_weight_factor.is_finite() || self.keyword_weight_factor < 0.0 {
            return Err(QcError::InvalidConfig(format!(
                "keyword_weight_factor 必须是非负有限数，当前值：{}",
                self.keyword_weight_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.no_evidence_confidence) {
            return Err(QcError::InvalidConfig(format!(
                "no_evidence_confidence 必须位于 [0, 1]，当前值：{}",
                self.no_evidence_confidence
            )));
        }
        Ok(())
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: ClassifierConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }

    pub fn rule_file(mut self, path: PathBuf) -> Self {
        self.config.rule_file = Some(path);
        self
    }

    pub fn keyword_weight_factor(mut self, factor: f64) -> Self {
        self.config.keyword_weight_factor = factor;
        self
    }

    pub fn no_evidence_confidence(mut self, confidence: f64) -> Self {
        self.config.no_evidence_confidence = confidence;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> ClassifierConfig {
        self.config
    }
}
