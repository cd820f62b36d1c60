//! 全局分类器单例管理
use once_cell::sync::OnceCell;
use tracing::debug;

use super::classifier::QuestionClassifier;
use super::result::{ClassificationAnalysis, ClassificationResult};
use crate::config::{ClassifierConfig, ConfigManager};
use crate::error::{QcError, QcResult};

/// 全局分类器实例
static GLOBAL_CLASSIFIER: OnceCell<QuestionClassifier> = OnceCell::new();

/// 初始化全局分类器（默认配置）
pub fn init_classifier() -> QcResult<()> {
    init_classifier_with_config(ConfigManager::get_default())
}

/// 带自定义配置初始化全局分类器；已初始化时直接返回
pub fn init_classifier_with_config(config: ClassifierConfig) -> QcResult<()> {
    if GLOBAL_CLASSIFIER.get().is_some() {
        return Ok(());
    }

    let classifier = QuestionClassifier::with_config(config)?;
    if GLOBAL_CLASSIFIER.set(classifier).is_err() {
        debug!("全局分类器已被并发初始化，忽略本次结果");
    }
    Ok(())
}

/// 获取全局分类器
pub(crate) fn get_global_classifier() -> QcResult<&'static QuestionClassifier> {
    GLOBAL_CLASSIFIER.get().ok_or(QcError::ClassifierNotInitialized)
}

/// 使用全局分类器分类
pub fn classify_question_text(text: &str) -> QcResult<ClassificationResult> {
    Ok(get_global_classifier()?.classify(text))
}

/// 使用全局分类器做诊断分析
pub fn analyze_question_text(text: &str) -> QcResult<ClassificationAnalysis> {
    Ok(get_global_classifier()?.analyze(text))
}
