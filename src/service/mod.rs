//! 服务模块：面向问题提交流程的分类服务
pub mod model;
pub mod service;

pub use self::model::{
    QuestionClassificationRecord, QuestionType, QuestionTypeBadge, QuestionTypeDescription,
    TypeValidation,
};
pub use self::service::QuestionClassificationService;
