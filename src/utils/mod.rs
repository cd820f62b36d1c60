//! 工具模块
pub mod text;

pub use self::text::{join_title_content, normalize_question, preview_text};
