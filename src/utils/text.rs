//! 文本处理工具
//! 问题文本规范化、标题正文拼接以及日志预览

/// 规范化问题文本：去首尾空白 + 转小写
#[inline]
pub fn normalize_question(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 拼接标题与正文（"标题 正文" 再去首尾空白）
pub fn join_title_content(title: &str, content: &str) -> String {
    format!("{} {}", title, content).trim().to_string()
}

/// 日志预览：折叠空白并截断到 max_chars 个字符
pub fn preview_text(s: &str, max_chars: usize) -> String {
    let mut preview = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if let Some((cut, _)) = preview.char_indices().nth(max_chars) {
        preview.truncate(cut);
        preview.push('…');
    }
    preview
}
