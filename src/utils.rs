// src/utils.rs

/// 按显示宽度截断文本 (非 ASCII 字符按 2 列计算)，超出部分以 "..." 结尾
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum();
    if total <= max_width {
        return text.to_string();
    }
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    format!("{}...", &text[..end_pos])
}
