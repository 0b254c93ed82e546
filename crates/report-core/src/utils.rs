//! 通用文本工具函数

use regex::Regex;

/// 按句子边界切分文本
///
/// 只在标点后跟空白或文本结尾处切分，避免把小数（如 SUVmax 2.9）拆开。
/// 过短的碎片（少于 min_len 个字符）被丢弃。
pub fn split_sentences(text: &str, min_len: usize) -> Vec<String> {
    // 该正则不含用户输入，构造失败属于程序错误
    let boundary = Regex::new(r"[.!?](?:\s+|$)").unwrap();
    boundary
        .split(text)
        .map(|s| s.trim())
        .filter(|s| s.len() >= min_len)
        .map(|s| s.to_string())
        .collect()
}

/// 首字母大写
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// 确保句子以终止标点结尾
pub fn ensure_sentence(text: &str) -> String {
    let trimmed = text.trim().trim_end_matches(',').trim_end();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.ends_with('.') || trimmed.ends_with('!') || trimmed.ends_with('?') {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First sentence. Second one! Third?", 5);
        assert_eq!(sentences, vec!["First sentence", "Second one", "Third"]);
    }

    #[test]
    fn test_split_keeps_decimals() {
        let sentences = split_sentences("Nodule with SUVmax 2.9 in the lobe. No nodes.", 5);
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("2.9"));
    }

    #[test]
    fn test_split_discards_fragments() {
        let sentences = split_sentences("Ok. A real sentence here.", 5);
        assert_eq!(sentences, vec!["A real sentence here"]);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("no abnormal activity"), "No abnormal activity");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_ensure_sentence() {
        assert_eq!(ensure_sentence("stable disease"), "stable disease.");
        assert_eq!(ensure_sentence("stable disease."), "stable disease.");
        assert_eq!(ensure_sentence("7 mm nodule,"), "7 mm nodule.");
    }
}
