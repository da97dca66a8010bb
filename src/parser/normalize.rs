//! 文本规范化
//!
//! 只保留汉字、拉丁字母和数字，用于去重键和搜索关键词清洗。

use once_cell::sync::Lazy;
use regex::Regex;

/// 搜索关键词的最大长度（按字符计）
pub const MAX_QUERY_LENGTH: usize = 100;

static NON_KEY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Han}\p{Latin}0-9]").unwrap_or_else(|e| panic!("{}", e)));

/// 删除所有非汉字、非拉丁字母、非数字的字符
///
/// 幂等：`normalize(&normalize(x)) == normalize(x)`。
pub fn normalize(text: &str) -> String {
    NON_KEY_CHARS.replace_all(text, "").into_owned()
}

/// 按字符（而非字节）截断，最多保留 `max_chars` 个字符
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// 规范化并截断
pub fn normalized_key(text: &str, max_chars: usize) -> String {
    truncate_chars(&normalize(text), max_chars).to_string()
}

/// 删除替换字符 U+FFFD（来自非法字节序列）
pub fn scrub(text: &str) -> String {
    text.chars().filter(|&c| c != char::REPLACEMENT_CHARACTER).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("Hello, World! 你好，世界！"), "HelloWorld你好世界");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!@#$%^&*()"), "");
        assert_eq!(normalize("Test123 测试456"), "Test123测试456");
        assert_eq!(normalize("大型( )全球🚢领先。"), "大型全球领先");
    }

    #[test]
    fn test_truncate_chars_never_splits() {
        assert_eq!(truncate_chars("液化天然气", 2), "液化");
        assert_eq!(truncate_chars("液化", 10), "液化");
        assert_eq!(truncate_chars("abc", 0), "");
        assert_eq!(normalized_key("液 化-天然气", 3), "液化天");
    }

    #[test]
    fn test_scrub_removes_replacement_chars() {
        assert_eq!(scrub("单\u{FFFD}\u{FFFD}选题"), "单选题");
    }
}
