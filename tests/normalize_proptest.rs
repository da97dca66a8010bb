//! 规范化与解析入口的性质测试

use proptest::prelude::*;
use regex::Regex;
use tiku_parser::parser::{normalize, normalized_key, parse_questions};
use tiku_parser::ParseError;

/// 混合汉字、标点、字母与题目标记的文本
fn quiz_like_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("1 【单选题】".to_string()),
            Just("选项：".to_string()),
            Just("A、".to_string()),
            Just("B．".to_string()),
            Just("正确答案：".to_string()),
            Just("我的答案：".to_string()),
            Just("\n".to_string()),
            "[\\p{Han}a-zA-Z0-9，。？！ ()（）]{0,8}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn test_normalize_is_idempotent(text in any::<String>()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalize_keeps_only_key_chars(text in any::<String>()) {
        let allowed = Regex::new(r"^[\p{Han}\p{Latin}0-9]*$").unwrap();
        prop_assert!(allowed.is_match(&normalize(&text)));
    }

    #[test]
    fn test_normalized_key_respects_limit(text in any::<String>(), limit in 0usize..120) {
        prop_assert!(normalized_key(&text, limit).chars().count() <= limit);
    }

    #[test]
    fn test_parse_never_panics(text in quiz_like_text()) {
        match parse_questions(&text) {
            Ok(questions) => {
                prop_assert!(!questions.is_empty());
                for q in &questions {
                    prop_assert!(q.is_complete());
                }
            }
            Err(ParseError::EmptyInput) => prop_assert!(text.is_empty()),
            Err(ParseError::NoQuestionsParsed) => {}
        }
    }
}
