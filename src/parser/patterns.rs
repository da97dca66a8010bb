//! 解析用的标记与正则表的集合
//!
//! `Patterns` 在构造后不可变，按引用传入词法分析器、选项策略和整块回退解析。
//! 进程内共享的一份通过 [`Patterns::shared`] 获取，只读，可跨线程使用。

use crate::parser::token::AnswerSource;
use once_cell::sync::Lazy;
use regex::Regex;

static SHARED: Lazy<Patterns> = Lazy::new(Patterns::new);

/// 标记与正则表
#[derive(Debug, Clone)]
pub struct Patterns {
    /// 题型左括号
    pub type_open: char,
    /// 题型右括号
    pub type_close: char,
    /// 选项区标题（行首）
    pub options_headers: Vec<&'static str>,
    /// 答案标记，按优先级从高到低
    pub answer_markers: Vec<(&'static str, AnswerSource)>,
    /// 答题状态标记（行首），整行丢弃
    pub status_markers: Vec<&'static str>,
    /// 得分标记（行首），整行丢弃
    pub score_markers: Vec<&'static str>,
    /// 需要从题干中删除的残留片段
    pub stem_fillers: Vec<&'static str>,
    /// 题干结束位置的候选标记（整块解析使用）
    pub stem_terminators: Vec<&'static str>,
    /// 选项字母后的分隔符：`、` 与全角句点 `．`
    pub option_separators: Vec<char>,
    /// 行首选项标记，如 `A、` / `B．`
    pub line_option: Regex,
    /// 答案 / 状态 / 得分行的行首
    pub block_end: Regex,
    /// 各来源的答案行，与 `answer_markers` 顺序一致
    pub answer_lines: Vec<(AnswerSource, Regex)>,
}

impl Patterns {
    /// 编译整张表
    pub fn new() -> Self {
        Self {
            type_open: '【',
            type_close: '】',
            options_headers: vec!["选项：", "选项:"],
            answer_markers: vec![
                ("正确答案", AnswerSource::Correct),
                ("我的答案", AnswerSource::Mine),
                ("答案", AnswerSource::Generic),
            ],
            status_markers: vec!["答案状态"],
            score_markers: vec!["得分"],
            stem_fillers: vec!["选项：", "( )", "（ ）"],
            stem_terminators: vec!["选项：", "选项:", "A、", "我的答案", "正确答案"],
            option_separators: vec!['、', '．'],
            line_option: compile(r"(?m)^[ \t]*([A-Z])[、．]"),
            block_end: compile(r"(?m)^[ \t]*(?:正确答案|我的答案|答案|得分)"),
            answer_lines: vec![
                (
                    AnswerSource::Correct,
                    compile(r"(?m)^[ \t]*正确答案[^：:\n]*[：:][ \t]*(.*)$"),
                ),
                (
                    AnswerSource::Mine,
                    compile(r"(?m)^[ \t]*我的答案[^：:\n]*[：:][ \t]*(.*)$"),
                ),
                (
                    AnswerSource::Generic,
                    compile(r"(?m)^[ \t]*答案[ \t]*[：:][ \t]*(.*)$"),
                ),
            ],
        }
    }

    /// 进程内共享的只读实例
    pub fn shared() -> &'static Patterns {
        &SHARED
    }

    /// 是否是题型标题行（同时含有左右括号）
    pub fn is_header(&self, line: &str) -> bool {
        line.contains(self.type_open) && line.contains(self.type_close)
    }

    /// 若以选项区标题开头，返回标题之后的文本
    pub fn strip_options_header<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.options_headers
            .iter()
            .find_map(|header| line.strip_prefix(header))
    }

    /// 答案行的来源；状态行（如“答案状态”）不算答案行
    pub fn answer_source(&self, line: &str) -> Option<AnswerSource> {
        if self.is_status(line) {
            return None;
        }
        self.answer_markers
            .iter()
            .find(|(marker, _)| line.starts_with(marker))
            .map(|(_, source)| *source)
    }

    pub fn is_status(&self, line: &str) -> bool {
        self.status_markers.iter().any(|m| line.starts_with(m))
    }

    pub fn is_score(&self, line: &str) -> bool {
        self.score_markers.iter().any(|m| line.starts_with(m))
    }

    /// 字符是否是选项分隔符
    pub fn is_option_separator(&self, c: char) -> bool {
        self.option_separators.contains(&c)
    }

    /// 删除题干残留片段并去除首尾空白
    pub fn strip_fillers(&self, stem: &str) -> String {
        let mut cleaned = stem.to_string();
        for filler in &self.stem_fillers {
            cleaned = cleaned.replace(filler, "");
        }
        cleaned.trim().to_string()
    }

    /// 题型括号之间的内容，以及右括号之后的字节偏移
    ///
    /// 右括号只在左括号之后查找。
    pub fn bracketed_type<'a>(&self, text: &'a str) -> Option<(&'a str, usize)> {
        let open = text.find(self.type_open)?;
        let inner_start = open + self.type_open.len_utf8();
        let close = text[inner_start..].find(self.type_close)? + inner_start;
        Some((&text[inner_start..close], close + self.type_close.len_utf8()))
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

// 表中的正则都是字面量，编译失败属于编码错误
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("无效的内置正则 {}: {}", pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_is_not_an_answer() {
        let p = Patterns::new();
        assert_eq!(p.answer_source("答案状态：正确"), None);
        assert_eq!(p.answer_source("正确答案：A"), Some(AnswerSource::Correct));
        assert_eq!(p.answer_source("我的答案：对"), Some(AnswerSource::Mine));
        assert_eq!(p.answer_source("答案：B"), Some(AnswerSource::Generic));
        assert!(p.is_status("答案状态：正确"));
        assert!(p.is_score("得分：2.0分"));
    }

    #[test]
    fn test_bracketed_type() {
        let p = Patterns::new();
        let line = "1 【单选题】 题干";
        let (ty, end) = p.bracketed_type(line).unwrap();
        assert_eq!(ty, "单选题");
        assert_eq!(line[end..].trim(), "题干");
        assert!(p.bracketed_type("】反了【").is_none());
    }

    #[test]
    fn test_strip_fillers() {
        let p = Patterns::new();
        assert_eq!(p.strip_fillers("加上大型( )全球领先（ ） "), "加上大型全球领先");
        assert_eq!(p.strip_options_header("选项：A、甲"), Some("A、甲"));
        assert_eq!(p.strip_options_header("A、甲"), None);
    }
}
