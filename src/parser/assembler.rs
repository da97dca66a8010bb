//! 题目组装：把词法单元序列折叠成题目记录

use crate::error::ParseError;
use crate::models::question::{Question, JUDGE_FALSE, JUDGE_TRUE};
use crate::parser::patterns::Patterns;
use crate::parser::token::{AnswerSource, Token, TokenKind};
use tracing::debug;

/// 把答案文本解析为答案列表
///
/// - 恰好是“对”/“错”时原样返回
/// - 否则每个大写字母按字母表位置映射到选项文本；越界时保留字母本身
pub fn resolve_answer(text: &str, options: &[String]) -> Vec<String> {
    let text = text.trim();
    if text == JUDGE_TRUE || text == JUDGE_FALSE {
        return vec![text.to_string()];
    }
    text.chars()
        .filter(char::is_ascii_uppercase)
        .map(|letter| {
            let idx = (letter as u8 - b'A') as usize;
            options
                .get(idx)
                .cloned()
                .unwrap_or_else(|| letter.to_string())
        })
        .collect()
}

/// 题目组装器
///
/// 每次解析使用独立实例。
pub struct Assembler<'p> {
    patterns: &'p Patterns,
    questions: Vec<Question>,
    current: Question,
    /// 当前题目答案的来源
    answer_source: Option<AnswerSource>,
    skipped: usize,
}

impl<'p> Assembler<'p> {
    pub fn new(patterns: &'p Patterns) -> Self {
        Self {
            patterns,
            questions: Vec::new(),
            current: Question::default(),
            answer_source: None,
            skipped: 0,
        }
    }

    /// 组装全部词法单元
    pub fn assemble(mut self, tokens: &[Token]) -> Result<Vec<Question>, ParseError> {
        let mut iter = tokens.iter().peekable();

        while let Some(token) = iter.next() {
            match token.kind {
                TokenKind::QuestionNumber => self.finalize(),
                TokenKind::QuestionType => {
                    self.current.question_type = token.value.trim().to_string();
                }
                TokenKind::QuestionStem => self.append_stem(&token.value),
                TokenKind::OptionMarker => {
                    if let Some(text) = iter.next_if(|t| t.kind == TokenKind::OptionText) {
                        self.current.options.push(text.value.trim().to_string());
                    }
                }
                TokenKind::AnswerMarker => {
                    if let Some(text) = iter.next_if(|t| t.kind == TokenKind::AnswerText) {
                        self.apply_answer(&token.value, &text.value);
                    }
                }
                TokenKind::OptionText
                | TokenKind::AnswerText
                | TokenKind::StatusMarker
                | TokenKind::StatusText
                | TokenKind::ScoreMarker
                | TokenKind::ScoreText => {}
            }
        }
        self.finalize();

        if self.skipped > 0 {
            debug!("跳过 {} 个不完整的题目块", self.skipped);
        }
        if self.questions.is_empty() {
            return Err(ParseError::NoQuestionsParsed);
        }
        Ok(self.questions)
    }

    /// 结束当前题目：题型与题干都非空才保留，然后开始新题目
    fn finalize(&mut self) {
        let question = std::mem::take(&mut self.current);
        self.answer_source = None;

        if question.question_type.is_empty() {
            return;
        }
        if question.is_complete() {
            self.questions.push(question);
        } else {
            debug!("题干为空，跳过题目: [{}]", question.question_type);
            self.skipped += 1;
        }
    }

    /// 合并题干片段，已包含的片段不重复追加
    fn append_stem(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        let stem = &mut self.current.text;
        if stem.is_empty() {
            stem.push_str(fragment);
        } else if !stem.contains(fragment) {
            stem.push(' ');
            stem.push_str(fragment);
        }
        self.current.text = self.patterns.strip_fillers(&self.current.text);
    }

    /// 应用答案：高优先级来源覆盖低优先级，同级字母答案追加
    fn apply_answer(&mut self, marker: &str, text: &str) {
        let source = self
            .patterns
            .answer_source(marker)
            .unwrap_or(AnswerSource::Generic);
        let resolved = resolve_answer(text, &self.current.options);
        if resolved.is_empty() {
            debug!("答案中没有可识别的内容: {}：{}", marker, text);
            return;
        }

        match self.answer_source {
            Some(previous) if source < previous => {
                debug!("忽略低优先级答案: {}：{}", marker, text);
            }
            Some(previous) if source == previous && !is_judgment_literal(text) => {
                self.current.answer.extend(resolved);
            }
            _ => {
                self.current.answer = resolved;
                self.answer_source = Some(source);
            }
        }
    }
}

fn is_judgment_literal(text: &str) -> bool {
    let text = text.trim();
    text == JUDGE_TRUE || text == JUDGE_FALSE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, value: &str) -> Token {
        Token::new(kind, value, 1)
    }

    fn header(ty: &str) -> Vec<Token> {
        vec![tok(TokenKind::QuestionNumber, "1"), tok(TokenKind::QuestionType, ty)]
    }

    fn assemble(tokens: &[Token]) -> Result<Vec<Question>, ParseError> {
        Assembler::new(&Patterns::new()).assemble(tokens)
    }

    fn options(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_answer() {
        let opts = options(&["甲", "乙", "丙", "丁"]);
        assert_eq!(resolve_answer("对", &opts), vec!["对"]);
        assert_eq!(resolve_answer("AC", &opts), vec!["甲", "丙"]);
        assert_eq!(resolve_answer("E", &opts), vec!["E"]);
        assert_eq!(resolve_answer("正确", &opts), Vec::<String>::new());
    }

    #[test]
    fn test_stem_dedup_and_fillers() {
        let mut tokens = header("单选题");
        tokens.push(tok(TokenKind::QuestionStem, "大型( )全球领先"));
        tokens.push(tok(TokenKind::QuestionStem, "全球领先"));
        tokens.push(tok(TokenKind::QuestionStem, "补充说明（ ）"));
        let questions = assemble(&tokens).unwrap();
        assert_eq!(questions[0].text, "大型全球领先 补充说明");
    }

    #[test]
    fn test_adjacent_headers_do_not_create_empty_records() {
        let mut tokens = vec![tok(TokenKind::QuestionNumber, "1")];
        tokens.extend(header("判断题"));
        tokens.push(tok(TokenKind::QuestionStem, "题干"));
        let questions = assemble(&tokens).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_type, "判断题");
    }

    #[test]
    fn test_empty_stem_is_dropped() {
        let mut tokens = header("单选题");
        tokens.extend(header("判断题"));
        tokens.push(tok(TokenKind::QuestionStem, "题干"));
        let questions = assemble(&tokens).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_type, "判断题");

        assert_eq!(assemble(&header("单选题")), Err(ParseError::NoQuestionsParsed));
    }

    #[test]
    fn test_correct_answer_outranks_my_answer() {
        let mut tokens = header("单选题");
        tokens.push(tok(TokenKind::QuestionStem, "题干"));
        for (marker, text) in [("A", "甲"), ("B", "乙")] {
            tokens.push(tok(TokenKind::OptionMarker, marker));
            tokens.push(tok(TokenKind::OptionText, text));
        }
        tokens.push(tok(TokenKind::AnswerMarker, "正确答案"));
        tokens.push(tok(TokenKind::AnswerText, "B"));
        tokens.push(tok(TokenKind::AnswerMarker, "我的答案"));
        tokens.push(tok(TokenKind::AnswerText, "A"));
        let questions = assemble(&tokens).unwrap();
        assert_eq!(questions[0].answer, vec!["乙"]);
    }

    /// 三个选项（甲、乙、丙）的题目，依次应用各答案行
    fn answer_after(lines: &[(&str, &str)]) -> Vec<String> {
        let mut tokens = header("单选题");
        tokens.push(tok(TokenKind::QuestionStem, "题干"));
        for (marker, text) in [("A", "甲"), ("B", "乙"), ("C", "丙")] {
            tokens.push(tok(TokenKind::OptionMarker, marker));
            tokens.push(tok(TokenKind::OptionText, text));
        }
        for (marker, text) in lines {
            tokens.push(tok(TokenKind::AnswerMarker, marker));
            tokens.push(tok(TokenKind::AnswerText, text));
        }
        let questions = assemble(&tokens).unwrap();
        questions[0].answer.clone()
    }

    #[test]
    fn test_higher_source_replaces_lower() {
        assert_eq!(answer_after(&[("我的答案", "A"), ("正确答案", "B")]), vec!["乙"]);
        assert_eq!(answer_after(&[("答案", "C"), ("我的答案", "A")]), vec!["甲"]);
    }

    #[test]
    fn test_lower_source_is_ignored() {
        assert_eq!(answer_after(&[("正确答案", "A"), ("答案", "C")]), vec!["甲"]);
    }

    #[test]
    fn test_equal_source_appends() {
        assert_eq!(
            answer_after(&[("我的答案", "A"), ("我的答案", "C")]),
            vec!["甲", "丙"]
        );
    }

    #[test]
    fn test_equal_source_judgment_replaces() {
        assert_eq!(answer_after(&[("我的答案", "对"), ("我的答案", "错")]), vec!["错"]);
    }

    #[test]
    fn test_unresolvable_answer_is_ignored() {
        assert!(answer_after(&[("我的答案", "正确")]).is_empty());
        assert_eq!(answer_after(&[("正确答案", "B"), ("正确答案", "无")]), vec!["乙"]);
    }

    #[test]
    fn test_status_and_orphan_tokens_are_ignored() {
        let mut tokens = header("判断题");
        tokens.push(tok(TokenKind::QuestionStem, "题干"));
        tokens.push(tok(TokenKind::StatusMarker, "答案状态"));
        tokens.push(tok(TokenKind::StatusText, "正确"));
        tokens.push(tok(TokenKind::OptionText, "孤立选项"));
        tokens.push(tok(TokenKind::AnswerMarker, "我的答案"));
        tokens.push(tok(TokenKind::AnswerText, "错"));
        let questions = assemble(&tokens).unwrap();
        assert!(questions[0].options.is_empty());
        assert_eq!(questions[0].answer, vec!["错"]);
    }
}
