/// 词法单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    QuestionNumber,
    QuestionType,
    QuestionStem,
    OptionMarker,
    OptionText,
    AnswerMarker,
    AnswerText,
    StatusMarker,
    StatusText,
    ScoreMarker,
    ScoreText,
}

/// 词法单元
///
/// 只在一次解析调用内部产生和消费。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// 源文本中的行号（从 1 开始）
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
        }
    }
}

/// 答案标记的来源，按优先级从低到高声明
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnswerSource {
    /// 泛用的“答案”
    Generic,
    /// “我的答案”
    Mine,
    /// “正确答案”
    Correct,
}
