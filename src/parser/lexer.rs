//! 词法分析：按行扫描文本，产生扁平的词法单元序列
//!
//! 扫描过程是一个显式的状态机，状态只有四个：
//!
//! ```text
//! Scanning ──文本行──▶ InStem ──选项标题──▶ InOptions
//!    ▲                   │                     │
//!    └──── 题型标题 ◀────┴──── 答案行 ──▶ AfterAnswer
//! ```
//!
//! `InStem` 自身携带待输出的题干缓冲。每一步由 [`Lexer::step`] 计算：
//! 输入当前状态和一行文本，输出下一个状态和本行产生的词法单元。

use crate::parser::normalize::scrub;
use crate::parser::options::{self, OptionSet, OptionStrategy, LINE_STRATEGIES};
use crate::parser::patterns::Patterns;
use crate::parser::token::{Token, TokenKind};
use tracing::debug;

/// 扫描状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexState {
    /// 初始状态，或题型标题之后
    Scanning,
    /// 正在累积题干
    InStem {
        buffer: String,
        /// 题干开始的行号
        line: usize,
    },
    /// 处于“选项：”之后的选项区
    InOptions,
    /// 刚处理完答案行
    AfterAnswer,
}

/// 行的静态分类（与状态无关）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// 含题型括号的标题行
    Header,
    /// 选项区标题，携带同一行中标题之后的文本
    OptionsHeader { rest: &'a str },
    /// 答案行
    Answer,
    /// 答题状态行
    Status,
    /// 得分行
    Score,
    /// 其余文本
    Text,
}

/// 对去除首尾空白的非空行分类
pub fn classify<'a>(line: &'a str, patterns: &Patterns) -> LineKind<'a> {
    if patterns.is_header(line) {
        LineKind::Header
    } else if let Some(rest) = patterns.strip_options_header(line) {
        LineKind::OptionsHeader { rest: rest.trim() }
    } else if patterns.answer_source(line).is_some() {
        LineKind::Answer
    } else if patterns.is_status(line) {
        LineKind::Status
    } else if patterns.is_score(line) {
        LineKind::Score
    } else {
        LineKind::Text
    }
}

/// 词法分析器
///
/// 只持有模式表的引用，不保存任何跨调用的状态。
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'p> {
    patterns: &'p Patterns,
}

impl<'p> Lexer<'p> {
    pub fn new(patterns: &'p Patterns) -> Self {
        Self { patterns }
    }

    /// 扫描整段文本
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut state = LexState::Scanning;
        let mut tokens = Vec::new();
        let mut line_count = 0;

        for (idx, raw) in text.lines().enumerate() {
            line_count = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (next, emitted) = self.step(state, line, line_count);
            tokens.extend(emitted);
            state = next;
        }

        tokens.extend(self.finish(state, line_count));
        debug!("词法分析完成: {} 行, {} 个词法单元", line_count, tokens.len());
        tokens
    }

    /// 状态转移：处理一行（已去除首尾空白且非空）
    pub fn step(&self, state: LexState, line: &str, line_no: usize) -> (LexState, Vec<Token>) {
        let kind = classify(line, self.patterns);

        match kind {
            LineKind::Header => {
                let mut out = flush_stem(state);
                let seed = self.emit_header(line, line_no, &mut out);
                if seed.is_empty() {
                    (LexState::Scanning, out)
                } else {
                    let (next, more) = self.append_stem(String::new(), line_no, seed, line_no);
                    out.extend(more);
                    (next, out)
                }
            }
            LineKind::OptionsHeader { rest } => {
                let mut out = flush_stem(state);
                if !rest.is_empty() {
                    if let Some((_, set)) = options::first_match(&LINE_STRATEGIES, rest, self.patterns)
                    {
                        push_options(&set, line_no, &mut out);
                    }
                }
                (LexState::InOptions, out)
            }
            LineKind::Text if state == LexState::InOptions => {
                match options::first_match(&LINE_STRATEGIES, line, self.patterns) {
                    Some((_, set)) => {
                        let mut out = Vec::new();
                        push_options(&set, line_no, &mut out);
                        (LexState::InOptions, out)
                    }
                    None => {
                        // 选项区中无法解析的行直接丢弃，不并入题干
                        debug!("第 {} 行在选项区内无法解析，已丢弃: {}", line_no, line);
                        (LexState::Scanning, Vec::new())
                    }
                }
            }
            LineKind::Answer => {
                let mut out = flush_stem(state);
                if let Some((marker, answer)) = split_answer(line) {
                    out.push(Token::new(TokenKind::AnswerMarker, marker, line_no));
                    out.push(Token::new(TokenKind::AnswerText, answer, line_no));
                } else {
                    debug!("第 {} 行答案缺少冒号或内容: {}", line_no, line);
                }
                (LexState::AfterAnswer, out)
            }
            LineKind::Status | LineKind::Score => {
                let next = match state {
                    LexState::InOptions => LexState::Scanning,
                    other => other,
                };
                (next, Vec::new())
            }
            LineKind::Text => {
                let (buffer, start) = match state {
                    LexState::InStem { buffer, line } => (buffer, line),
                    _ => (String::new(), line_no),
                };
                self.append_stem(buffer, start, line, line_no)
            }
        }
    }

    /// 输入结束：剩余题干先尝试解析为选项，否则作为题干输出
    pub fn finish(&self, state: LexState, line_no: usize) -> Vec<Token> {
        let LexState::InStem { buffer, line } = state else {
            return Vec::new();
        };
        match options::first_match(&LINE_STRATEGIES, &buffer, self.patterns) {
            Some((_, set)) => {
                let mut out = Vec::new();
                push_prefix_stem(&buffer, &set, line, &mut out);
                push_options(&set, line_no, &mut out);
                out
            }
            None => flush_stem(LexState::InStem { buffer, line }),
        }
    }

    /// 输出题号和题型，返回右括号之后的剩余文本
    fn emit_header<'a>(&self, line: &'a str, line_no: usize, out: &mut Vec<Token>) -> &'a str {
        let open = line.find(self.patterns.type_open).unwrap_or(0);
        let number = line[..open]
            .trim()
            .trim_end_matches(['．', '.', '、'])
            .trim();
        out.push(Token::new(TokenKind::QuestionNumber, number, line_no));

        match self.patterns.bracketed_type(line) {
            Some((question_type, end)) => {
                out.push(Token::new(
                    TokenKind::QuestionType,
                    scrub(question_type).trim(),
                    line_no,
                ));
                line[end..].trim()
            }
            None => {
                debug!("第 {} 行题型括号不完整: {}", line_no, line);
                ""
            }
        }
    }

    /// 追加一行到题干缓冲
    ///
    /// 追加后若缓冲中同时含有 A、B、C、D 四个标记，说明题干吞掉了
    /// 没有“选项：”标题的选项列表，立即按多标记切分恢复。
    fn append_stem(
        &self,
        mut buffer: String,
        start: usize,
        line: &str,
        line_no: usize,
    ) -> (LexState, Vec<Token>) {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(line);

        let has_all_four = ['A', 'B', 'C', 'D']
            .iter()
            .all(|letter| buffer.contains(&format!("{}、", letter)));
        if has_all_four {
            if let Some(set) = OptionStrategy::MultiMarker.extract(&buffer, self.patterns) {
                debug!("第 {} 行: 题干中恢复出 {} 个选项", line_no, set.items.len());
                let mut out = Vec::new();
                push_prefix_stem(&buffer, &set, start, &mut out);
                push_options(&set, line_no, &mut out);
                return (LexState::Scanning, out);
            }
        }

        (LexState::InStem { buffer, line: start }, Vec::new())
    }
}

/// 输出挂起的题干（如果有）
fn flush_stem(state: LexState) -> Vec<Token> {
    match state {
        LexState::InStem { buffer, line } if !buffer.trim().is_empty() => {
            vec![Token::new(TokenKind::QuestionStem, buffer.trim(), line)]
        }
        _ => Vec::new(),
    }
}

/// 选项之前未被消费的文本作为题干输出
fn push_prefix_stem(buffer: &str, set: &OptionSet, line: usize, out: &mut Vec<Token>) {
    let prefix = buffer[..set.prefix_end].trim();
    if !prefix.is_empty() {
        out.push(Token::new(TokenKind::QuestionStem, prefix, line));
    }
}

fn push_options(set: &OptionSet, line_no: usize, out: &mut Vec<Token>) {
    for item in &set.items {
        out.push(Token::new(
            TokenKind::OptionMarker,
            item.marker.to_string(),
            line_no,
        ));
        out.push(Token::new(TokenKind::OptionText, item.text.as_str(), line_no));
    }
}

/// 在第一个冒号（全角或半角）处切分答案行，两侧都非空才返回
fn split_answer(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(['：', ':'])?;
    let colon_len = line[idx..].chars().next()?.len_utf8();
    let marker = line[..idx].trim();
    let answer = line[idx + colon_len..].trim();
    (!marker.is_empty() && !answer.is_empty()).then_some((marker, answer))
}
