//! 题目解析核心
//!
//! ## 处理流程
//!
//! ```text
//! 原始文本 → Lexer（按行扫描） → Vec<Token> → Assembler（折叠） → Vec<Question>
//! ```
//!
//! - `normalize` - 文本规范化（去重键、搜索关键词）
//! - `patterns` - 不可变的标记与正则表
//! - `lexer` - 行分类与显式状态机
//! - `options` - 选项提取策略，按顺序尝试
//! - `assembler` - 题目组装与答案映射
//! - `fallback` - 整块回退解析，同时作为主路径的回归对照
//!
//! 解析是同步、无共享可变状态的：每次调用使用自己的词法分析器与组装器，
//! 多线程同时解析不同文档是安全的。

pub mod assembler;
pub mod fallback;
pub mod lexer;
pub mod normalize;
pub mod options;
pub mod patterns;
pub mod token;

pub use assembler::{resolve_answer, Assembler};
pub use fallback::{parse_block, parse_blocks, segment_blocks};
pub use lexer::{LexState, Lexer, LineKind};
pub use normalize::{normalize, normalized_key, truncate_chars, MAX_QUERY_LENGTH};
pub use options::{OptionStrategy, BLOCK_STRATEGIES, LINE_STRATEGIES};
pub use patterns::Patterns;
pub use token::{AnswerSource, Token, TokenKind};

use crate::error::ParseError;
use crate::models::question::Question;
use tracing::info;

/// 题目解析器
#[derive(Debug, Clone, Copy)]
pub struct QuestionParser<'p> {
    patterns: &'p Patterns,
}

impl<'p> QuestionParser<'p> {
    pub fn new(patterns: &'p Patterns) -> Self {
        Self { patterns }
    }

    /// 词法分析
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Lexer::new(self.patterns).tokenize(text)
    }

    /// 解析整篇文本
    ///
    /// # 返回
    /// - `Err(ParseError::EmptyInput)`：输入为空
    /// - `Err(ParseError::NoQuestionsParsed)`：没有任何完整的题目
    pub fn parse(&self, text: &str) -> Result<Vec<Question>, ParseError> {
        if text.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let tokens = self.tokenize(text);
        let questions = Assembler::new(self.patterns).assemble(&tokens)?;

        info!("✓ 成功解析 {} 道题目", questions.len());
        Ok(questions)
    }
}

/// 使用共享模式表解析文本
pub fn parse_questions(text: &str) -> Result<Vec<Question>, ParseError> {
    QuestionParser::new(Patterns::shared()).parse(text)
}

/// 解析原始字节：非法 UTF-8 序列先替换，再在题型和选项中清除
pub fn parse_questions_bytes(bytes: &[u8]) -> Result<Vec<Question>, ParseError> {
    parse_questions(&String::from_utf8_lossy(bytes))
}

/// 使用共享模式表做词法分析
pub fn tokenize(text: &str) -> Vec<Token> {
    QuestionParser::new(Patterns::shared()).tokenize(text)
}
