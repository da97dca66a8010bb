//! 整块回退解析
//!
//! 与词法分析 + 组装的主路径相互独立：先按题型标题行切分成块，再对每块
//! 用正则与字符串切分提取题型、题干、选项和答案。两条路径在同一输入上
//! 应给出相同的 `(题型, 题干, 选项, 答案)`，因此这里也作为主路径的回归对照。

use crate::error::ParseError;
use crate::models::question::Question;
use crate::parser::assembler::resolve_answer;
use crate::parser::normalize::scrub;
use crate::parser::options::{self, BLOCK_STRATEGIES};
use crate::parser::patterns::Patterns;
use tracing::debug;

/// 按题型标题行切分文本
///
/// 每块从一个标题行开始，到下一个标题行之前结束；第一个标题行之前的文本丢弃。
pub fn segment_blocks<'a>(text: &'a str, patterns: &Patterns) -> Vec<&'a str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if patterns.is_header(line) {
            starts.push(offset);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

/// 解析单个题目块，题型或题干为空时返回 `None`
pub fn parse_block(block: &str, patterns: &Patterns) -> Option<Question> {
    let Some((raw_type, type_end)) = patterns.bracketed_type(block) else {
        debug!("题目块缺少题型: {}", first_line(block));
        return None;
    };
    let question_type = scrub(raw_type).trim().to_string();
    if question_type.is_empty() {
        debug!("题目块题型为空: {}", first_line(block));
        return None;
    }

    let body = &block[type_end..];
    let stem_end = stem_end(body, patterns);
    let text = patterns.strip_fillers(&join_lines(&body[..stem_end]));

    let region = &body[stem_end..];
    let region_end = patterns
        .block_end
        .find(region)
        .map_or(region.len(), |m| m.start());
    let options = options::first_match(&BLOCK_STRATEGIES, &region[..region_end], patterns)
        .map(|(_, set)| set.texts())
        .unwrap_or_default();

    let answer = extract_answer(block, &options, patterns);

    let question = Question {
        question_type,
        text,
        options,
        answer,
    };
    if !question.is_complete() {
        debug!("题干为空，跳过题目块: {}", first_line(block));
        return None;
    }
    Some(question)
}

/// 整篇文本走回退路径
pub fn parse_blocks(text: &str, patterns: &Patterns) -> Result<Vec<Question>, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let blocks = segment_blocks(text, patterns);
    let questions: Vec<Question> = blocks
        .iter()
        .filter_map(|block| parse_block(block, patterns))
        .collect();

    debug!("回退解析: {} 个题目块, 成功 {} 个", blocks.len(), questions.len());
    if questions.is_empty() {
        return Err(ParseError::NoQuestionsParsed);
    }
    Ok(questions)
}

/// 题干结束位置：各结束标记与答案 / 状态行中最早出现的一个
fn stem_end(body: &str, patterns: &Patterns) -> usize {
    patterns
        .stem_terminators
        .iter()
        .filter_map(|marker| body.find(marker))
        .chain(patterns.block_end.find(body).map(|m| m.start()))
        .min()
        .unwrap_or(body.len())
}

/// 优先“正确答案”，其次“我的答案”，最后泛用的“答案”
fn extract_answer(block: &str, options: &[String], patterns: &Patterns) -> Vec<String> {
    patterns
        .answer_lines
        .iter()
        .find_map(|(_, re)| {
            let answer_text = re.captures(block)?.get(1)?.as_str();
            let resolved = resolve_answer(answer_text, options);
            (!resolved.is_empty()).then_some(resolved)
        })
        .unwrap_or_default()
}

fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_line(block: &str) -> &str {
    block.lines().next().unwrap_or_default().trim()
}
