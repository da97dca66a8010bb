//! 选项提取策略
//!
//! 每个策略独立地从一段文本中提取选项，返回 `None` 表示不适用或没有结果。
//! 调用方按固定顺序尝试，取第一个非空结果：
//!
//! - 行内（词法分析）：[`LINE_STRATEGIES`] = 多标记切分 → 稀疏扫描
//! - 整块回退：[`BLOCK_STRATEGIES`] = 行首正则 → 标记切分 → 字符扫描
//!
//! 选项文本统一经过 U+FFFD 清除、逐行去空白并以单个空格连接。

use crate::parser::normalize::scrub;
use crate::parser::patterns::Patterns;

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    /// 原文中的字母标记，仅用于诊断；答案映射以出现顺序为准
    pub marker: char,
    pub text: String,
}

/// 一次提取的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    /// 第一个选项标记的字节偏移，之前的文本未被消费
    pub prefix_end: usize,
    pub items: Vec<OptionItem>,
}

impl OptionSet {
    pub fn texts(&self) -> Vec<String> {
        self.items.iter().map(|item| item.text.clone()).collect()
    }
}

/// 选项提取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionStrategy {
    /// 至少两个不同的 `X、` 标记：按各字母首次出现的位置切分
    MultiMarker,
    /// 逐个扫描 `X、` / `X．`，每个命中到下一个命中或行尾
    SparseScan,
    /// 行首的 `X、` / `X．` 标记，选项可跨行
    LineAnchored,
    /// 每个字母的首个 `X、` 到之后出现的更大字母标记
    MarkerSplit,
    /// 按字符位置扫描 `X、`
    RuneScan,
}

/// 词法分析中单行使用的策略顺序
pub const LINE_STRATEGIES: [OptionStrategy; 2] =
    [OptionStrategy::MultiMarker, OptionStrategy::SparseScan];

/// 整块回退解析使用的策略顺序
pub const BLOCK_STRATEGIES: [OptionStrategy; 3] = [
    OptionStrategy::LineAnchored,
    OptionStrategy::MarkerSplit,
    OptionStrategy::RuneScan,
];

const PRIMARY_SEPARATOR: char = '、';

impl OptionStrategy {
    pub fn name(self) -> &'static str {
        match self {
            OptionStrategy::MultiMarker => "multi-marker",
            OptionStrategy::SparseScan => "sparse-scan",
            OptionStrategy::LineAnchored => "line-anchored",
            OptionStrategy::MarkerSplit => "marker-split",
            OptionStrategy::RuneScan => "rune-scan",
        }
    }

    /// 提取选项；结果为空时返回 `None`
    pub fn extract(self, text: &str, patterns: &Patterns) -> Option<OptionSet> {
        let set = match self {
            OptionStrategy::MultiMarker => multi_marker(text),
            OptionStrategy::SparseScan => sparse_scan(text, patterns),
            OptionStrategy::LineAnchored => line_anchored(text, patterns),
            OptionStrategy::MarkerSplit => marker_split(text),
            OptionStrategy::RuneScan => rune_scan(text),
        }?;
        if set.items.is_empty() {
            None
        } else {
            Some(set)
        }
    }
}

/// 按顺序尝试策略，返回第一个非空结果及其策略
pub fn first_match(
    strategies: &[OptionStrategy],
    text: &str,
    patterns: &Patterns,
) -> Option<(OptionStrategy, OptionSet)> {
    strategies.iter().find_map(|&strategy| {
        let set = strategy.extract(text, patterns)?;
        tracing::debug!(
            "选项策略 {} 命中 {} 个选项",
            strategy.name(),
            set.items.len()
        );
        Some((strategy, set))
    })
}

/// 清理选项文本：删除 U+FFFD，逐行去空白后以空格连接
pub fn clean_option_text(raw: &str) -> String {
    scrub(raw)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 标记命中：(字节偏移, 字母, 标记字节长度)
type Hit = (usize, char, usize);

/// 按相邻命中切分文本
fn slice_hits(text: &str, hits: &[Hit]) -> Option<OptionSet> {
    let first = hits.first()?;
    let items = hits
        .iter()
        .enumerate()
        .filter_map(|(i, &(pos, letter, marker_len))| {
            let end = hits.get(i + 1).map_or(text.len(), |&(next, _, _)| next);
            let body = text.get(pos + marker_len..end)?;
            let cleaned = clean_option_text(body);
            (!cleaned.is_empty()).then_some(OptionItem {
                marker: letter,
                text: cleaned,
            })
        })
        .collect();
    Some(OptionSet {
        prefix_end: first.0,
        items,
    })
}

fn marker_len(letter: char, separator: char) -> usize {
    letter.len_utf8() + separator.len_utf8()
}

fn multi_marker(text: &str) -> Option<OptionSet> {
    let mut hits: Vec<Hit> = ('A'..='Z')
        .filter_map(|letter| {
            let marker = format!("{}{}", letter, PRIMARY_SEPARATOR);
            text.find(&marker)
                .map(|pos| (pos, letter, marker_len(letter, PRIMARY_SEPARATOR)))
        })
        .collect();
    if hits.len() < 2 {
        return None;
    }
    hits.sort_unstable();
    slice_hits(text, &hits)
}

fn sparse_scan(text: &str, patterns: &Patterns) -> Option<OptionSet> {
    let mut hits = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        if !c.is_ascii_uppercase() {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if patterns.is_option_separator(next) {
                hits.push((pos, c, marker_len(c, next)));
            }
        }
    }
    slice_hits(text, &hits)
}

fn line_anchored(text: &str, patterns: &Patterns) -> Option<OptionSet> {
    let hits: Vec<Hit> = patterns
        .line_option
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter_match = caps.get(1)?;
            let letter = letter_match.as_str().chars().next()?;
            // 从字母处开始计算，跳过行首空白
            Some((
                letter_match.start(),
                letter,
                whole.end() - letter_match.start(),
            ))
        })
        .collect();
    slice_hits(text, &hits)
}

fn marker_split(text: &str) -> Option<OptionSet> {
    let mut prefix_end = None;
    let mut items = Vec::new();

    for letter in 'A'..='Z' {
        let marker = format!("{}{}", letter, PRIMARY_SEPARATOR);
        let Some(pos) = text.find(&marker) else {
            continue;
        };
        prefix_end = Some(prefix_end.map_or(pos, |p: usize| p.min(pos)));

        let rest = &text[pos + marker.len()..];
        let end = ('A'..='Z')
            .filter(|&next| next > letter)
            .filter_map(|next| rest.find(&format!("{}{}", next, PRIMARY_SEPARATOR)))
            .min()
            .unwrap_or(rest.len());

        let cleaned = clean_option_text(&rest[..end]);
        if !cleaned.is_empty() {
            items.push(OptionItem {
                marker: letter,
                text: cleaned,
            });
        }
    }

    Some(OptionSet {
        prefix_end: prefix_end?,
        items,
    })
}

fn rune_scan(text: &str) -> Option<OptionSet> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let hits: Vec<Hit> = chars
        .windows(2)
        .filter(|pair| pair[0].1.is_ascii_uppercase() && pair[1].1 == PRIMARY_SEPARATOR)
        .map(|pair| (pair[0].0, pair[0].1, marker_len(pair[0].1, PRIMARY_SEPARATOR)))
        .collect();
    slice_hits(text, &hits)
}
