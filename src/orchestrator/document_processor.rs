//! 单个文档处理器 - 编排层
//!
//! 解析一篇文档的全部题目，写出结果；失败时记录到 warn.txt。

use crate::config::Config;
use crate::models::question::{Question, QuestionDocument};
use crate::models::TextSource;
use crate::parser;
use crate::services::{OutputWriter, WarnWriter};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// 单个文档的处理结果
#[derive(Debug, Default)]
pub struct DocumentOutcome {
    /// 解析出的题目数量；为 0 表示失败
    pub questions: usize,
    /// 输出文件路径
    pub output_path: Option<PathBuf>,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.output_path.is_some()
    }
}

/// 处理单个文档
///
/// # 参数
/// - `source`: 文档文本
/// - `doc_index`: 文档索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 解析失败不会返回错误，而是写入警告文件并返回空结果；
/// 只有写出结果或警告失败时才返回错误。
pub async fn process_document(
    source: TextSource,
    doc_index: usize,
    config: &Config,
) -> Result<DocumentOutcome> {
    info!("[文档 {}] 开始解析: {}", doc_index, source.name);

    let name = source.name.clone();
    let text = source.text;
    // 解析是纯计算，放到阻塞线程池
    let parsed = tokio::task::spawn_blocking(move || parser::parse_questions(&text))
        .await
        .with_context(|| format!("[文档 {}] 解析任务异常退出", doc_index))?;

    let questions = match parsed {
        Ok(questions) => questions,
        Err(e) => {
            warn!("[文档 {}] ⚠️ {}: {}", doc_index, name, e);
            WarnWriter::new(config.warn_file.as_str())
                .write(&name, &e.to_string())
                .await?;
            return Ok(DocumentOutcome::default());
        }
    };

    for question in &questions {
        debug!("[文档 {}] {}", doc_index, question);
    }
    log_kind_summary(doc_index, &count_by_kind(&questions));

    let document = QuestionDocument {
        source: name,
        questions,
    };
    let count = document.questions.len();

    let writer = OutputWriter::new(&config.output_folder, config.output_format);
    let path = match writer.write(&document).await {
        Ok(path) => path,
        Err(e) => {
            error!("[文档 {}] 写出结果失败: {}", doc_index, e);
            return Err(e.into());
        }
    };

    crate::utils::logging::append_log_line(
        &config.output_log_file,
        &format!("{} -> {} ({} 道题)", document.source, path.display(), count),
    )
    .await?;

    info!(
        "[文档 {}] ✅ 解析完成: {} 道题 -> {}",
        doc_index,
        count,
        path.display()
    );

    Ok(DocumentOutcome {
        questions: count,
        output_path: Some(path),
    })
}

/// 按题型统计数量
pub fn count_by_kind(questions: &[Question]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for q in questions {
        *counts.entry(q.kind().name()).or_insert(0) += 1;
    }
    counts
}

fn log_kind_summary(doc_index: usize, counts: &BTreeMap<&'static str, usize>) {
    let summary: Vec<String> = counts
        .iter()
        .map(|(name, n)| format!("{} {}", name, n))
        .collect();
    info!("[文档 {}] 题型分布: {}", doc_index, summary.join(", "));
}
