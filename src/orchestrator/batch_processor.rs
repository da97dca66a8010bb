//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的加载、分批并发解析与全局统计。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化日志文件、输出启动信息
//! 2. **批量加载**：扫描输入目录下所有 `.txt` 文档
//! 3. **并发控制**：使用 Semaphore 限制同时解析的文档数
//! 4. **分批处理**：每批完成后再开始下一批
//! 5. **全局统计**：汇总成功、失败与题目总数

use crate::config::Config;
use crate::models::TextSource;
use crate::orchestrator::document_processor;
use crate::utils::logging;
use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(config.max_concurrent_docs);

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let sources = self.load_sources().await?;

        if sources.is_empty() {
            warn!("⚠️ 没有找到待解析的文本文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        logging::log_documents_loaded(sources.len(), self.config.max_concurrent_docs);

        let stats = self.process_all(sources).await?;

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.questions,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    async fn load_sources(&self) -> Result<Vec<TextSource>> {
        info!("\n📁 正在扫描待解析的文档...");
        crate::models::load_all_text_files(&self.config.input_folder).await
    }

    async fn process_all(&self, sources: Vec<TextSource>) -> Result<ProcessingStats> {
        let batch_size = self.config.max_concurrent_docs.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total = sources.len();
        let total_batches = (total + batch_size - 1) / batch_size;
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        let mut remaining = sources.into_iter();
        for batch_num in 1..=total_batches {
            let batch: Vec<TextSource> = remaining.by_ref().take(batch_size).collect();
            let batch_start = (batch_num - 1) * batch_size;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch.len(),
                total,
            );

            let batch_len = batch.len();
            let result = self.process_batch(batch, batch_start, semaphore.clone()).await?;

            stats.success += result.success;
            stats.failed += result.failed;
            stats.questions += result.questions;

            logging::log_batch_complete(batch_num, result.success, batch_len);
        }

        Ok(stats)
    }

    async fn process_batch(
        &self,
        batch: Vec<TextSource>,
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut handles = Vec::with_capacity(batch.len());

        for (idx, source) in batch.into_iter().enumerate() {
            let doc_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let config = self.config.clone();

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let outcome =
                    document_processor::process_document(source, doc_index, &config).await;
                (doc_index, outcome)
            }));
        }

        let mut result = BatchResult::default();
        for joined in join_all(handles).await {
            match joined {
                Ok((_, Ok(outcome))) if outcome.is_success() => {
                    result.success += 1;
                    result.questions += outcome.questions;
                }
                Ok((_, Ok(_))) => result.failed += 1,
                Ok((doc_index, Err(e))) => {
                    error!("[文档 {}] ❌ 处理过程中发生错误: {:#}", doc_index, e);
                    result.failed += 1;
                }
                Err(e) => {
                    error!("任务执行失败: {}", e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    /// 成功文档中的题目总数
    pub questions: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
    questions: usize,
}
