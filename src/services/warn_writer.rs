//! 警告写入服务
//!
//! 只负责把解析失败的文档追加到 warn.txt，不关心流程

use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 警告写入服务
///
/// 每个失败的文档写一行：文件名 + 失败原因
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建警告写入服务
    ///
    /// # 参数
    /// - `path`: 警告文件路径，文件不存在时自动创建
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `source`: 文档文件名
    /// - `reason`: 失败原因
    pub async fn write(&self, source: &str, reason: &str) -> Result<()> {
        debug!("写入警告: 文档 {} | 原因: {}", source, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)
            .await
            .with_context(|| format!("无法打开警告文件: {}", self.warn_file_path))?;

        let warn_msg = format!(
            "{} | 文档 {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            source,
            reason
        );

        file.write_all(warn_msg.as_bytes()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_appends_lines() {
        let path =
            std::env::temp_dir().join(format!("tiku_parser_warn_{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let writer = WarnWriter::new(path.to_string_lossy());
        tokio_test::block_on(async {
            writer.write("a.txt", "没有成功解析任何题目").await.unwrap();
            writer.write("b.txt", "输入文本为空").await.unwrap();
        });

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("文档 a.txt | 没有成功解析任何题目"));

        let _ = std::fs::remove_file(&path);
    }
}
