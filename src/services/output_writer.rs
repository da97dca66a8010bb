//! 解析结果写入服务
//!
//! 把一篇文档的题目序列化为 JSON 或 TOML 写入输出目录

use crate::config::OutputFormat;
use crate::error::{AppError, AppResult};
use crate::models::question::QuestionDocument;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 结果写入服务
pub struct OutputWriter {
    output_folder: PathBuf,
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(output_folder: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_folder: output_folder.into(),
            format,
        }
    }

    /// 序列化文档
    pub fn render(&self, document: &QuestionDocument) -> AppResult<String> {
        let content = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(document)?,
            OutputFormat::Toml => toml::to_string_pretty(document)?,
        };
        Ok(content)
    }

    /// 输出文件路径：与来源同名，扩展名换成输出格式
    pub fn target_path(&self, source_name: &str) -> PathBuf {
        let stem = Path::new(source_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| source_name.to_string());
        self.output_folder
            .join(format!("{}.{}", stem, self.format.extension()))
    }

    /// 写入文档，返回输出文件路径
    pub async fn write(&self, document: &QuestionDocument) -> AppResult<PathBuf> {
        let content = self.render(document)?;

        fs::create_dir_all(&self.output_folder).await.map_err(|e| {
            AppError::file_write_failed(self.output_folder.display().to_string(), e)
        })?;

        let path = self.target_path(&document.source);
        fs::write(&path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        debug!("已写入: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Question;

    fn document() -> QuestionDocument {
        QuestionDocument {
            source: "第一章.txt".to_string(),
            questions: vec![Question {
                question_type: "判断题".to_string(),
                text: "地球是圆的".to_string(),
                options: vec![],
                answer: vec!["对".to_string()],
            }],
        }
    }

    #[test]
    fn test_target_path_replaces_extension() {
        let writer = OutputWriter::new("out", OutputFormat::Toml);
        assert_eq!(writer.target_path("第一章.txt"), PathBuf::from("out/第一章.toml"));
    }

    #[test]
    fn test_render_json_and_toml() {
        let json = OutputWriter::new("out", OutputFormat::Json)
            .render(&document())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["questions"][0]["type"], "判断题");

        let toml_text = OutputWriter::new("out", OutputFormat::Toml)
            .render(&document())
            .unwrap();
        let parsed: QuestionDocument = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed.questions, document().questions);
    }

    #[test]
    fn test_write_creates_folder() {
        let folder =
            std::env::temp_dir().join(format!("tiku_parser_out_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&folder);

        let writer = OutputWriter::new(&folder, OutputFormat::Json);
        let path = tokio_test::block_on(writer.write(&document())).unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));

        let _ = std::fs::remove_dir_all(&folder);
    }
}
