use crate::error::{AppError, FileError};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 已提取的文档文本
///
/// 文本由上游的 XML 提取器生成：段落与换行已还原为 `\n`。
#[derive(Debug, Clone)]
pub struct TextSource {
    /// 文件名（不含目录）
    pub name: String,
    pub path: PathBuf,
    pub text: String,
}

/// 从文件加载文本
///
/// 非法 UTF-8 字节序列会被替换为 U+FFFD，解析时再统一清除。
pub async fn load_text_source(path: &Path) -> Result<TextSource> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(TextSource {
        name,
        path: path.to_path_buf(),
        text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// 从文件夹中加载所有 `.txt` 文件
///
/// 单个文件读取失败只记录警告，不影响其他文件；结果按文件名排序。
pub async fn load_all_text_files(folder_path: &str) -> Result<Vec<TextSource>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut sources = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("txt") {
            continue;
        }

        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_text_source(&path).await {
            Ok(source) => {
                tracing::debug!("文本长度: {} 字节", source.text.len());
                sources.push(source);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    sources.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sources)
}
