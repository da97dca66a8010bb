use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 题库存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 题目解析错误
///
/// 单个题目块解析失败不会产生错误，只会被跳过；
/// 只有整篇文本的失败才会以错误返回。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 输入文本为空
    #[error("输入文本为空")]
    EmptyInput,
    /// 输入非空，但没有成功解析任何题目
    #[error("没有成功解析任何题目")]
    NoQuestionsParsed,
}

/// 题库存储错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// 分页参数无效（页码与每页数量都从 1 开始）
    #[error("无效的分页参数: page={page}, limit={limit}")]
    InvalidPagination { page: usize, limit: usize },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 输出序列化失败
    #[error("序列化失败 ({format}): {message}")]
    SerializeFailed { format: String, message: String },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::File(FileError::SerializeFailed {
            format: "json".to_string(),
            message: err.to_string(),
        })
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::File(FileError::SerializeFailed {
            format: "toml".to_string(),
            message: err.to_string(),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_converts_into_app_error() {
        let err: AppError = ParseError::EmptyInput.into();
        assert!(matches!(err, AppError::Parse(ParseError::EmptyInput)));
        assert_eq!(err.to_string(), "解析错误: 输入文本为空");
    }

    #[test]
    fn test_pagination_error_message() {
        let err = StoreError::InvalidPagination { page: 0, limit: 5 };
        assert_eq!(err.to_string(), "无效的分页参数: page=0, limit=5");
    }
}
