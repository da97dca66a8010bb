use crate::error::ConfigError;
use std::str::FromStr;

/// 输出文件格式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Toml,
}

impl OutputFormat {
    /// 输出文件扩展名
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Toml => "toml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "toml" => Ok(OutputFormat::Toml),
            other => Err(format!("未知的输出格式: {}", other)),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 已提取文本（.txt）的存放目录
    pub input_folder: String,
    /// 解析结果输出目录
    pub output_folder: String,
    /// 输出格式
    pub output_format: OutputFormat,
    /// 同时解析的文档数量
    pub max_concurrent_docs: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 解析失败的文档记录文件
    pub warn_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: "input_txt".to_string(),
            output_folder: "output_questions".to_string(),
            output_format: OutputFormat::Json,
            max_concurrent_docs: 8,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            warn_file: "warn.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取，缺失或无法解析的值使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            output_format: std::env::var("OUTPUT_FORMAT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.output_format),
            max_concurrent_docs: std::env::var("MAX_CONCURRENT_DOCS").ok().and_then(|v| v.parse().ok()).filter(|&n| n > 0).unwrap_or(default.max_concurrent_docs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
        }
    }

    /// 从环境变量读取，存在但无法解析的值返回错误
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_env();
        if let Some(format) = parse_var::<OutputFormat>("OUTPUT_FORMAT", "json|toml")? {
            config.output_format = format;
        }
        if let Some(n) = parse_var::<usize>("MAX_CONCURRENT_DOCS", "usize")? {
            if n == 0 {
                return Err(ConfigError::EnvVarParseFailed {
                    var_name: "MAX_CONCURRENT_DOCS".to_string(),
                    value: n.to_string(),
                    expected_type: "正整数".to_string(),
                });
            }
            config.max_concurrent_docs = n;
        }
        if let Some(verbose) = parse_var::<bool>("VERBOSE_LOGGING", "bool")? {
            config.verbose_logging = verbose;
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(" toml ".parse::<OutputFormat>(), Ok(OutputFormat::Toml));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Toml.extension(), "toml");
    }

    #[test]
    fn test_try_from_env_rejects_bad_values() {
        std::env::set_var("MAX_CONCURRENT_DOCS", "0");
        let err = Config::try_from_env().unwrap_err();
        assert!(err.to_string().contains("MAX_CONCURRENT_DOCS"));
        // 宽松读取时回退到默认值
        assert_eq!(Config::from_env().max_concurrent_docs, 8);

        std::env::set_var("MAX_CONCURRENT_DOCS", "3");
        assert_eq!(Config::try_from_env().unwrap().max_concurrent_docs, 3);
        std::env::remove_var("MAX_CONCURRENT_DOCS");
    }

    #[test]
    fn test_parse_var_reports_bad_value() {
        std::env::set_var("TIKU_PARSER_TEST_BAD_USIZE", "abc");
        let err = parse_var::<usize>("TIKU_PARSER_TEST_BAD_USIZE", "usize").unwrap_err();
        assert!(err.to_string().contains("TIKU_PARSER_TEST_BAD_USIZE"));
        assert_eq!(parse_var::<usize>("TIKU_PARSER_TEST_UNSET_VAR", "usize").unwrap(), None);
    }
}
