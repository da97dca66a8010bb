//! # Tiku Parser
//!
//! 把题库导出的纯文本解析为结构化的题目记录（题型、题干、选项、答案）。
//!
//! ## 架构设计
//!
//! ### ① 解析核心（Parser）
//! - `parser/` - 同步、无副作用：文本 → `Vec<Question>`
//! - `Lexer` - 按行分类的显式状态机，产出 `Token`
//! - `Assembler` - 把 `Token` 折叠为题目，映射答案字母
//! - `fallback` - 按题块整体解析，作为主路径的回归对照
//!
//! ### ② 数据模型（Models）
//! - `models/` - `Question`、`QuestionKind`、文本加载
//!
//! ### ③ 能力层（Services / Store）
//! - `services/` - 写出结果文件、写 warn.txt
//! - `store/` - 题库接口：按规范化题干去重、软删除恢复、搜索
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文档处理，管理并发
//! - `orchestrator/document_processor` - 单个文档的解析与输出

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod store;
pub mod utils;

// 重新导出常用类型
pub use config::{Config, OutputFormat};
pub use error::{AppError, AppResult, ParseError, StoreError};
pub use models::{Question, QuestionDocument, QuestionKind};
pub use orchestrator::{App, ProcessingStats};
pub use parser::{parse_questions, parse_questions_bytes, QuestionParser};
pub use store::{MemoryRepository, QuestionRepository};
