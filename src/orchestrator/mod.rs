//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载文档（`Vec<TextSource>`）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 解析单个文档的所有题目
//! - 写出结果文件或记录警告
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<TextSource>)
//!     ↓
//! document_processor (处理单个 TextSource)
//!     ↓
//! parser (文本 → Vec<Question>) / services (写结果、写警告)
//! ```
//!
//! 编排层只做调度和统计，不做具体解析判断。

pub mod batch_processor;
pub mod document_processor;

pub use batch_processor::{App, ProcessingStats};
pub use document_processor::{count_by_kind, process_document, DocumentOutcome};
