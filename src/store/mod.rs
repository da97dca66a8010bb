//! 题库存储接口
//!
//! 解析核心只产出题目记录；保存、去重、软删除恢复与搜索由实现了
//! [`QuestionRepository`] 的存储负责。这里附带一个进程内实现
//! [`MemoryRepository`]，语义与数据库实现保持一致。

pub mod memory;

pub use memory::MemoryRepository;

use crate::error::StoreError;
use crate::models::question::Question;
use serde::Serialize;

/// 批量保存统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// 新增
    pub inserted: usize,
    /// 已存在或题干为空而跳过
    pub skipped: usize,
    /// 软删除后被恢复
    pub restored: usize,
}

/// 分页搜索结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    pub questions: Vec<Question>,
    /// 匹配的总数（不受分页影响）
    pub total: usize,
}

/// 题库存储
pub trait QuestionRepository {
    /// 按规范化题干去重保存
    ///
    /// 已软删除的同题干记录会被恢复并更新内容，而不是重复插入。
    fn upsert_batch(&mut self, questions: &[Question]) -> Result<ImportStats, StoreError>;

    /// 搜索题目
    ///
    /// # 参数
    /// - `query`: 关键词，规范化后按子串匹配；为空时匹配全部
    /// - `page`: 页码（从 1 开始）
    /// - `limit`: 每页数量（至少为 1）
    fn search(&self, query: &str, page: usize, limit: usize) -> Result<SearchPage, StoreError>;

    /// 软删除题干匹配的题目，返回是否有记录被删除
    fn soft_delete(&mut self, stem: &str) -> bool;
}
