use crate::error::StoreError;
use crate::models::question::Question;
use crate::parser::normalize::{normalize, normalized_key, MAX_QUERY_LENGTH};
use crate::store::{ImportStats, QuestionRepository, SearchPage};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct StoredQuestion {
    question: Question,
    deleted: bool,
}

/// 进程内题库
///
/// 唯一键为规范化后的题干；保存的记录题干即为该键。
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Vec<StoredQuestion>,
    by_key: HashMap<String, usize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未删除的记录数
    pub fn len(&self) -> usize {
        self.records.iter().filter(|r| !r.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QuestionRepository for MemoryRepository {
    fn upsert_batch(&mut self, questions: &[Question]) -> Result<ImportStats, StoreError> {
        let mut stats = ImportStats::default();

        for q in questions {
            let key = normalize(&q.text);
            if key.is_empty() {
                stats.skipped += 1;
                continue;
            }

            match self.by_key.get(&key) {
                Some(&idx) if self.records[idx].deleted => {
                    debug!("发现已删除的重复题目，正在恢复: {}", key);
                    let record = &mut self.records[idx];
                    record.question.question_type = q.question_type.clone();
                    record.question.options = q.options.clone();
                    record.question.answer = q.answer.clone();
                    record.deleted = false;
                    stats.restored += 1;
                }
                Some(_) => stats.skipped += 1,
                None => {
                    let question = Question {
                        text: key.clone(),
                        ..q.clone()
                    };
                    self.by_key.insert(key, self.records.len());
                    self.records.push(StoredQuestion {
                        question,
                        deleted: false,
                    });
                    stats.inserted += 1;
                }
            }
        }

        info!(
            "保存完成: 新增 {} 道, 恢复 {} 道, 跳过 {} 道",
            stats.inserted, stats.restored, stats.skipped
        );
        Ok(stats)
    }

    fn search(&self, query: &str, page: usize, limit: usize) -> Result<SearchPage, StoreError> {
        if page < 1 || limit < 1 {
            return Err(StoreError::InvalidPagination { page, limit });
        }

        let needle = normalized_key(query, MAX_QUERY_LENGTH);
        let matches: Vec<&Question> = self
            .records
            .iter()
            .filter(|r| !r.deleted && r.question.text.contains(&needle))
            .map(|r| &r.question)
            .collect();

        let total = matches.len();
        let questions = matches
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .cloned()
            .collect();

        Ok(SearchPage { questions, total })
    }

    fn soft_delete(&mut self, stem: &str) -> bool {
        let key = normalize(stem);
        match self.by_key.get(&key) {
            Some(&idx) if !self.records[idx].deleted => {
                self.records[idx].deleted = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, answer: &str) -> Question {
        Question {
            question_type: "单选题".to_string(),
            text: text.to_string(),
            options: vec!["甲".to_string(), "乙".to_string()],
            answer: vec![answer.to_string()],
        }
    }

    #[test]
    fn test_upsert_dedups_by_normalized_stem() {
        let mut repo = MemoryRepository::new();
        let stats = repo
            .upsert_batch(&[
                question("中国的首都是？", "甲"),
                question("中国的首都是", "乙"),
                question("！？", "甲"),
            ])
            .unwrap();
        assert_eq!(
            stats,
            ImportStats {
                inserted: 1,
                skipped: 2,
                restored: 0
            }
        );
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_soft_deleted_record_is_restored() {
        let mut repo = MemoryRepository::new();
        repo.upsert_batch(&[question("题干一", "甲")]).unwrap();
        assert!(repo.soft_delete("题干一。"));
        assert!(!repo.soft_delete("题干一"));
        assert!(repo.is_empty());

        let stats = repo.upsert_batch(&[question("题干一", "乙")]).unwrap();
        assert_eq!(stats.restored, 1);
        let page = repo.search("题干", 1, 10).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.questions[0].answer, vec!["乙"]);
    }

    #[test]
    fn test_long_query_is_truncated() {
        let mut repo = MemoryRepository::new();
        repo.upsert_batch(&[question(&"甲".repeat(150), "甲")]).unwrap();

        // 超出上限的部分被截掉，否则末尾的“乙”会导致不匹配
        let query = format!("{}乙", "甲".repeat(MAX_QUERY_LENGTH));
        assert_eq!(repo.search(&query, 1, 10).unwrap().total, 1);

        let short = format!("{}乙", "甲".repeat(MAX_QUERY_LENGTH - 1));
        assert_eq!(repo.search(&short, 1, 10).unwrap().total, 0);
    }

    #[test]
    fn test_search_pagination() {
        let mut repo = MemoryRepository::new();
        let batch: Vec<_> = (1..=5)
            .map(|i| question(&format!("液化气题目{}", i), "甲"))
            .collect();
        repo.upsert_batch(&batch).unwrap();

        let page = repo.search("液化 气", 2, 2).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.questions.len(), 2);
        assert_eq!(page.questions[0].text, "液化气题目3");

        assert_eq!(repo.search("", 3, 2).unwrap().questions.len(), 1);
        assert_eq!(
            repo.search("液化", 0, 2),
            Err(StoreError::InvalidPagination { page: 0, limit: 2 })
        );
    }
}
