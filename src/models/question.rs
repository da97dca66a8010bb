use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 判断题答案：正确
pub const JUDGE_TRUE: &str = "对";
/// 判断题答案：错误
pub const JUDGE_FALSE: &str = "错";

/// 解析出的单个题目
///
/// `options` 的顺序即出现顺序，字母答案按 A、B、C… 的位置映射到这里，
/// 与原文中实际出现的标记字符无关。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 题型（如“单选题”），必须非空
    #[serde(rename = "type")]
    pub question_type: String,
    /// 题干
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// 答案：判断题为“对”/“错”，选择题为选项文本，越界字母原样保留
    #[serde(default)]
    pub answer: Vec<String>,
}

impl Question {
    /// 题型分类
    pub fn kind(&self) -> QuestionKind {
        QuestionKind::from_label(&self.question_type)
    }

    /// 是否是判断题答案
    pub fn is_judgment(&self) -> bool {
        self.options.is_empty()
            && self.answer.len() == 1
            && (self.answer[0] == JUDGE_TRUE || self.answer[0] == JUDGE_FALSE)
    }

    /// 是否满足保存条件：题型与题干都非空
    pub fn is_complete(&self) -> bool {
        !self.question_type.trim().is_empty() && !self.text.trim().is_empty()
    }
}

/// 题型枚举
///
/// 数值编码与下游题库接口保持一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// 单选题
    SingleChoice,
    /// 多选题
    MultipleChoice,
    /// 填空题
    FillBlank,
    /// 判断题
    TrueFalse,
    /// 问答题
    Essay,
    /// 未识别的题型
    Unknown,
}

static KIND_LABELS: phf::Map<&'static str, QuestionKind> = phf_map! {
    "单选题" => QuestionKind::SingleChoice,
    "单选" => QuestionKind::SingleChoice,
    "多选题" => QuestionKind::MultipleChoice,
    "多选" => QuestionKind::MultipleChoice,
    "填空题" => QuestionKind::FillBlank,
    "填空" => QuestionKind::FillBlank,
    "判断题" => QuestionKind::TrueFalse,
    "判断" => QuestionKind::TrueFalse,
    "简答题" => QuestionKind::Essay,
    "问答题" => QuestionKind::Essay,
    "论述题" => QuestionKind::Essay,
};

impl QuestionKind {
    /// 从题型标签解析（精确匹配，忽略首尾空白）
    pub fn from_label(label: &str) -> Self {
        KIND_LABELS
            .get(label.trim())
            .copied()
            .unwrap_or(QuestionKind::Unknown)
    }

    /// 获取下游接口使用的题型代码
    pub fn code(self) -> Option<i32> {
        match self {
            QuestionKind::SingleChoice => Some(0),
            QuestionKind::MultipleChoice => Some(1),
            QuestionKind::FillBlank => Some(2),
            QuestionKind::TrueFalse => Some(3),
            QuestionKind::Essay => Some(4),
            QuestionKind::Unknown => None,
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "单选题",
            QuestionKind::MultipleChoice => "多选题",
            QuestionKind::FillBlank => "填空题",
            QuestionKind::TrueFalse => "判断题",
            QuestionKind::Essay => "问答题",
            QuestionKind::Unknown => "未知题型",
        }
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题干以便显示（最多40个字符）
        let preview = crate::utils::logging::truncate_text(&self.text, 40);
        write!(
            f,
            "[{}] {} (选项 {} 个, 答案 {:?})",
            self.question_type,
            preview,
            self.options.len(),
            self.answer
        )
    }
}

/// 一篇文档的解析结果（输出文件的根结构）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDocument {
    /// 来源文件名
    pub source: String,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_label() {
        assert_eq!(QuestionKind::from_label("单选题"), QuestionKind::SingleChoice);
        assert_eq!(QuestionKind::from_label(" 判断题 "), QuestionKind::TrueFalse);
        assert_eq!(QuestionKind::from_label("连线题"), QuestionKind::Unknown);
        assert_eq!(QuestionKind::TrueFalse.code(), Some(3));
        assert_eq!(QuestionKind::Unknown.code(), None);
    }

    #[test]
    fn test_serializes_type_field_name() {
        let q = Question {
            question_type: "判断题".to_string(),
            text: "地球是圆的".to_string(),
            options: vec![],
            answer: vec![JUDGE_TRUE.to_string()],
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "判断题");
        assert!(q.is_judgment());
        assert!(q.is_complete());
    }
}
