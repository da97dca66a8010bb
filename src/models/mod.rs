pub mod loaders;
pub mod question;

pub use loaders::{load_all_text_files, load_text_source, TextSource};
pub use question::{Question, QuestionDocument, QuestionKind};
