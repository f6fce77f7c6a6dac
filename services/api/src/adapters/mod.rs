pub mod db;
pub mod in_memory;
pub mod quiz_llm;
pub mod tutor_llm;

pub use db::DbAdapter;
pub use in_memory::InMemoryDb;
pub use quiz_llm::OpenAiQuizAdapter;
pub use tutor_llm::OpenAiTutorAdapter;
