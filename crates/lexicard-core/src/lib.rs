pub mod library;
pub mod quiz;
pub mod runner;

pub use library::{LibraryError, WordLibrary};
pub use quiz::{AnswerFeedback, FetchOutcome, QuizSession, SkipReason, Step};
pub use runner::{QuizOutcome, run_to_question};
