pub mod event;
pub mod types;

pub use event::AppEvent;
pub use types::{
    Language, QuizQuestion, QuizSummary, SessionId, WordDetails, WordEntry, now_millis,
};
