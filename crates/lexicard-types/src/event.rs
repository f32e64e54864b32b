use crate::types::{Language, QuizQuestion, QuizSummary, SessionId, WordEntry};

/// Events flowing between the UI loop and the app event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI intents
    AddWord(String),
    CaptureWord,
    RemoveWord(String),
    ShowDetails(String),
    ListWords,
    SetLanguage(Language),
    StartQuiz,
    SubmitAnswer(String),
    /// Delayed advancement after answer feedback; carries the session it was
    /// scheduled for so a restarted quiz can discard it.
    AdvanceQuiz { session: SessionId },
    Quit,

    // App updates
    WordAdded(WordEntry),
    WordRemoved(String),
    Library(Vec<WordEntry>),
    Details {
        entry: Box<WordEntry>,
        language: Language,
    },
    LanguageChanged(Language),
    Loading(String),
    QuizQuestionReady {
        question: QuizQuestion,
        number: u32,
    },
    QuizFeedback {
        correct: bool,
        correct_answer: String,
        score: u32,
        answered: u32,
    },
    QuizFinished(QuizSummary),
    QuizUnavailable(String),
    Notice(String),
}
