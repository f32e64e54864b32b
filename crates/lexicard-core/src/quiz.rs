use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use lexicard_types::{Language, QuizQuestion, QuizSummary, SessionId, WordDetails, WordEntry};
use rand::Rng;

use crate::library::WordLibrary;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// What the sequencer needs from the caller next.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// The filtered library was empty at start; terminal, not an error.
    NoQuestions,
    /// The candidate at `index` lacks a usable detail bundle; the caller
    /// must perform exactly one fetch and report back via
    /// [`QuizSession::resolve_fetch`]. Re-calling [`QuizSession::next_step`]
    /// re-yields the same request; the scan never moves past an outstanding
    /// fetch.
    NeedDetails { index: usize, word: String },
    /// An answerable question is open.
    Question(QuizQuestion),
    /// The scan exhausted the snapshot.
    Finished(QuizSummary),
}

/// Result of the caller's detail fetch for one candidate.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(WordDetails),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    BlankWord,
    FetchFailed(String),
    MissingTranslation,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BlankWord => write!(f, "blank word"),
            SkipReason::FetchFailed(e) => write!(f, "detail fetch failed: {e}"),
            SkipReason::MissingTranslation => write!(f, "no translation in detail bundle"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: String,
}

#[derive(Debug)]
struct CurrentQuestion {
    index: usize,
    question: QuizQuestion,
    /// A question, once answered, is immutably closed.
    closed: bool,
}

/// One quiz run over a shuffled snapshot of the word library.
///
/// Pure state machine: fetches and feedback delays belong to the caller
/// (see [`crate::runner`]), which keeps every transition synchronously
/// testable. The snapshot is fixed at start; later library mutations do not
/// affect it.
#[derive(Debug)]
pub struct QuizSession {
    id: SessionId,
    target: Language,
    order: Vec<WordEntry>,
    /// Next snapshot index the scan will examine; monotonically
    /// non-decreasing for the whole session.
    cursor: usize,
    /// Index with an outstanding detail fetch, if any.
    awaiting: Option<usize>,
    current: Option<CurrentQuestion>,
    finished: bool,
    no_questions: bool,
    score: u32,
    answered: u32,
    skipped: u32,
}

impl QuizSession {
    /// Snapshots the library, drops entries with blank canonical text and
    /// produces a uniformly random permutation of the rest.
    pub fn start(library: &WordLibrary, target: Language, rng: &mut impl Rng) -> Self {
        let mut order: Vec<WordEntry> = library
            .entries()
            .iter()
            .filter(|e| !e.original_word.trim().is_empty())
            .cloned()
            .collect();
        shuffle(&mut order, rng);

        let no_questions = order.is_empty();
        Self {
            id: SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed)),
            target,
            order,
            cursor: 0,
            awaiting: None,
            current: None,
            finished: false,
            no_questions,
            score: 0,
            answered: 0,
            skipped: 0,
        }
    }

    /// Advances the scan until it needs outside help or reaches a terminal
    /// state. Never performs I/O itself.
    pub fn next_step(&mut self) -> Step {
        if self.no_questions {
            return Step::NoQuestions;
        }
        if self.finished {
            return Step::Finished(self.summary());
        }
        if let Some(current) = &self.current {
            return Step::Question(current.question.clone());
        }
        if let Some(index) = self.awaiting {
            return Step::NeedDetails {
                index,
                word: self.order[index].original_word.clone(),
            };
        }

        while self.cursor < self.order.len() {
            let index = self.cursor;

            if self.order[index].original_word.trim().is_empty() {
                // Filtered at start; guards against snapshot drift anyway.
                self.skip(index, SkipReason::BlankWord);
                continue;
            }

            if let Some(details) = self.order[index].details_for(self.target)
                && !details.translation.trim().is_empty()
            {
                let question = QuizQuestion {
                    word_to_guess: details.translation.clone(),
                    correct_answer: self.order[index].original_word.clone(),
                };
                self.current = Some(CurrentQuestion {
                    index,
                    question: question.clone(),
                    closed: false,
                });
                return Step::Question(question);
            }

            self.awaiting = Some(index);
            return Step::NeedDetails {
                index,
                word: self.order[index].original_word.clone(),
            };
        }

        self.finished = true;
        Step::Finished(self.summary())
    }

    /// Reports the outcome of the fetch requested for `index`.
    ///
    /// A successful bundle is installed into the snapshot entry and the
    /// updated entry is returned for write-through persistence; the next
    /// [`Self::next_step`] then turns it into a question. Failures count
    /// the entry as skipped and move the scan on; the entry is never
    /// retried this session. Outcomes for an index that is not awaited
    /// (stale or duplicated resolutions) are discarded.
    pub fn resolve_fetch(&mut self, index: usize, outcome: FetchOutcome) -> Option<WordEntry> {
        if self.awaiting != Some(index) {
            tracing::debug!(index, "discarding fetch outcome for a non-awaited entry");
            return None;
        }
        self.awaiting = None;

        match outcome {
            FetchOutcome::Fetched(details) if !details.translation.trim().is_empty() => {
                let entry = &mut self.order[index];
                entry.details_by_language.insert(self.target, details);
                Some(entry.clone())
            }
            FetchOutcome::Fetched(_) => {
                self.skip(index, SkipReason::MissingTranslation);
                None
            }
            FetchOutcome::Skipped(reason) => {
                self.skip(index, reason);
                None
            }
        }
    }

    fn skip(&mut self, index: usize, reason: SkipReason) {
        tracing::warn!(
            word = %self.order[index].original_word,
            %reason,
            "skipping word during quiz"
        );
        self.skipped += 1;
        self.cursor = index + 1;
    }

    /// Scores the open question. Comparison trims surrounding whitespace and
    /// lowercases both sides; exact match, no partial credit. Returns None
    /// when there is no open question or it was already answered.
    pub fn submit_answer(&mut self, user_text: &str) -> Option<AnswerFeedback> {
        let current = self.current.as_mut()?;
        if current.closed {
            return None;
        }
        current.closed = true;

        let correct = normalize(user_text) == normalize(&current.question.correct_answer);
        self.answered += 1;
        if correct {
            self.score += 1;
        }

        Some(AnswerFeedback {
            correct,
            correct_answer: current.question.correct_answer.clone(),
        })
    }

    /// Moves past an answered question so the scan can resume. The caller
    /// owns the feedback delay; this is a no-op until the question is
    /// closed.
    pub fn advance(&mut self) {
        if let Some(current) = &self.current
            && current.closed
        {
            self.cursor = current.index + 1;
            self.current = None;
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn target(&self) -> Language {
        self.target
    }

    /// Size of the shuffled snapshot.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answered_count(&self) -> u32 {
        self.answered
    }

    pub fn skipped_count(&self) -> u32 {
        self.skipped
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            score: self.score,
            answered: self.answered,
            skipped: self.skipped,
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// In-place Fisher–Yates: swap from the last index down, partner drawn
/// uniformly from [0, i], so every permutation is equally likely.
fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use lexicard_types::WordDetails;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn details(translation: &str) -> WordDetails {
        WordDetails {
            translation: translation.to_string(),
            definition: "def".to_string(),
            example_sentence: "example".to_string(),
            target_language_example_sentence: None,
            english_pronunciation: "pron".to_string(),
            target_language_pronunciation: "pron".to_string(),
            english_pronunciation_audio: None,
            target_language_pronunciation_audio: None,
        }
    }

    fn library_with_details(words: &[(&str, &str)]) -> WordLibrary {
        let entries = words
            .iter()
            .map(|(word, translation)| {
                WordEntry::new(*word).with_details(Language::Spanish, details(translation))
            })
            .collect();
        WordLibrary::from_entries(entries)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn empty_library_yields_no_questions_without_any_fetch() {
        let library = WordLibrary::new();
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        assert_eq!(session.next_step(), Step::NoQuestions);
        assert_eq!(session.summary(), QuizSummary::default());
    }

    #[test]
    fn blank_only_library_yields_no_questions() {
        let mut blank = WordEntry::new("x");
        blank.original_word = "   ".to_string();
        let library = WordLibrary::from_entries(vec![blank]);

        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());
        assert_eq!(session.next_step(), Step::NoQuestions);
    }

    #[test]
    fn shuffled_order_is_a_permutation_of_the_filtered_library() {
        let pairs: Vec<(String, String)> = (0..20)
            .map(|i| (format!("word{i}"), format!("palabra{i}")))
            .collect();
        let borrowed: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(w, t)| (w.as_str(), t.as_str()))
            .collect();
        let library = library_with_details(&borrowed);

        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        let mut visited = Vec::new();
        loop {
            match session.next_step() {
                Step::Question(q) => {
                    visited.push(q.correct_answer.clone());
                    session.submit_answer(&q.correct_answer);
                    session.advance();
                }
                Step::Finished(_) => break,
                other => panic!("unexpected step: {other:?}"),
            }
        }

        assert_eq!(visited.len(), 20);
        let unique: HashSet<&String> = visited.iter().collect();
        assert_eq!(unique.len(), 20);
        for (word, _) in &pairs {
            assert!(visited.contains(word));
        }
    }

    #[test]
    fn questions_pair_translation_with_canonical_word() {
        let library = library_with_details(&[("Hola", "Hola")]);
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        match session.next_step() {
            Step::Question(q) => {
                assert_eq!(q.word_to_guess, "Hola");
                assert_eq!(q.correct_answer, "Hola");
            }
            other => panic!("unexpected step: {other:?}"),
        }

        let feedback = session.submit_answer("hola").unwrap();
        assert!(feedback.correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn answer_matching_ignores_case_and_surrounding_whitespace() {
        let library = library_with_details(&[("Casa", "casa")]);
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());
        session.next_step();

        let feedback = session.submit_answer("  cAsA ").unwrap();
        assert!(feedback.correct);
    }

    #[test]
    fn wrong_answer_counts_but_does_not_score() {
        let library = library_with_details(&[("house", "casa")]);
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());
        session.next_step();

        let feedback = session.submit_answer("perro").unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, "house");
        assert_eq!(session.score(), 0);
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn a_question_once_answered_is_closed() {
        let library = library_with_details(&[("house", "casa")]);
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());
        session.next_step();

        // First submission lands; the second is rejected.
        assert!(session.submit_answer("house").is_some());
        assert!(session.submit_answer("house").is_none());
        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn advance_is_a_noop_while_the_question_is_open() {
        let library = library_with_details(&[("house", "casa")]);
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());
        session.next_step();

        session.advance();
        assert!(matches!(session.next_step(), Step::Question(_)));
    }

    #[test]
    fn missing_details_request_a_fetch_and_refuse_to_move_on() {
        let library = {
            let mut l = WordLibrary::new();
            l.add("house").unwrap();
            l
        };
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        let first = session.next_step();
        let Step::NeedDetails { index, word } = first else {
            panic!("expected NeedDetails, got {first:?}");
        };
        assert_eq!(word, "house");

        // Re-entrant call re-yields the same outstanding request.
        assert_eq!(session.next_step(), Step::NeedDetails { index, word });
    }

    #[test]
    fn fetched_details_become_the_next_question_and_are_returned_for_write_through() {
        let mut library = WordLibrary::new();
        library.add("house").unwrap();
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        let Step::NeedDetails { index, .. } = session.next_step() else {
            panic!("expected NeedDetails");
        };

        let updated = session
            .resolve_fetch(index, FetchOutcome::Fetched(details("casa")))
            .expect("updated entry for write-through");
        assert!(updated.details_for(Language::Spanish).is_some());

        match session.next_step() {
            Step::Question(q) => assert_eq!(q.word_to_guess, "casa"),
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn failed_fetch_skips_silently_and_ends_in_results() {
        let mut library = WordLibrary::new();
        library.add("X").unwrap();
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        let Step::NeedDetails { index, .. } = session.next_step() else {
            panic!("expected NeedDetails");
        };
        session.resolve_fetch(
            index,
            FetchOutcome::Skipped(SkipReason::FetchFailed("boom".to_string())),
        );

        match session.next_step() {
            Step::Finished(summary) => {
                assert_eq!(summary.answered, 0);
                assert_eq!(summary.skipped, 1);
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn a_bundle_without_translation_counts_as_skipped() {
        let mut library = WordLibrary::new();
        library.add("house").unwrap();
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        let Step::NeedDetails { index, .. } = session.next_step() else {
            panic!("expected NeedDetails");
        };
        assert!(
            session
                .resolve_fetch(index, FetchOutcome::Fetched(details("  ")))
                .is_none()
        );
        assert_eq!(session.skipped_count(), 1);
    }

    #[test]
    fn stale_fetch_outcomes_are_discarded() {
        let library = library_with_details(&[("house", "casa")]);
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());
        session.next_step();

        // Nothing is awaited; a late resolution must not touch the session.
        assert!(
            session
                .resolve_fetch(0, FetchOutcome::Fetched(details("perro")))
                .is_none()
        );
        assert_eq!(session.skipped_count(), 0);
        match session.next_step() {
            Step::Question(q) => assert_eq!(q.word_to_guess, "casa"),
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn skipped_entries_are_never_retried() {
        let mut library = WordLibrary::new();
        library.add("beta").unwrap();
        library.add("alpha").unwrap();
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        let mut seen = Vec::new();
        loop {
            match session.next_step() {
                Step::NeedDetails { index, word } => {
                    seen.push(word);
                    session.resolve_fetch(
                        index,
                        FetchOutcome::Skipped(SkipReason::FetchFailed("down".to_string())),
                    );
                }
                Step::Finished(summary) => {
                    assert_eq!(summary.skipped, 2);
                    break;
                }
                other => panic!("unexpected step: {other:?}"),
            }
        }

        assert_eq!(seen.len(), 2);
        assert_ne!(seen[0], seen[1]);
    }

    #[test]
    fn counters_never_exceed_snapshot_size() {
        let library = library_with_details(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        loop {
            match session.next_step() {
                Step::Question(q) => {
                    session.submit_answer(&q.correct_answer);
                    session.advance();
                }
                Step::Finished(summary) => {
                    assert!(summary.answered + summary.skipped <= session.len() as u32);
                    assert_eq!(summary.answered, 3);
                    break;
                }
                other => panic!("unexpected step: {other:?}"),
            }
        }
    }

    #[test]
    fn restarting_resets_counters_and_issues_a_new_session_id() {
        let library = library_with_details(&[("house", "casa")]);
        let mut rng = rng();

        let mut first = QuizSession::start(&library, Language::Spanish, &mut rng);
        first.next_step();
        first.submit_answer("house");
        assert_eq!(first.score(), 1);

        let second = QuizSession::start(&library, Language::Spanish, &mut rng);
        assert_eq!(second.score(), 0);
        assert_eq!(second.answered_count(), 0);
        assert_eq!(second.skipped_count(), 0);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn snapshot_is_not_live() {
        let mut library = WordLibrary::new();
        let id = library.add("house").unwrap().id.clone();

        let mut session = QuizSession::start(&library, Language::Spanish, &mut rng());

        // Mutating the library after start does not change the snapshot.
        library.remove(&id);
        assert!(library.is_empty());
        assert_eq!(session.len(), 1);
        assert!(matches!(session.next_step(), Step::NeedDetails { .. }));
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let mut a: Vec<u32> = (0..10).collect();
        let mut b: Vec<u32> = (0..10).collect();
        shuffle(&mut a, &mut StdRng::seed_from_u64(7));
        shuffle(&mut b, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<u32>>());
    }
}
