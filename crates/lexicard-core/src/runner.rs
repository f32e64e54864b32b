use lexicard_provider::DetailProvider;
use lexicard_types::{QuizQuestion, QuizSummary};

use crate::library::WordLibrary;
use crate::quiz::{FetchOutcome, QuizSession, SkipReason, Step};

/// Where the session landed after driving it to the next resting point.
#[derive(Debug, PartialEq)]
pub enum QuizOutcome {
    Question { question: QuizQuestion, number: u32 },
    Finished(QuizSummary),
    NoQuestions,
}

/// Drives the session until a question is ready or the session ends,
/// performing the detail fetches sequentially, one candidate at a time.
///
/// Successful fetches are written through to the library before the scan
/// proceeds; failures are absorbed, logged and counted as skips. Returns
/// the landing point plus whether the library was mutated, so the caller
/// can persist the snapshot.
pub async fn run_to_question(
    session: &mut QuizSession,
    library: &mut WordLibrary,
    provider: &dyn DetailProvider,
) -> (QuizOutcome, bool) {
    let mut dirty = false;

    loop {
        match session.next_step() {
            Step::NoQuestions => return (QuizOutcome::NoQuestions, dirty),
            Step::Finished(summary) => return (QuizOutcome::Finished(summary), dirty),
            Step::Question(question) => {
                let number = session.answered_count() + 1;
                return (QuizOutcome::Question { question, number }, dirty);
            }
            Step::NeedDetails { index, word } => {
                match provider.fetch(&word, session.target()).await {
                    Ok(details) => {
                        if let Some(updated) =
                            session.resolve_fetch(index, FetchOutcome::Fetched(details))
                        {
                            // Write-through before moving on; persistence of
                            // the snapshot is the caller's step.
                            library.update(updated);
                            dirty = true;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(word = %word, error = %e, "detail fetch failed, skipping word");
                        session.resolve_fetch(
                            index,
                            FetchOutcome::Skipped(SkipReason::FetchFailed(e.to_string())),
                        );
                    }
                }
            }
        }
    }
}
