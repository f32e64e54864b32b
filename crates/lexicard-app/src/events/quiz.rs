use std::time::Duration;

use lexicard_core::{QuizOutcome, QuizSession, run_to_question};
use lexicard_types::{AppEvent, SessionId};

use super::{AppCtx, persist_library};

/// Holds the active quiz session between events. There is at most one; a
/// restart replaces it, and its [`SessionId`] is what keeps delayed events
/// from a previous run out (the epoch guard).
pub struct QuizRunner {
    session: Option<QuizSession>,
}

impl QuizRunner {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        self.session.as_mut()
    }
}

impl Default for QuizRunner {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn handle_start_quiz(ctx: &mut AppCtx) -> anyhow::Result<()> {
    if ctx.library.is_empty() {
        ctx.to_ui
            .send(AppEvent::QuizUnavailable(
                "Add words to your library to start a quiz!".to_string(),
            ))
            .await?;
        return Ok(());
    }

    let session = QuizSession::start(&ctx.library, ctx.target, &mut rand::thread_rng());
    tracing::info!(session = %session.id(), words = session.len(), "quiz started");

    // Replacing the session invalidates any delayed advancement still in
    // flight for the previous one.
    ctx.quiz.session = Some(session);

    if ctx.quiz.session.as_ref().is_some_and(|s| s.is_empty()) {
        ctx.quiz.session = None;
        ctx.to_ui
            .send(AppEvent::QuizUnavailable(
                "No valid words available for a quiz.".to_string(),
            ))
            .await?;
        return Ok(());
    }

    drive_session(ctx).await
}

pub async fn handle_submit_answer(ctx: &mut AppCtx, text: &str) -> anyhow::Result<()> {
    let Some(session) = ctx.quiz.session.as_mut() else {
        ctx.to_ui
            .send(AppEvent::Notice(
                "No quiz is running; type `quiz` to start one.".to_string(),
            ))
            .await?;
        return Ok(());
    };

    let Some(feedback) = session.submit_answer(text) else {
        ctx.to_ui
            .send(AppEvent::Notice("No open question to answer.".to_string()))
            .await?;
        return Ok(());
    };

    ctx.to_ui
        .send(AppEvent::QuizFeedback {
            correct: feedback.correct,
            correct_answer: feedback.correct_answer,
            score: session.score(),
            answered: session.answered_count(),
        })
        .await?;

    // The feedback stays on screen for a moment; the advancement comes back
    // through the loop tagged with the session it belongs to.
    let session_id = session.id();
    let delay = {
        let config = ctx.state.config.read().await;
        Duration::from_millis(config.quiz.feedback_delay_ms)
    };
    let loopback = ctx.loopback.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = loopback
            .send(AppEvent::AdvanceQuiz {
                session: session_id,
            })
            .await;
    });

    Ok(())
}

pub async fn handle_advance_quiz(ctx: &mut AppCtx, session_id: SessionId) -> anyhow::Result<()> {
    match ctx.quiz.session_mut() {
        Some(session) if session.id() == session_id => session.advance(),
        _ => {
            tracing::debug!(%session_id, "discarding advancement for a stale session");
            return Ok(());
        }
    }

    drive_session(ctx).await
}

/// Runs the sequencer to its next resting point and reports it to the UI.
async fn drive_session(ctx: &mut AppCtx) -> anyhow::Result<()> {
    let Some(mut session) = ctx.quiz.session.take() else {
        return Ok(());
    };

    ctx.to_ui
        .send(AppEvent::Loading("Preparing question...".to_string()))
        .await?;

    let (outcome, dirty) =
        run_to_question(&mut session, &mut ctx.library, ctx.provider.as_ref()).await;

    if dirty {
        persist_library(ctx).await;
    }

    match outcome {
        QuizOutcome::Question { question, number } => {
            ctx.quiz.session = Some(session);
            ctx.to_ui
                .send(AppEvent::QuizQuestionReady { question, number })
                .await?;
        }
        QuizOutcome::Finished(summary) => {
            tracing::info!(session = %session.id(), ?summary, "quiz finished");
            ctx.quiz.session = None;
            ctx.to_ui.send(AppEvent::QuizFinished(summary)).await?;
        }
        QuizOutcome::NoQuestions => {
            ctx.quiz.session = None;
            ctx.to_ui
                .send(AppEvent::QuizUnavailable(
                    "No valid words available for a quiz.".to_string(),
                ))
                .await?;
        }
    }

    Ok(())
}
