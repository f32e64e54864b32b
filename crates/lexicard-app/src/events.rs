use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexicard_core::WordLibrary;
use lexicard_provider::DetailProvider;
use lexicard_storage::{KeyValueStore, load_target_language, load_words, save_words};
use lexicard_types::{AppEvent, Language};

use crate::state::AppState;

pub mod add_word;
pub mod capture_word;
pub mod quiz;
pub mod remove_word;
pub mod word_details;

use quiz::QuizRunner;

/// Everything the intent handlers share. The event loop is the single
/// writer of the library; each handler performs its read-modify-write and
/// persist as one step before the next event is taken.
pub struct AppCtx {
    pub state: Arc<AppState>,
    pub store: Arc<dyn KeyValueStore>,
    pub provider: Arc<dyn DetailProvider>,
    pub to_ui: AsyncSender<AppEvent>,
    /// Sender back into this very loop, for delayed quiz advancement.
    pub loopback: AsyncSender<AppEvent>,
    pub library: WordLibrary,
    pub target: Language,
    pub quiz: QuizRunner,
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    loopback_tx: AsyncSender<AppEvent>,
    provider: Arc<dyn DetailProvider>,
) -> anyhow::Result<()> {
    // Storage backend by host capability.
    let store = {
        let config = state.config.read().await;
        lexicard_storage::open_default(&config.storage.data_dir)
    };

    let library = match load_words(store.as_ref()).await {
        Ok(entries) => WordLibrary::from_entries(entries),
        Err(e) => {
            tracing::error!("could not load saved words: {e}");
            WordLibrary::new()
        }
    };

    let target = match load_target_language(store.as_ref()).await {
        Ok(Some(language)) => language,
        Ok(None) => state.config.read().await.default_language,
        Err(e) => {
            tracing::error!("could not load language preference: {e}");
            state.config.read().await.default_language
        }
    };

    let mut ctx = AppCtx {
        state,
        store,
        provider,
        to_ui: app_to_ui_tx,
        loopback: loopback_tx,
        library,
        target,
        quiz: QuizRunner::new(),
    };

    tracing::info!(
        words = ctx.library.len(),
        target = %ctx.target,
        "event loop started"
    );

    loop {
        let event = ui_to_app_rx.recv().await?;

        if matches!(event, AppEvent::Quit) {
            tracing::info!("quit requested");
            return Ok(());
        }

        handle_event(&mut ctx, event).await?;
    }
}

pub(crate) async fn handle_event(ctx: &mut AppCtx, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::AddWord(word) => add_word::handle_add_word(ctx, &word).await?,
        AppEvent::CaptureWord => capture_word::handle_capture_word(ctx).await?,
        AppEvent::RemoveWord(word) => remove_word::handle_remove_word(ctx, &word).await?,
        AppEvent::ShowDetails(word) => word_details::handle_show_details(ctx, &word).await?,
        AppEvent::ListWords => {
            let entries = ctx.library.entries().to_vec();
            ctx.to_ui.send(AppEvent::Library(entries)).await?;
        }
        AppEvent::SetLanguage(language) => {
            ctx.target = language;
            if let Err(e) =
                lexicard_storage::save_target_language(ctx.store.as_ref(), language).await
            {
                tracing::error!("failed to persist language preference: {e}");
            }
            ctx.to_ui.send(AppEvent::LanguageChanged(language)).await?;
        }
        AppEvent::StartQuiz => quiz::handle_start_quiz(ctx).await?,
        AppEvent::SubmitAnswer(text) => quiz::handle_submit_answer(ctx, &text).await?,
        AppEvent::AdvanceQuiz { session } => quiz::handle_advance_quiz(ctx, session).await?,
        AppEvent::Quit => {}
        // App-to-UI updates never arrive here.
        other => tracing::debug!("ignoring non-intent event: {other:?}"),
    }

    Ok(())
}

/// Whole-snapshot persistence after a library mutation. Failures are
/// logged; the in-memory state stays authoritative for the session.
pub async fn persist_library(ctx: &AppCtx) {
    if let Err(e) = save_words(ctx.store.as_ref(), ctx.library.entries()).await {
        tracing::error!("failed to persist word library: {e}");
    }
}
