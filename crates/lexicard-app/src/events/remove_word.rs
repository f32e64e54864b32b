use lexicard_types::AppEvent;

use super::{AppCtx, persist_library};

/// Removes by canonical word text, falling back to an id lookup.
pub async fn handle_remove_word(ctx: &mut AppCtx, word: &str) -> anyhow::Result<()> {
    let id = ctx
        .library
        .find_by_word(word)
        .map(|e| e.id.clone())
        .or_else(|| ctx.library.get(word).map(|e| e.id.clone()));

    match id.and_then(|id| ctx.library.remove(&id)) {
        Some(removed) => {
            tracing::info!(word = %removed.original_word, "word removed");
            persist_library(ctx).await;
            ctx.to_ui
                .send(AppEvent::WordRemoved(removed.original_word))
                .await?;
        }
        None => {
            ctx.to_ui
                .send(AppEvent::Notice(format!(
                    "\"{word}\" is not in your library."
                )))
                .await?;
        }
    }

    Ok(())
}
