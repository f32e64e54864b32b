use lexicard_types::AppEvent;

use super::{AppCtx, persist_library};

pub async fn handle_add_word(ctx: &mut AppCtx, word: &str) -> anyhow::Result<()> {
    match ctx.library.add(word) {
        Ok(entry) => {
            let entry = entry.clone();
            tracing::info!(word = %entry.original_word, "word added");
            persist_library(ctx).await;
            ctx.to_ui.send(AppEvent::WordAdded(entry)).await?;
        }
        Err(e) => {
            ctx.to_ui.send(AppEvent::Notice(e.to_string())).await?;
        }
    }

    Ok(())
}
