use lexicard_types::AppEvent;

use super::{AppCtx, persist_library};

/// Shows the detail bundle for a word, fetching and writing it through on
/// first use for the current target language.
pub async fn handle_show_details(ctx: &mut AppCtx, word: &str) -> anyhow::Result<()> {
    let Some(entry) = ctx.library.find_by_word(word).cloned() else {
        ctx.to_ui
            .send(AppEvent::Notice(format!(
                "\"{word}\" is not in your library."
            )))
            .await?;
        return Ok(());
    };

    if entry.details_for(ctx.target).is_some() {
        ctx.to_ui
            .send(AppEvent::Details {
                entry: Box::new(entry),
                language: ctx.target,
            })
            .await?;
        return Ok(());
    }

    ctx.to_ui
        .send(AppEvent::Loading("Fetching word details...".to_string()))
        .await?;

    match ctx.provider.fetch(&entry.original_word, ctx.target).await {
        Ok(details) => {
            let updated = entry.with_details(ctx.target, details);
            ctx.library.update(updated.clone());
            persist_library(ctx).await;
            ctx.to_ui
                .send(AppEvent::Details {
                    entry: Box::new(updated),
                    language: ctx.target,
                })
                .await?;
        }
        Err(e) => {
            tracing::error!(word = %entry.original_word, "detail fetch failed: {e}");
            ctx.to_ui
                .send(AppEvent::Notice(format!("Failed to load word details: {e}")))
                .await?;
        }
    }

    Ok(())
}
