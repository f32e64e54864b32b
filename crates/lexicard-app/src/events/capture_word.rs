use lexicard_types::AppEvent;

use super::{AppCtx, add_word};

pub async fn handle_capture_word(ctx: &mut AppCtx) -> anyhow::Result<()> {
    match lexicard_io::capture_selected_text() {
        Ok(Some(text)) => add_word::handle_add_word(ctx, &text).await?,
        Ok(None) => {
            ctx.to_ui
                .send(AppEvent::Notice("No text selected to capture.".to_string()))
                .await?;
        }
        Err(e) => {
            tracing::error!("capture failed: {e}");
            ctx.to_ui
                .send(AppEvent::Notice(format!("Failed to capture text: {e}")))
                .await?;
        }
    }

    Ok(())
}
