use arboard::Clipboard;

/// Returns the currently selected text, or None when nothing usable is
/// there. Text selections land on the clipboard on the hosts we support,
/// so this is a single read, no watching.
pub fn capture_selected_text() -> Result<Option<String>, anyhow::Error> {
    let mut clipboard = Clipboard::new()?;

    match clipboard.get_text() {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        // An empty or non-text clipboard is "no selection", not an error.
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
