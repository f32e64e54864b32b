use lexicard_types::WordDetails;
use lexicard_provider::ProviderError;

/// Strips the Markdown code fences the model sometimes wraps around its
/// JSON reply, tolerating an optional language tag on the opening fence.
pub fn strip_reply_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };

    let body = match rest.split_once('\n') {
        Some((tag, body)) if tag.chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => rest,
    };

    body.trim()
}

/// Parses and validates a structured reply into a [`WordDetails`] bundle.
///
/// The five mandatory keys must be present as strings; the optional ones may
/// be absent or null.
pub fn parse_details(raw: &str) -> Result<WordDetails, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(strip_reply_fences(raw))
        .map_err(|e| ProviderError::Malformed(format!("reply is not valid JSON: {e}")))?;

    Ok(WordDetails {
        translation: required(&value, "translation")?,
        definition: required(&value, "definition")?,
        example_sentence: required(&value, "exampleSentence")?,
        target_language_example_sentence: optional(&value, "targetLanguageExampleSentence"),
        english_pronunciation: required(&value, "englishPronunciation")?,
        target_language_pronunciation: required(&value, "targetLanguagePronunciation")?,
        english_pronunciation_audio: optional(&value, "englishPronunciationAudio"),
        target_language_pronunciation_audio: optional(&value, "targetLanguagePronunciationAudio"),
    })
}

fn required(value: &serde_json::Value, key: &str) -> Result<String, ProviderError> {
    value[key]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ProviderError::Malformed(format!("missing mandatory field `{key}`")))
}

fn optional(value: &serde_json::Value, key: &str) -> Option<String> {
    value[key].as_str().map(str::to_owned)
}
