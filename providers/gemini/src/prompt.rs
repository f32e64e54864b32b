use lexicard_types::Language;

/// Builds the structured-details prompt for one English word.
///
/// The model is asked for a JSON object; [`crate::reply::parse_details`]
/// validates the keys listed here.
pub fn build_prompt(word: &str, target: Language) -> String {
    format!(
        r#"For the English word "{word}", provide the following information:
1. A concise definition of the English word.
2. An example sentence using the English word.
3. A simple phonetic pronunciation guide for the English word (e.g., using common phonetic notation like IPA or a simplified version).
4. Its translation into {target}.
5. An example sentence using the {target} translation.
6. A simple phonetic pronunciation guide for the {target} translation.
7. Optionally, base64 encoded audio data (e.g., MP3 or WAV) for the English pronunciation of "{word}".
8. Optionally, base64 encoded audio data (e.g., MP3 or WAV) for the {target} pronunciation of the translated word.

Return the response as a JSON object with the following keys:
"definition" (string),
"exampleSentence" (string, English),
"englishPronunciation" (string),
"translation" (string, {target}),
"targetLanguageExampleSentence" (string, {target}),
"targetLanguagePronunciation" (string),
"englishPronunciationAudio" (string, optional, base64 audio data),
"targetLanguagePronunciationAudio" (string, optional, base64 audio data).
Ensure the JSON is valid. If audio data cannot be generated, omit the audio keys or set them to null."#
    )
}
