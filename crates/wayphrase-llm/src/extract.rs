use wayphrase_core::errors::GenerationError;
use wayphrase_core::phrase::Phrase;

/// Remove markdown code-fence wrapping the model tends to add despite the
/// JSON-only instruction (leading/trailing backtick runs, optional `json`
/// language tag).
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a model reply into the phrase list.
///
/// The reply must be a JSON object with a `phrases` array once fences are
/// stripped; anything else is [`GenerationError::MalformedResponse`]. Items
/// are taken as-is: per-field validation is left to rendering, which
/// tolerates absent optional fields.
pub fn parse_phrases(raw: &str) -> Result<Vec<Phrase>, GenerationError> {
    let cleaned = strip_code_fences(raw);

    let value: serde_json::Value = serde_json::from_str(&cleaned)
        .map_err(|e| GenerationError::MalformedResponse(format!("not valid JSON: {e}")))?;

    let phrases = value
        .get("phrases")
        .ok_or_else(|| GenerationError::MalformedResponse("missing \"phrases\" field".into()))?;

    if !phrases.is_array() {
        return Err(GenerationError::MalformedResponse(
            "\"phrases\" is not an array".into(),
        ));
    }

    serde_json::from_value(phrases.clone())
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid phrase item: {e}")))
}
