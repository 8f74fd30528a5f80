/// Prompt construction for the traveler's two cases: destinations inside the
/// home country get translation-only phrases, everywhere else gets the full
/// original/pronunciation/translation shape in the local language.

/// Fixed country-code → language table. Codes not listed fall back to the
/// configured fallback language.
const LANGUAGES: &[(&str, &str)] = &[
    ("JP", "Japanese"),
    ("US", "English"),
    ("GB", "English"),
    ("CA", "English"),
    ("AU", "English"),
    ("FR", "French"),
    ("CN", "Chinese"),
    ("ES", "Spanish"),
    ("DE", "German"),
    ("IT", "Italian"),
    ("VN", "Vietnamese"),
    ("TH", "Thai"),
];

#[derive(Clone, Debug)]
pub struct PromptConfig {
    /// The traveler's home country; destinations here use the home template.
    pub home_country: String,
    /// Language assumed when a country code is unknown or empty.
    pub fallback_language: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            home_country: "KR".to_string(),
            fallback_language: "English".to_string(),
        }
    }
}

/// Resolve the local language for an uppercase country code.
pub fn language_for<'a>(country_code: &str, fallback: &'a str) -> &'a str {
    LANGUAGES
        .iter()
        .find(|(code, _)| *code == country_code)
        .map(|(_, language)| *language)
        .unwrap_or(fallback)
}

/// Build the generation prompt for a place. `country_code` must already be
/// uppercase-normalized.
pub fn build_prompt(place_name: &str, country_code: &str, config: &PromptConfig) -> String {
    if country_code == config.home_country {
        home_prompt(place_name)
    } else {
        foreign_prompt(place_name, language_for(country_code, &config.fallback_language))
    }
}

fn home_prompt(place_name: &str) -> String {
    format!(
        "You are an AI assistant for a Korean traveler visiting \"{place_name}\" in South Korea.\n\
         Your task is to generate 5 useful Korean phrases for this specific location. \
         For example, phrases for ordering unique menu items at a famous cafe.\n\
         You must respond ONLY with a JSON object in the following format, \
         with no other text or explanations before or after the JSON:\n\
         {{\"phrases\": [{{\"korean\": \"...\"}}]}}"
    )
}

fn foreign_prompt(place_name: &str, language: &str) -> String {
    format!(
        "You are an AI assistant for a Korean traveler visiting \"{place_name}\". \
         The local language is {language}.\n\
         Your task is to generate 5 useful {language} phrases for this specific location.\n\
         Use your search tool to find information about this place, such as popular menu items, \
         products, or activities.\n\
         For each phrase, provide:\n\
         1. The original sentence in {language} (key: \"original\").\n\
         2. Its pronunciation written in Korean Hangul (key: \"pronunciation\").\n\
         3. The Korean translation (key: \"korean\").\n\
         You must respond ONLY with a JSON object in the following format, \
         with no other text or explanations before or after the JSON:\n\
         {{\"phrases\": [{{\"original\": \"...\", \"pronunciation\": \"...\", \"korean\": \"...\"}}]}}"
    )
}
