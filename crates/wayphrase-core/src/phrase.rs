use serde::{Deserialize, Serialize};

/// One generated utterance tied to a place.
///
/// Two shapes share this struct. Home-country phrases carry only the
/// translation; foreign phrases also carry the original sentence and a
/// Hangul pronunciation guide. Model output is accepted as-is; absent
/// fields deserialize to their defaults so rendering can tolerate them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Phrase {
    /// Sentence in the local language. Absent for home-country phrases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,

    /// Pronunciation of `original` written in Hangul.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,

    /// Korean translation. The model replies with the key `korean`.
    #[serde(rename = "korean", default)]
    pub translation: String,
}

impl Phrase {
    /// Whether this is the foreign-locale shape (original text present).
    pub fn is_foreign(&self) -> bool {
        self.original.is_some()
    }
}
