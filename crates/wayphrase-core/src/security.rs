use secrecy::{ExposeSecret, SecretString};

/// Wraps the user-supplied Gemini key with secrecy protection (zeroized on
/// drop, redacted in Debug). Held in memory only, never written to disk,
/// never sent anywhere except the model provider.
#[derive(Clone)]
pub struct ApiKey(pub SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// An empty key is treated as no credential at all.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
