/// Typed error hierarchy for phrase generation.
/// Every failure is terminal for its own request; no layer retries.
#[derive(Clone, Debug, thiserror::Error)]
pub enum GenerationError {
    /// No credential was supplied; no upstream call may be issued.
    #[error("credential is required")]
    MissingCredential,

    /// The provider rejected the credential (invalid key, permission denied).
    #[error("credential rejected: {0}")]
    AuthRejected(String),

    /// Any other upstream failure: network, quota, timeout, 5xx.
    #[error("upstream call failed: {0}")]
    Upstream(String),

    /// The model reply was not the expected `{"phrases": [...]}` payload.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::AuthRejected(_))
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::AuthRejected(_) => "auth_rejected",
            Self::Upstream(_) => "upstream",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    /// The message shown to the traveler. Matches the product's Korean copy.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => "Gemini API 키를 먼저 입력하고 저장해주세요.",
            Self::AuthRejected(_) => {
                "제공된 Gemini API 키가 유효하지 않습니다. 키를 확인하고 다시 시도해 주세요."
            }
            Self::Upstream(_) => "회화 생성에 실패했습니다. API 키와 네트워크 연결을 확인해주세요.",
            Self::MalformedResponse(_) => {
                "AI가 유효하지 않은 형식의 응답을 반환했습니다. 다시 시도해 주세요."
            }
        }
    }

    /// Classify an HTTP status into the appropriate variant.
    ///
    /// The Gemini API reports a bad key as 400 INVALID_ARGUMENT rather than
    /// 401, so the body is also sniffed for its auth markers.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::AuthRejected(body),
            400 if body.contains("API key not valid") || body.contains("PERMISSION_DENIED") => {
                Self::AuthRejected(body)
            }
            _ => Self::Upstream(format!("status {status}: {body}")),
        }
    }
}
