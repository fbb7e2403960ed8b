//! Failure taxonomy for remote calls.
//!
//! DESIGN
//! ======
//! Consumers branch on the variant (retry banner vs. verbatim server message vs.
//! generic fallback); the `Display` text is what the UI shows.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub const UNAVAILABLE_MESSAGE: &str = "A API não respondeu. Tente novamente mais tarde.";
pub const SERVER_FALLBACK_MESSAGE: &str = "Erro retornado pela API";
pub const UNEXPECTED_MESSAGE: &str = "Erro desconhecido. Tente novamente";
pub const LOGIN_REJECTED_FALLBACK: &str = "falha no login";

/// Low-level transport outcome, before any HTTP status is considered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never reached the server or no response came back.
    #[error("no response: {0}")]
    NoResponse(String),
    /// The request could not be built or the response could not be read.
    #[error("transport failure: {0}")]
    Other(String),
}

/// Failure of a fetch as seen by the cache and the pages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable,
    #[error("{}", server_message(.message))]
    Server { status: u16, message: Option<String> },
    #[error("{}", UNEXPECTED_MESSAGE)]
    Unexpected { detail: String },
}

fn server_message(message: &Option<String>) -> &str {
    message
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(SERVER_FALLBACK_MESSAGE)
}

impl FetchError {
    /// Whether the server rejected the bearer credential.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Server { status: 401 | 403, .. })
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse(_) => Self::Unavailable,
            TransportError::Other(detail) => Self::Unexpected { detail },
        }
    }
}

/// Failure of the login flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// The API answered but refused the credentials (`status != 1`).
    #[error("{}", rejected_message(.message))]
    Rejected { message: Option<String> },
    #[error(transparent)]
    Request(#[from] FetchError),
}

fn rejected_message(message: &Option<String>) -> &str {
    message
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(LOGIN_REJECTED_FALLBACK)
}
