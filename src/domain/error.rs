use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-success HTTP status from a backend. Displays the message alone so
    /// callers can show the server's own wording.
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Chord count mismatch: expected {expected}, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// `ServiceError` with the message the local service falls back to when
    /// its error body carries none.
    pub fn service_status(status: u16) -> Self {
        Self::service(status, format!("HTTP error! status: {status}"))
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn count_mismatch(expected: usize, actual: usize) -> Self {
        Self::CountMismatch { expected, actual }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    pub fn is_count_mismatch(&self) -> bool {
        matches!(self, Self::CountMismatch { .. })
    }

    /// HTTP status carried by a `Service` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_displays_message_only() {
        let err = DomainError::service(400, "bad key");
        assert_eq!(err.to_string(), "bad key");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn service_status_synthesizes_message() {
        let err = DomainError::service_status(500);
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn count_mismatch_names_both_counts() {
        let msg = DomainError::count_mismatch(4, 3).to_string();
        assert!(msg.contains("expected 4"));
        assert!(msg.contains("got 3"));
    }
}
