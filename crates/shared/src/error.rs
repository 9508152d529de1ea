use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    Conflict,
    Rejected,
    Server,
    Transport,
    Decode,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Unauthorized,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            400..=499 => ErrorKind::Rejected,
            _ => ErrorKind::Server,
        }
    }
}

/// Failure of a call against the remote API.
///
/// `message` holds the payload the server sent back, when there was one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?}: {}", .message.as_deref().unwrap_or("no details"))]
pub struct RequestError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl RequestError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: Some(message.into()),
        }
    }

    pub fn from_status(status: u16, message: Option<String>) -> Self {
        Self {
            kind: ErrorKind::from_status(status),
            status: Some(status),
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Text to show the user: the server payload, or `fallback` without one.
    pub fn display_text<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.kind {
            ErrorKind::Transport | ErrorKind::Decode => fallback,
            _ => self.message.as_deref().unwrap_or(fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_to_kinds() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Rejected);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Server);
    }

    #[test]
    fn blank_server_payload_falls_back() {
        let err = RequestError::from_status(500, Some("  ".into()));
        assert_eq!(err.message, None);
        assert_eq!(err.display_text("generic"), "generic");
    }

    #[test]
    fn server_payload_is_shown_verbatim() {
        let err = RequestError::from_status(409, Some("Email já cadastrado".into()));
        assert_eq!(err.display_text("generic"), "Email já cadastrado");
    }

    #[test]
    fn transport_details_are_not_shown_to_the_user() {
        let err = RequestError::transport("connection refused");
        assert_eq!(err.display_text("generic"), "generic");
    }
}
