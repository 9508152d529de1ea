use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    pub fn new(kind: AlertKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, text)
    }
}

/// Where screens report the outcome of an action.
pub trait AlertSink: Send + Sync {
    fn show(&self, alert: Alert);
    fn clear(&self);
}

/// Holds the single alert currently on display; a new one replaces it.
#[derive(Debug, Default)]
pub struct AlertSlot {
    current: Mutex<Option<Alert>>,
}

impl AlertSlot {
    pub fn current(&self) -> Option<Alert> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Option<Alert> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl AlertSink for AlertSlot {
    fn show(&self, alert: Alert) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(alert);
    }

    fn clear(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}
