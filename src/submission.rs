//! Progress of sending a confirmed cycle to the profile backend.
//!
//! The HTTP call belongs to the caller; this module tracks what the screen
//! shows while it runs and turns a failed response into a message.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Keys checked, in order, for a human-readable message in an error body.
const MESSAGE_KEYS: [&str; 3] = ["message", "error", "detail"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SubmissionState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for SubmissionState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("A submission is already in progress")]
    AlreadyInFlight,

    #[error("No submission is in progress")]
    NotInFlight,
}

impl<T> SubmissionState<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Marks a request as sent.
    ///
    /// # Errors
    /// Returns `SubmissionError::AlreadyInFlight` while an earlier request is loading,
    /// so a repeated confirm tap cannot send a second request.
    pub fn begin(&mut self) -> Result<(), SubmissionError> {
        if self.is_loading() {
            warn!("submission ignored: request already in flight");
            return Err(SubmissionError::AlreadyInFlight);
        }
        *self = Self::Loading;
        Ok(())
    }

    /// # Errors
    /// Returns `SubmissionError::NotInFlight` unless a request is loading.
    pub fn succeed(&mut self, value: T) -> Result<(), SubmissionError> {
        if !self.is_loading() {
            return Err(SubmissionError::NotInFlight);
        }
        info!("submission succeeded");
        *self = Self::Success(value);
        Ok(())
    }

    /// # Errors
    /// Returns `SubmissionError::NotInFlight` unless a request is loading.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), SubmissionError> {
        if !self.is_loading() {
            return Err(SubmissionError::NotInFlight);
        }
        let message = message.into();
        warn!(%message, "submission failed");
        *self = Self::Error(message);
        Ok(())
    }
}

/// Message to show for a failed request.
///
/// Prefers a `message`, `error` or `detail` string in a JSON body, then the
/// raw body text, then `fallback` (typically the transport error text).
pub fn error_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_owned();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => MESSAGE_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(trimmed)
            .to_owned(),
        Ok(serde_json::Value::String(message)) if !message.trim().is_empty() => message.trim().to_owned(),
        _ => trimmed.to_owned(),
    }
}
