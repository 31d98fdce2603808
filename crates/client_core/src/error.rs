use reqwest::StatusCode;
use shared::{BookId, ValidationErrors};
use thiserror::Error;

/// A failed exchange with the remote collection resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {url} failed: {message}")]
pub struct FetchError {
    pub method: &'static str,
    pub url: String,
    pub status: Option<StatusCode>,
    pub message: String,
}

impl FetchError {
    pub fn transport(method: &'static str, url: impl Into<String>, err: &reqwest::Error) -> Self {
        Self {
            method,
            url: url.into(),
            status: err.status(),
            message: err.to_string(),
        }
    }

    pub fn status(method: &'static str, url: impl Into<String>, status: StatusCode) -> Self {
        Self {
            method,
            url: url.into(),
            status: Some(status),
            message: format!("server responded with {status}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("book {id} not found")]
    NotFound { id: BookId },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// True for every failure that came from the remote side, including
    /// a missing record.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, ClientError::Fetch(_) | ClientError::NotFound { .. })
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
