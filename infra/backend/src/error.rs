use std::borrow::Cow;

/// Failures of an outbound call to the REST backend.
#[fhub_derive::fhub_error]
pub enum BackendError {
    /// Connection refused, timeout, TLS or body read failure.
    #[error("Transport error{}: {source}", format_context(context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The body was not the JSON shape the caller asked for.
    #[error("Decode error{}: {source}", format_context(context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Non-2xx reply. `message` is the body's `message` or `error`, possibly empty.
    #[error("Upstream returned {status}{}: {message}", format_context(context))]
    Status { status: u16, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid backend URL{}: {message}", format_context(context))]
    InvalidUrl { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal backend client error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl BackendError {
    /// Upstream HTTP status, when the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's own explanation, if it gave a non-empty one.
    #[must_use]
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}
