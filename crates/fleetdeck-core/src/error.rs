// ── Core error types ──
//
// User-facing errors from fleetdeck-core. Consumers never see raw HTTP
// status codes or JSON parse failures directly; the `From<fleetdeck_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants,
// and `user_message()` produces the text a UI would surface.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Auth errors ──────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired")]
    SessionExpired,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Session store errors ─────────────────────────────────────────
    #[error("Session store error: {message}")]
    SessionStore { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message a UI should show for this error.
    ///
    /// Status codes map to fixed phrasings; a non-empty backend-supplied
    /// message wins over the generic text for its status.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                message, status, ..
            } => {
                let generic = status.and_then(status_message);
                if message.is_empty() {
                    generic
                        .map(str::to_owned)
                        .unwrap_or_else(|| "An unexpected error occurred.".to_owned())
                } else {
                    message.clone()
                }
            }
            Self::SessionExpired => "You are not authorized. Please log in again.".to_owned(),
            Self::AuthenticationFailed { message } => message.clone(),
            Self::NotFound { entity_type, .. } => {
                format!("The requested {entity_type} could not be found.")
            }
            other => other.to_string(),
        }
    }

    /// Whether re-authentication might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Fixed user-facing text per HTTP status code.
fn status_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Invalid request. Please check your input."),
        401 => Some("You are not authorized. Please log in again."),
        403 => Some("You do not have permission to perform this action."),
        404 => Some("The requested resource was not found."),
        409 => Some("A conflict occurred. The resource may already exist."),
        422 => Some("Validation failed. Please check your input."),
        429 => Some("Too many requests. Please try again later."),
        500 => Some("Server error. Please try again later."),
        502 | 503 => Some("Service temporarily unavailable. Please try again."),
        _ => None,
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fleetdeck_api::Error> for CoreError {
    fn from(err: fleetdeck_api::Error) -> Self {
        use fleetdeck_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => Self::AuthenticationFailed { message },
            ApiError::Unauthorized => Self::SessionExpired,
            ApiError::Transport(e) => Self::Api {
                message: String::new(),
                code: None,
                status: e.status().map(|s| s.as_u16()),
            },
            ApiError::InvalidUrl(e) => Self::Internal(e.to_string()),
            ApiError::Api {
                status,
                message,
                code,
            } => Self::Api {
                message,
                code,
                status: Some(status),
            },
            ApiError::Deserialization { message, .. } => {
                Self::Internal(format!("response decoding failed: {message}"))
            }
        }
    }
}
