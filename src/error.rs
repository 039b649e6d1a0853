//! Invocation errors
//!
//! Errors raised while turning a method descriptor and caller arguments into
//! an HTTP exchange. Local validation failures never reach the network.

use thiserror::Error;

/// Maximum length of a response body kept in a displayed error
const MAX_DISPLAY_BODY_LENGTH: usize = 200;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InvokeError {
    /// A parameter marked `required` was not supplied
    #[error("missing required parameter: {name}")]
    MissingParameter { name: String },

    /// A parameter name the method does not declare
    #[error("unknown parameter: '{name}'")]
    UnknownParameter { name: String },

    /// A value whose shape does not match the declared parameter type
    #[error("invalid value for parameter '{name}': expected {expected}")]
    InvalidParameter { name: String, expected: String },

    /// A `{name}` placeholder left in the path after substitution
    #[error("unresolved path placeholder: {{{name}}}")]
    UnresolvedPlaceholder { name: String },

    /// No such service, resource or method in the registry
    #[error("unknown method: {service}.{resource}.{method}")]
    UnknownMethod {
        service: String,
        resource: String,
        method: String,
    },

    /// Network failure (`status` is `None`) or a non-2xx response
    #[error("API request failed ({}): {}", display_status(.status), truncate_body(.body))]
    Transport { status: Option<u16>, body: String },

    /// The response body could not be decoded into the declared model
    #[error("failed to decode {model} response")]
    Decode {
        model: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),
}

impl InvokeError {
    /// HTTP status of a transport failure, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// True when the error was raised before any request was sent
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }

    pub(crate) fn missing(name: &str) -> Self {
        Self::MissingParameter {
            name: name.to_string(),
        }
    }

    pub(crate) fn network(err: impl std::fmt::Display) -> Self {
        Self::Transport {
            status: None,
            body: err.to_string(),
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "network".to_string(),
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() > MAX_DISPLAY_BODY_LENGTH {
        let mut end = MAX_DISPLAY_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    }
}

pub type Result<T> = std::result::Result<T, InvokeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_names_the_parameter() {
        let err = InvokeError::missing("calendarId");
        assert_eq!(err.to_string(), "missing required parameter: calendarId");
        assert!(err.is_local());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_transport_error_exposes_status() {
        let err = InvokeError::Transport {
            status: Some(404),
            body: "{\"error\":{\"code\":404}}".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_local());
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_long_bodies_are_truncated_in_display() {
        let err = InvokeError::Transport {
            status: Some(500),
            body: "x".repeat(1000),
        };
        let msg = err.to_string();
        assert!(msg.contains("[truncated, 1000 bytes total]"));
        assert!(msg.len() < 400);
    }

    #[test]
    fn test_network_failure_has_no_status() {
        let err = InvokeError::network("connection refused");
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("network"));
    }

    #[test]
    fn test_unresolved_placeholder_display() {
        let err = InvokeError::UnresolvedPlaceholder {
            name: "eventId".to_string(),
        };
        assert_eq!(err.to_string(), "unresolved path placeholder: {eventId}");
    }
}
