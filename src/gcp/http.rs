//! HTTP utilities for Google REST API calls

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::{InvokeError, Result};
use anyhow::Context;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("gapi-rest/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Unauthenticated HTTP transport.
///
/// Sends requests as built, optionally with a bearer token.
#[derive(Clone)]
pub struct GcpHttpClient {
    client: Client,
}

impl GcpHttpClient {
    /// Create a new HTTP client
    pub fn new() -> anyhow::Result<Self> {
        Self::with_options(DEFAULT_USER_AGENT, None)
    }

    /// Create a client with a custom user agent and request timeout
    pub fn with_options(user_agent: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Send a request, attaching `token` as a bearer token when given
    pub async fn execute(&self, request: HttpRequest, token: Option<&str>) -> Result<HttpResponse> {
        tracing::debug!("{} {}", request.method, request.url);

        let url = Url::parse(&request.url).map_err(InvokeError::network)?;
        let mut builder = self.client.request(request.method.into(), url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(InvokeError::network)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.text().await.map_err(InvokeError::network)?;

        if !status.is_success() {
            // Only log sanitized/truncated error bodies
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

impl Transport for GcpHttpClient {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        self.execute(request, None)
    }
}

/// Format an API error for display
/// Maps common statuses to short messages and never echoes raw bodies
pub fn format_api_error(error: &InvokeError) -> String {
    match error.status() {
        Some(403) => return "Permission denied. Check the granted OAuth scopes.".to_string(),
        Some(401) => {
            return "Authentication failed. Run 'gcloud auth application-default login'.".to_string()
        }
        Some(404) => return "Resource not found.".to_string(),
        Some(429) => return "Rate limit exceeded. Please try again later.".to_string(),
        Some(400) => return "Invalid request. Check your parameters.".to_string(),
        Some(409) => {
            return "Resource conflict. The resource may already exist or be in use.".to_string()
        }
        Some(500) | Some(503) => {
            return "Google service temporarily unavailable. Please try again.".to_string()
        }
        Some(_) => return "Request failed. Check your network connection and try again.".to_string(),
        None => {},
    }

    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "a".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"a".repeat(200)));
        assert!(sanitized.ends_with("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("line1\nline2\t!"), "line1line2!");
    }

    #[test]
    fn test_format_api_error_maps_statuses() {
        let err = InvokeError::Transport {
            status: Some(404),
            body: "{\"error\": {\"message\": \"Not Found\"}}".to_string(),
        };
        assert_eq!(format_api_error(&err), "Resource not found.");

        let err = InvokeError::Transport {
            status: Some(418),
            body: String::new(),
        };
        assert!(format_api_error(&err).starts_with("Request failed"));
    }

    #[test]
    fn test_format_local_error_is_passed_through() {
        let err = InvokeError::MissingParameter {
            name: "fileId".to_string(),
        };
        assert_eq!(format_api_error(&err), "missing required parameter: fileId");
    }
}
