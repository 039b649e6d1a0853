//! Transport seam
//!
//! The invoker builds an [`HttpRequest`] and hands it to a [`Transport`].
//! Authorization, connection pooling and timeouts live behind this trait.

use crate::error::Result;
use crate::resource::HttpMethod;
use std::future::Future;
use std::sync::Arc;

/// A fully built request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON payload, if the method takes a body
    pub body: Option<String>,
    /// OAuth scopes of the service being called
    pub scopes: Vec<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            scopes: Vec::new(),
        }
    }

    /// Path and query of the URL, without scheme and host
    pub fn path_and_query(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        without_scheme
            .find('/')
            .map(|idx| &without_scheme[idx..])
            .unwrap_or("/")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response, successful or not
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests built by the invoker.
///
/// Implementations report network failures as
/// [`InvokeError::Transport`](crate::error::InvokeError::Transport) with no
/// status and return non-2xx responses as ordinary [`HttpResponse`]s.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        (**self).send(request)
    }
}

#[cfg(test)]
pub(crate) mod spy {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Records requests and answers with canned responses.
    ///
    /// Queued responses are used in order; the last one repeats.
    pub(crate) struct SpyTransport {
        requests: Mutex<Vec<HttpRequest>>,
        responses: Mutex<VecDeque<HttpResponse>>,
    }

    impl SpyTransport {
        pub(crate) fn new(status: u16, body: &str) -> Self {
            Self::with_responses(vec![HttpResponse::new(status, body)])
        }

        pub(crate) fn with_responses(responses: Vec<HttpResponse>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(responses.into()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for SpyTransport {
        fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
            self.requests.lock().unwrap().push(request);
            let mut responses = self.responses.lock().unwrap();
            let response = if responses.len() > 1 {
                responses.pop_front()
            } else {
                responses.front().cloned()
            };
            let response = response.unwrap_or_else(|| HttpResponse::new(200, "{}"));
            async move { Ok(response) }
        }
    }
}
