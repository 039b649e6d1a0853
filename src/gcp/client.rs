//! Google Client
//!
//! Authenticated transport combining credentials and the HTTP client. Each
//! request is sent with a bearer token for the scopes of its service.

use super::auth::GcpCredentials;
use super::http::{GcpHttpClient, DEFAULT_USER_AGENT};
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::{InvokeError, Result};
use anyhow::Context;
use std::future::Future;
use std::time::Duration;

/// Authenticated Google API transport
#[derive(Clone)]
pub struct GcpClient {
    pub credentials: GcpCredentials,
    pub http: GcpHttpClient,
}

impl GcpClient {
    /// Create a client using Application Default Credentials
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_options(DEFAULT_USER_AGENT, None).await
    }

    /// Create a client with a custom user agent and request timeout
    pub async fn with_options(user_agent: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let credentials = GcpCredentials::new()
            .await
            .context("Failed to initialize Google credentials")?;

        let http = GcpHttpClient::with_options(user_agent, timeout)?;

        Ok(Self { credentials, http })
    }

    /// Build a client from explicit parts
    pub fn from_parts(credentials: GcpCredentials, http: GcpHttpClient) -> Self {
        Self { credentials, http }
    }

    async fn send_authorized(&self, request: HttpRequest) -> Result<HttpResponse> {
        let token = self
            .credentials
            .get_token(&request.scopes)
            .await
            .map_err(|e| InvokeError::network(format!("{:#}", e)))?;

        let response = self.http.execute(request.clone(), Some(&token)).await?;

        // Retry once with a fresh token after a 401
        if response.status == 401 {
            tracing::debug!("Token rejected, clearing cache and retrying once");
            self.credentials.clear_cache().await;
            let token = self
                .credentials
                .get_token(&request.scopes)
                .await
                .map_err(|e| InvokeError::network(format!("{:#}", e)))?;
            return self.http.execute(request, Some(&token)).await;
        }

        Ok(response)
    }
}

impl Transport for GcpClient {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        self.send_authorized(request)
    }
}
