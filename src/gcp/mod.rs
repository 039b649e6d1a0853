//! Google API transport module
//!
//! Everything between a built request and the network: authentication,
//! the reqwest-based HTTP client, and the [`transport::Transport`] seam the
//! invoker is written against.
//!
//! # Module Structure
//!
//! - [`auth`] - OAuth tokens from Application Default Credentials
//! - [`client`] - Authenticated transport used in production
//! - [`http`] - Unauthenticated reqwest transport and error formatting
//! - [`transport`] - Request/response types and the `Transport` trait
//!
//! # Example
//!
//! ```ignore
//! use gapi_rest::gcp::client::GcpClient;
//! use gapi_rest::service::CalendarService;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let calendar = CalendarService::new(GcpClient::new().await?);
//!     let colors = calendar.colors().get(Default::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod transport;
