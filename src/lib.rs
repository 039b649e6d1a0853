//! Declarative Google REST API client
//!
//! Each API method is a [`MethodDescriptor`](resource::MethodDescriptor)
//! in a service table. A single [`ResourceInvoker`](resource::ResourceInvoker)
//! turns a descriptor and caller arguments into an HTTP request, sends it
//! through a [`Transport`](gcp::transport::Transport) and decodes the
//! response into a typed model.

pub mod config;
pub mod error;
pub mod gcp;
pub mod model;
pub mod resource;
pub mod service;

pub use error::{InvokeError, Result};

/// Version injected at compile time via GAPI_REST_VERSION env var (set by
/// CI/CD), or "dev" for local builds.
pub const VERSION: &str = match option_env!("GAPI_REST_VERSION") {
    Some(v) => v,
    None => "dev",
};
