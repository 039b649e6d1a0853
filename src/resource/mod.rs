//! Resource abstraction layer
//!
//! Every API method is described by data, not code. Service tables are loaded
//! from JSON files at compile time and a single invoker executes any method
//! they describe.
//!
//! # Architecture
//!
//! - [`descriptor`] - Method descriptors and parameter specs
//! - [`args`] - Caller-supplied parameter values
//! - [`invoker`] - Builds and dispatches requests, decodes responses
//! - [`registry`] - Loads and caches service tables from embedded JSON
//! - [`fetcher`] - Pagination and concurrent fetch helpers
//!
//! # Service Tables
//!
//! Services are defined in JSON files under `src/resources/`:
//! - `calendar.json` - Calendar API v3
//! - `drive.json` - Drive API v2
//! - `fusiontables.json` - Fusion Tables API v2
//! - `androidpublisher.json` - Google Play Developer API v2
//! - `cloudtrace.json` - Cloud Trace API v1
//!
//! # Example
//!
//! ```ignore
//! use gapi_rest::resource::{get_registry, InvocationArgs, ResourceInvoker};
//!
//! async fn delete_event<T: Transport>(invoker: &ResourceInvoker<T>) -> gapi_rest::Result<()> {
//!     let (service, descriptor) = get_registry().method("calendar", "events", "delete")?;
//!     let args = InvocationArgs::new()
//!         .with("calendarId", "primary")
//!         .with("eventId", "abc123");
//!     invoker.invoke_raw(service, descriptor, args).await?;
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod descriptor;
pub mod fetcher;
pub mod invoker;
pub mod registry;

pub use args::{InvocationArgs, OptParams, ParamValue};
pub use descriptor::{HttpMethod, Location, MethodDescriptor, ParameterSpec, ValueType};
pub use fetcher::{fetch_all_pages, fetch_all_pages_raw, fetch_concurrent, Paginated};
pub use invoker::{Resource, ResourceInvoker, STANDARD_PARAMETERS};
pub use registry::{get_registry, get_service, Registry, ResourceDef, ServiceDef};
