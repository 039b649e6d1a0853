//! Typed API facades
//!
//! One struct per API, built on a [`ResourceInvoker`](crate::resource::ResourceInvoker).
//! Resource handles expose each method with its required parameters as
//! arguments and everything else through [`OptParams`](crate::resource::OptParams).
//!
//! ```ignore
//! let calendar = CalendarService::new(GcpClient::new().await?);
//! calendar.events().delete("primary", "abc123", opt_params!()).await?;
//! ```

pub mod androidpublisher;
pub mod calendar;
pub mod cloudtrace;
pub mod drive;
pub mod fusiontables;

pub use androidpublisher::AndroidPublisherService;
pub use calendar::CalendarService;
pub use cloudtrace::CloudtraceService;
pub use drive::DriveService;
pub use fusiontables::FusiontablesService;
