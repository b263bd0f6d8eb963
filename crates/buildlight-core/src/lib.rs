//! Core types and plumbing for buildlight
//!
//! buildlight polls continuous-integration servers of varying vendors and
//! normalizes their build status into a uniform model. This crate owns the
//! vendor-agnostic half of that work:
//! - the [`Project`](model::Project) model every adapter produces
//! - the [`BuildProvider`](provider::BuildProvider) contract adapters satisfy
//! - the shared [`ProviderClient`](client::ProviderClient) that builds and
//!   dispatches HTTP requests (auth, query parameters, proxying) and degrades
//!   upstream failures to "no data" plus a log line
//!
//! Concrete vendor adapters live in `buildlight-providers` and hold a
//! `ProviderClient` by composition.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod provider;
pub mod registry;
pub mod request;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::ProviderClient;
pub use config::ProviderConfig;
pub use error::{ProviderError, TransportError};
pub use model::{BuildActivity, BuildOutcome, Project};
pub use provider::BuildProvider;
pub use registry::{FactoryFn, ProviderFactory, ProviderRegistry};
pub use request::RequestSpec;
pub use transport::{
    BasicAuth, HttpMethod, HttpTransport, ProxyOptions, RawResponse, ReqwestTransport,
    RequestOptions,
};

// Re-export toml for provider factory config access
pub use toml;
