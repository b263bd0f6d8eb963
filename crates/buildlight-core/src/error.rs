//! Error types for the provider core

/// Provider errors with structured variants
///
/// These surface synchronously to the caller. Transport and status failures
/// never appear here; the fetch boundary in
/// [`ProviderClient`](crate::client::ProviderClient) degrades them to "no
/// data" plus a log line.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Configuration is missing or malformed (e.g. empty `url`)
    #[error("provider config error: {message}")]
    Config { message: String },

    /// The provider contract's default `projects()` was invoked without an
    /// adapter override
    #[error("not implemented: {message}")]
    NotImplemented { message: String },

    /// The upstream returned data the adapter could not decode
    ///
    /// Raised distinctly from transport errors so callers can tell "upstream
    /// unreachable" apart from "upstream returned data we couldn't understand".
    #[error("provider parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Provider-level failure outside the other variants (factory failures,
    /// adapter-specific conditions)
    #[error("provider error: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Transport errors, scoped to network/HTTP failures only
///
/// Programming errors are not funneled through this type; the transport
/// returns it for conditions the network can legitimately produce.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, TLS failure
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    /// The request exceeded the transport's configured timeout
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Proxy settings the transport cannot apply
    #[error("invalid proxy: {message}")]
    InvalidProxy { message: String },

    /// A response arrived but could not be read
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// Anything else the HTTP layer reports
    #[error("request failed: {message}")]
    RequestFailed { message: String },
}
