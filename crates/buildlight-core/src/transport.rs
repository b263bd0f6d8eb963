//! HTTP transport abstraction
//!
//! Defines the synchronous transport capability the provider core dispatches
//! through. The production implementation is [`ReqwestTransport`]; tests use
//! the mock in `test_support`.

use crate::error::{ProviderError, TransportError};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// HTTP method for a provider request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
}

impl HttpMethod {
    /// Lowercase method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Patch => "patch",
        }
    }

    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Patch => reqwest::Method::PATCH,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ProviderError;

    /// Case-insensitive; unknown names are a config error
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            "head" => Ok(Self::Head),
            "patch" => Ok(Self::Patch),
            other => Err(ProviderError::Config {
                message: format!("unknown HTTP method '{other}'"),
            }),
        }
    }
}

/// Basic-auth credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Proxy settings for a request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProxyOptions {
    pub addr: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl ProxyOptions {
    /// Whether an address is present; without one the other fields are inert
    pub fn is_configured(&self) -> bool {
        self.addr.as_deref().is_some_and(|a| !a.is_empty())
    }
}

/// Options attached to a dispatched request
///
/// The query map is ordered so dispatch is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestOptions {
    pub basic_auth: Option<BasicAuth>,
    pub query: BTreeMap<String, String>,
    pub proxy: ProxyOptions,
}

impl RequestOptions {
    /// Drop option entries whose value is absent or empty after merging
    pub fn prune(&mut self) {
        self.query.retain(|_, v| !v.is_empty());
        if self
            .basic_auth
            .as_ref()
            .is_some_and(|a| a.username.is_empty() && a.password.is_empty())
        {
            self.basic_auth = None;
        }
        let blank = |field: &mut Option<String>| {
            if field.as_deref().is_some_and(str::is_empty) {
                *field = None;
            }
        };
        blank(&mut self.proxy.addr);
        blank(&mut self.proxy.user);
        blank(&mut self.proxy.pass);
    }
}

/// Opaque successful transport result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

/// Synchronous HTTP transport capability
///
/// Implementations must be thread-safe (Send + Sync) so a client can be
/// shared behind an `Arc`.
pub trait HttpTransport: Send + Sync {
    /// Dispatch one request and await it to completion
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for conditions the network can produce:
    /// connection failures, timeouts, unreadable responses. Non-2xx status
    /// codes are not transport errors; they come back as a [`RawResponse`]
    /// for the caller to classify.
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
    ) -> Result<RawResponse, TransportError>;
}

/// Production transport over `reqwest::blocking`
///
/// A client is built per send because reqwest proxies attach to the client,
/// not the request.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a request timeout; without one the transport blocks indefinitely
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    fn proxy_for(options: &ProxyOptions) -> Result<reqwest::Proxy, TransportError> {
        let addr = options.addr.as_deref().unwrap_or_default();
        let target = match options.port {
            Some(port) => format!("http://{addr}:{port}"),
            None => format!("http://{addr}"),
        };
        let mut proxy =
            reqwest::Proxy::all(&target).map_err(|e| TransportError::InvalidProxy {
                message: format!("{target}: {e}"),
            })?;
        if let (Some(user), Some(pass)) = (options.user.as_deref(), options.pass.as_deref()) {
            proxy = proxy.basic_auth(user, pass);
        }
        Ok(proxy)
    }

    fn classify(url: &str, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                message: format!("{url}: {error}"),
            }
        } else if error.is_connect() {
            TransportError::ConnectionFailed {
                message: format!("{url}: {error}"),
            }
        } else if error.is_decode() || error.is_body() {
            TransportError::MalformedResponse {
                message: format!("{url}: {error}"),
            }
        } else {
            TransportError::RequestFailed {
                message: format!("{url}: {error}"),
            }
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
    ) -> Result<RawResponse, TransportError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if options.proxy.is_configured() {
            builder = builder.proxy(Self::proxy_for(&options.proxy)?);
        }
        let client = builder.build().map_err(|e| TransportError::RequestFailed {
            message: format!("building HTTP client: {e}"),
        })?;

        let mut request = client.request(method.as_reqwest(), url);
        if let Some(auth) = &options.basic_auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }

        let response = request.send().map_err(|e| Self::classify(url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::MalformedResponse {
                message: format!("{url}: {e}"),
            })?;

        Ok(RawResponse { status, body })
    }
}
