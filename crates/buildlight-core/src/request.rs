//! Request construction: URL joining and option merging
//!
//! Pure functions over configuration plus an optional per-call override.
//! A [`RequestSpec`] is derived fresh on every fetch and never persisted.

use crate::config::ProviderConfig;
use crate::transport::{BasicAuth, HttpMethod, ProxyOptions, RequestOptions};

/// Per-call override for a fetch
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    /// Overrides the effective builds path
    pub path: Option<String>,
    /// Resolved to GET when unset
    pub method: Option<HttpMethod>,
    /// Extra options merged into the computed ones
    pub url_options: RequestOptions,
}

/// Join a base URL and a path with exactly one separator
///
/// Trailing slashes are stripped from the base, leading/trailing slashes from
/// the path. Idempotent: stripping and rejoining an already-normalized URL
/// yields the same string. A root or empty path yields `base` plus `/`.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{path}")
    }
}

/// Build the transport options for one fetch
///
/// Merge order:
/// 1. basic auth from configured `username`/`password` (absent field as empty
///    string, not omitted)
/// 2. `owner_name` as a query parameter
/// 3. `access_token` joins the query set only when it already has entries,
///    i.e. when `owner_name` is configured; a token on its own is dropped
/// 4. proxy fields: configured values win, override fills only absent fields
/// 5. override `query` entries win on key collision; an override `basic_auth`
///    replaces the computed one
/// 6. prune entries left absent or empty
pub fn build_options(config: &ProviderConfig, spec: &RequestSpec) -> RequestOptions {
    let mut options = RequestOptions::default();

    if config.username.is_some() || config.password.is_some() {
        options.basic_auth = Some(BasicAuth {
            username: config.username.clone().unwrap_or_default(),
            password: config.password.clone().unwrap_or_default(),
        });
    }

    if let Some(owner) = &config.owner_name {
        options
            .query
            .insert("owner_name".to_string(), owner.clone());
    }

    if let Some(token) = &config.access_token {
        if !options.query.is_empty() {
            options
                .query
                .insert("access_token".to_string(), token.clone());
        }
    }

    let override_proxy = &spec.url_options.proxy;
    options.proxy = ProxyOptions {
        addr: config
            .http_proxyaddr
            .clone()
            .or_else(|| override_proxy.addr.clone()),
        port: config.http_proxyport.or(override_proxy.port),
        user: config
            .http_proxyuser
            .clone()
            .or_else(|| override_proxy.user.clone()),
        pass: config
            .http_proxypass
            .clone()
            .or_else(|| override_proxy.pass.clone()),
    };

    for (key, value) in &spec.url_options.query {
        options.query.insert(key.clone(), value.clone());
    }
    if let Some(auth) = &spec.url_options.basic_auth {
        options.basic_auth = Some(auth.clone());
    }

    options.prune();
    options
}
