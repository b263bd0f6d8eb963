//! Provider contract every CI adapter satisfies

use crate::error::ProviderError;
use crate::model::Project;
use std::sync::Arc;

/// Contract for a CI provider adapter
///
/// Adapters hold a [`ProviderClient`](crate::client::ProviderClient) by
/// composition and turn its stored raw response into normalized [`Project`]
/// records.
pub trait BuildProvider: Send + Sync {
    /// Human-identifiable provider name (e.g. "travis", "jenkins")
    fn provider_name(&self) -> &str;

    /// Ordered sequence of projects parsed from the stored raw response
    ///
    /// Adapters with no stored response return `Ok(vec![])`: absence of data
    /// is not an error.
    ///
    /// # Errors
    ///
    /// The default body fails with `ProviderError::NotImplemented` so an
    /// incomplete adapter fails loudly and distinguishably from a network
    /// failure. Adapters return `ProviderError::Parse` when the upstream
    /// payload cannot be decoded.
    fn projects(&self) -> Result<Vec<Project>, ProviderError> {
        Err(ProviderError::NotImplemented {
            message: format!(
                "provider '{}' must provide a projects method",
                self.provider_name()
            ),
        })
    }
}

impl<T: BuildProvider + ?Sized> BuildProvider for Arc<T> {
    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn projects(&self) -> Result<Vec<Project>, ProviderError> {
        (**self).projects()
    }
}
