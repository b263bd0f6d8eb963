//! Provider registry for runtime registration of CI providers

use crate::error::ProviderError;
use crate::provider::BuildProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// A factory function that creates a provider instance from config
pub type FactoryFn =
    Arc<dyn Fn(&toml::Table) -> Result<Box<dyn BuildProvider>, ProviderError> + Send + Sync>;

/// A factory that can create a provider instance
#[derive(Clone)]
pub struct ProviderFactory {
    /// Provider name (e.g. "travis", "jenkins")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function: takes config, returns a provider
    pub create: FactoryFn,
}

impl std::fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderFactory")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("create", &"<factory_fn>")
            .finish()
    }
}

/// Registry of CI provider factories
///
/// Allows runtime registration and selection of providers by name.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    /// Factory functions keyed by provider name
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a provider factory
    ///
    /// If a factory with the same name already exists, it will be replaced.
    pub fn register(&mut self, factory: ProviderFactory) {
        self.factories.insert(factory.name.clone(), factory);
    }

    /// Create a provider by name
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Config` naming the provider when it is not
    /// registered; factory failures pass through unchanged.
    pub fn create(
        &self,
        name: &str,
        config: &toml::Table,
    ) -> Result<Box<dyn BuildProvider>, ProviderError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ProviderError::Config {
                message: format!("CI provider '{name}' not registered"),
            })?;

        (factory.create)(config)
    }

    /// List registered provider names, sorted
    pub fn list_providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check if a provider is registered
    pub fn has_provider(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Get the number of registered providers
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
