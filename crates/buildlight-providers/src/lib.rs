//! Built-in CI vendor adapters for buildlight
//!
//! Each adapter holds a [`ProviderClient`](buildlight_core::ProviderClient)
//! by composition and implements
//! [`BuildProvider`](buildlight_core::BuildProvider) by mapping its vendor's
//! payload into normalized [`Project`](buildlight_core::Project) records.

pub mod jenkins;
pub mod travis;

pub use jenkins::JenkinsProvider;
pub use travis::TravisProvider;

use buildlight_core::toml;
use buildlight_core::{BuildProvider, ProviderConfig, ProviderFactory, ProviderRegistry};
use std::sync::Arc;

/// Registry preloaded with the built-in adapters
pub fn builtin_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    registry.register(ProviderFactory {
        name: "travis".to_string(),
        description: "Travis-style CI server (classic repositories.json surface)".to_string(),
        create: Arc::new(|table: &toml::Table| {
            let config = ProviderConfig::from_toml(table)?;
            Ok(Box::new(TravisProvider::new(config)?) as Box<dyn BuildProvider>)
        }),
    });

    registry.register(ProviderFactory {
        name: "jenkins".to_string(),
        description: "Jenkins CI server (JSON API)".to_string(),
        create: Arc::new(|table: &toml::Table| {
            let config = ProviderConfig::from_toml(table)?;
            Ok(Box::new(JenkinsProvider::new(config)?) as Box<dyn BuildProvider>)
        }),
    });

    registry
}
