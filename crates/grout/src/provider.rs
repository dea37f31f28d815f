//! Startup wiring layer.
//!
//! A [`Provider`] bundles the registrations one subsystem contributes to the
//! container; a [`ProviderSet`] collects providers and registers them in
//! priority order during application startup, then gives each a chance to
//! validate that what it depends on is present.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grout::{Container, DiResult, Provider, ProviderSet};
//!
//! struct SceneProvider;
//!
//! impl Provider for SceneProvider {
//!     fn name(&self) -> &'static str {
//!         "scene"
//!     }
//!
//!     fn register(&self, container: &Container) -> DiResult<()> {
//!         container.register::<Camera>()?;
//!         container.register::<Viewport>()?;
//!         Ok(())
//!     }
//! }
//!
//! let mut providers = ProviderSet::new();
//! providers.add(SceneProvider);
//!
//! let container = Container::new();
//! providers.register_all(&container)?;
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::{Container, DiResult};

/// Trait for types that contribute registrations to the container.
pub trait Provider: Send + Sync {
    /// Name of this provider, used for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Registration order: lower values register first. Default is 100.
    fn priority(&self) -> u32 {
        100
    }

    /// Register this provider's types with the container.
    fn register(&self, container: &Container) -> DiResult<()>;

    /// Called after every provider has registered, to check that required
    /// collaborators are present.
    #[allow(unused_variables)]
    fn validate(&self, container: &Container) -> DiResult<()> {
        Ok(())
    }
}

/// Ordered collection of providers.
pub struct ProviderSet {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn add<P: Provider + 'static>(&mut self, provider: P) -> &mut Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn add_boxed(&mut self, provider: Arc<dyn Provider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Register all providers with the container.
    ///
    /// Providers are sorted by priority (stable, so equal priorities keep
    /// insertion order), registered in that order, then validated.
    pub fn register_all(&self, container: &Container) -> DiResult<()> {
        let mut sorted: Vec<_> = self.providers.iter().collect();
        sorted.sort_by_key(|provider| provider.priority());

        info!("Registering {} providers", sorted.len());

        for provider in sorted {
            debug!(
                "Registering provider '{}' (priority: {})",
                provider.name(),
                provider.priority()
            );
            provider.register(container)?;
        }

        for provider in &self.providers {
            provider.validate(container)?;
        }

        info!("All providers registered successfully");
        Ok(())
    }
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self::new()
    }
}
