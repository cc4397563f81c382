//! Scheme-to-factory registry for connection strings.
//!
//! The registry is an explicit value owned by whatever component builds
//! connections, with entries inserted at startup. There is no process-wide
//! mutable state: two registries can coexist with different scheme sets.

use std::collections::HashMap;

use crate::error::UriError;
use crate::uri::ConnectionParams;

/// A factory turning a full connection string into [`ConnectionParams`].
pub type SchemeFactory = fn(&str) -> Result<ConnectionParams, UriError>;

/// Maps URI schemes to connection-parameter factories.
#[derive(Debug, Clone, Default)]
pub struct TransportRegistry {
    factories: HashMap<String, SchemeFactory>,
}

impl TransportRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the `irc` and `ircs` schemes pre-registered.
    #[must_use]
    pub fn with_irc_schemes() -> Self {
        let mut registry = Self::new();
        registry.register("irc", ConnectionParams::parse);
        registry.register("ircs", ConnectionParams::parse);
        registry
    }

    /// Register (or replace) a factory for `scheme`.
    pub fn register(&mut self, scheme: impl Into<String>, factory: SchemeFactory) {
        self.factories.insert(scheme.into(), factory);
    }

    /// Whether a factory is registered for `scheme`.
    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.factories.contains_key(scheme)
    }

    /// Resolve a connection string through the factory registered for its
    /// scheme.
    ///
    /// # Errors
    ///
    /// Returns [`UriError::NotAUri`] when the string has no scheme,
    /// [`UriError::UnsupportedScheme`] when no factory is registered for
    /// it, or whatever the factory itself rejects.
    pub fn resolve(&self, uri: &str) -> Result<ConnectionParams, UriError> {
        let (scheme, _) = uri
            .split_once("://")
            .ok_or_else(|| UriError::NotAUri(uri.to_string()))?;

        let factory = self
            .factories
            .get(scheme)
            .ok_or_else(|| UriError::UnsupportedScheme(scheme.to_string()))?;

        factory(uri)
    }
}
