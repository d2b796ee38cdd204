//! Manager configuration.

use std::time::Duration;

/// Tunables for a [`CartManager`](crate::CartManager).
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Deadline for a single catalog stock lookup. A lookup that runs past
    /// this fails the mutation with `CatalogUnavailable` instead of hanging.
    pub catalog_timeout: Duration,
}

impl ManagerConfig {
    /// Create a config with the given catalog deadline.
    pub fn new(catalog_timeout: Duration) -> Self {
        Self { catalog_timeout }
    }

    /// Set the catalog deadline.
    pub fn with_catalog_timeout(mut self, timeout: Duration) -> Self {
        self.catalog_timeout = timeout;
        self
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            catalog_timeout: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deadline() {
        assert_eq!(
            ManagerConfig::default().catalog_timeout,
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_builder() {
        let config = ManagerConfig::default().with_catalog_timeout(Duration::from_millis(50));
        assert_eq!(config.catalog_timeout, Duration::from_millis(50));
    }
}
