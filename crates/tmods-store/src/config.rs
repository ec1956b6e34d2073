//! Startup configuration
//!
//! Connection parameters are passed explicitly and validated up front.
//! There is deliberately no environment sniffing and no embedded fallback
//! credentials: a missing or malformed parameter is a fatal
//! [`ConfigError`] and the store never initializes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Validated connection parameters for the persistent store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// External application identifier
    pub app_id: String,
    /// Document-collection namespace, derived from the app id unless set
    pub project_namespace: String,
}

impl StoreConfig {
    /// Build a configuration with the namespace derived from the app id
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        let app_id = app_id.into();
        let project_namespace = format!("apps/{app_id}/scopes");
        Self {
            app_id,
            project_namespace,
        }
    }

    /// Override the derived namespace
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.project_namespace = namespace.into();
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// A [`ConfigError`] naming the first missing or malformed parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::MissingAppId);
        }
        if !self
            .app_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ConfigError::MalformedAppId(self.app_id.clone()));
        }
        if self.project_namespace.trim().is_empty() {
            return Err(ConfigError::MissingNamespace);
        }
        Ok(())
    }
}
