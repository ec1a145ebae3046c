use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::dispatcher::{DispatcherConfig, FaultDispatcher};
use crate::application::message::MessageSourceResolver;
use crate::application::ports::MessageResolver;
use crate::config::{Config, ConfigError};
use crate::domain::error_code::{ErrorCode, GlobalErrorCode};
use crate::infrastructure::messages::{CatalogError, MessageCatalog};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Wires configuration, message catalog and resolver into a dispatcher
pub struct ApplicationBuilder {
    config: Config,
    catalog: Option<MessageCatalog>,
    resolver: Option<Arc<dyn MessageResolver>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            catalog: None,
            resolver: None,
        }
    }

    /// Load the bundled catalog, with `messages_path` merged over it if set
    pub fn with_catalog(mut self) -> Result<Self, BuildError> {
        let mut catalog = MessageCatalog::bundled();

        if let Some(path) = &self.config.messages_path {
            catalog = catalog.merge(MessageCatalog::from_file(path)?);
        }

        info!(bundles = ?catalog.bundle_names(), "message_catalog_ready");
        self.catalog = Some(catalog);
        Ok(self)
    }

    /// Use a ready-made resolver instead of one backed by the catalog
    pub fn with_resolver(mut self, resolver: Arc<dyn MessageResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn build(self) -> Result<Arc<FaultDispatcher>, BuildError> {
        let locale = self.config.locale()?;

        let resolver: Arc<dyn MessageResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => {
                let catalog = self.catalog.unwrap_or_else(MessageCatalog::bundled);
                let codes: Vec<&str> = GlobalErrorCode::ALL.iter().map(|c| c.code()).collect();
                let missing = catalog.missing_codes(&codes, &locale);
                if !missing.is_empty() {
                    warn!(locale = %locale, missing = ?missing, "message_catalog_incomplete");
                }

                Arc::new(MessageSourceResolver::with_locale(catalog, locale))
            }
        };

        let dispatcher = FaultDispatcher::new(resolver).with_config(DispatcherConfig {
            log_client_errors: self.config.log_client_errors,
        });
        Ok(Arc::new(dispatcher))
    }
}
