//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    db::Store,
    services::auth_service::RevokedTokens,
    utils::{Clock, SystemClock},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Document store
    store: Store,

    /// Application configuration
    config: Config,

    /// Source of "now" for booking rules
    clock: Arc<dyn Clock>,

    /// Tokens invalidated by logout
    revoked_tokens: RevokedTokens,
}

impl AppState {
    /// Create a new application state using the system clock
    pub fn new(store: Store, config: Config) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create a new application state with an explicit clock
    pub fn with_clock(store: Store, config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                config,
                clock,
                revoked_tokens: RevokedTokens::default(),
            }),
        }
    }

    /// Get a reference to the document store
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a reference to the clock
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Get a reference to the revoked token list
    pub fn revoked_tokens(&self) -> &RevokedTokens {
        &self.inner.revoked_tokens
    }
}
