//! Application state for the buyout engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

use super::subscribers::{InMemorySubscriberStore, SubscriberStore};

/// Shared application state.
///
/// Holds the loaded config versions and the mailing-list store. Both sit
/// behind an `Arc`, so cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    subscribers: Arc<dyn SubscriberStore>,
}

impl AppState {
    /// Creates a state with an empty in-memory subscriber list.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_subscriber_store(config, Arc::new(InMemorySubscriberStore::new()))
    }

    /// Creates a state with the given subscriber store.
    pub fn with_subscriber_store(
        config: ConfigLoader,
        subscribers: Arc<dyn SubscriberStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            subscribers,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the subscriber store.
    pub fn subscribers(&self) -> &dyn SubscriberStore {
        self.subscribers.as_ref()
    }
}
