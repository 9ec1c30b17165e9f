//! Application state.

use std::sync::Arc;

use booking_store::BookingStore;

use crate::config::Config;

/// Shared application state.
///
/// The store is injected here rather than held globally, so tests can run
/// each router against its own isolated store instance.
pub struct AppState<S: BookingStore> {
    /// Server configuration.
    pub config: Config,
    /// Booking store.
    pub store: S,
}

impl<S: BookingStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: BookingStore>(config: Config, store: S) -> SharedState<S> {
    Arc::new(AppState::new(config, store))
}
