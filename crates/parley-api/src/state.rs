//! Application state wiring the coordination core together.
//!
//! `AppState` pins the protocol's trait seams to the shipped
//! implementations (the word-list profanity filter) and hands everything
//! to the HTTP layer as one cloneable handle.

use std::sync::Arc;

use parley_core::directory::SessionDirectory;
use parley_core::filter::WordListFilter;
use parley_core::protocol::RoomProtocol;
use parley_core::registry::ConnectionRegistry;
use parley_types::config::ServerConfig;

/// Shared application state used by every connection handler.
#[derive(Clone)]
pub struct AppState {
    pub protocol: Arc<RoomProtocol>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the directory, registry, filter, and protocol from config.
    pub fn init(config: ServerConfig) -> Self {
        let directory = Arc::new(SessionDirectory::new());
        let registry = Arc::new(ConnectionRegistry::new());
        let filter = Arc::new(WordListFilter::new(&config.blocked_words));

        let protocol = RoomProtocol::new(directory, registry, filter, config.maps_host.clone());

        Self {
            protocol: Arc::new(protocol),
            config: Arc::new(config),
        }
    }
}
