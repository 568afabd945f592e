use std::sync::Arc;

use anyhow::Result;
use apptbook_core::{OwnerStore, Renderer, TimeCodec};

use crate::settings::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<OwnerStore>,
    pub codec: TimeCodec,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let codec = config.codec()?;
        let store = OwnerStore::with_seed_owner(&config.seed_owner);
        Ok(Self::with_store(store, codec))
    }

    pub fn with_store(store: OwnerStore, codec: TimeCodec) -> Self {
        AppState {
            store: Arc::new(store),
            codec,
            renderer: Renderer::new(codec),
        }
    }
}
