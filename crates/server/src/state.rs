use std::sync::Arc;

use brightpath_core::Config;
use brightpath_store::DocumentStore;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self { config, store }
    }

    /// Collection holding content drafts.
    pub fn contents(&self) -> &str {
        &self.config.content.collection
    }
}
