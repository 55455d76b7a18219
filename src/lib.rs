pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod engine;

use config::Config;
use db::Store;

pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        Self { config, store }
    }

    /// State with the demo data loaded when `seed.enabled` is set
    pub fn from_config(config: Config) -> Self {
        let store = if config.seed.enabled {
            Store::seeded()
        } else {
            Store::new()
        };
        Self::new(config, store)
    }
}
