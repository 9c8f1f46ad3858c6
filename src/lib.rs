pub mod api;
pub mod config;
pub mod db;

pub use db::Store;

use std::sync::Arc;

use api::auth::{JwtAuthority, TokenAuthority};
use config::Config;

/// Shared application state. Requests are independent; nothing here is
/// mutated after startup beyond the driver's own connection pool.
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub tokens: Arc<dyn TokenAuthority>,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        let tokens: Arc<dyn TokenAuthority> = Arc::new(JwtAuthority::new(
            config.auth.jwt_secret.clone(),
            config.auth.token_ttl_days,
        ));
        Self {
            config,
            store,
            tokens,
        }
    }
}
