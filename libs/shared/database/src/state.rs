use shared_config::AppConfig;

use crate::supabase::SupabaseClient;

/// Shared handler state: configuration plus the single store handle built at
/// startup.
pub struct AppState {
    pub config: AppConfig,
    pub store: SupabaseClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = SupabaseClient::new(&config);
        Self { config, store }
    }
}
