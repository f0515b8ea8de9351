// src/state.rs
use crate::{api::ApiClient, config::AppConfig};
use std::sync::Arc;

// Estado partilhado por todos os handlers; não há dados mutáveis aqui,
// cada página busca as suas cópias ao backend.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let api = ApiClient::new(&config);
        Self {
            config: Arc::new(config),
            api,
        }
    }
}

