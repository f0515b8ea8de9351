// src/config.rs
use crate::error::{AppError, AppResult};
use std::env;

/// Configuração lida uma única vez no arranque.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Origem do backend de reservas, sem barra final.
    pub api_url: String,
    pub bind_addr: String,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn new(api_url: &str) -> AppResult<Self> {
        let api_url = api_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(AppError::ConfigError(format!(
                "API_URL deve começar por http:// ou https:// (recebido '{}')",
                api_url
            )));
        }
        Ok(Self {
            api_url,
            bind_addr: "0.0.0.0:3000".to_string(),
            cookie_secure: false,
        })
    }

    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        // Sem valor por omissão: uma única origem configurada
        let api_url = env::var("API_URL")?;
        let mut config = Self::new(&api_url)?;

        if let Ok(addr) = env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        config.cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "True"))
            .unwrap_or(false);

        if !config.cookie_secure {
            tracing::warn!("⚠️ COOKIE_SECURE desativado; o cookie de sessão circula sem a flag Secure.");
        }
        tracing::info!("Backend de reservas: {}", config.api_url);
        Ok(config)
    }
}
