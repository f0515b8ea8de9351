// src/api/auth.rs
use super::ApiClient;
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub login: &'a str,
    pub senha: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
}

/// POST /auth/login. Devolve o token emitido pelo backend.
pub async fn login(api: &ApiClient, login: &str, senha: &str) -> AppResult<String> {
    let corpo = api
        .post_publico("/auth/login", &LoginRequest { login, senha })
        .await?;
    extrair_token(&corpo)
}

/// Aceita `{"token": "..."}`, uma string JSON ou o token em texto simples.
fn extrair_token(corpo: &str) -> AppResult<String> {
    let corpo = corpo.trim();
    let token = match serde_json::from_str::<Value>(corpo) {
        Ok(Value::String(s)) => s,
        Ok(valor @ Value::Object(_)) => serde_json::from_value::<LoginResponse>(valor)
            .map(|r| r.token)
            .map_err(|_| AppError::RespostaInvalida("login sem token".to_string()))?,
        Ok(_) => String::new(),
        Err(_) => corpo.to_string(),
    };
    let token = token.trim().to_string();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AppError::RespostaInvalida("login sem token".to_string()));
    }
    Ok(token)
}
