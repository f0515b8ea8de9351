// src/services/auth_service.rs
use crate::{
    api::{self, ApiClient},
    config::AppConfig,
    error::{AppError, AppResult},
    models::sessao::{Claims, Sessao},
};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde_json::{Map, Value};
use time::Duration;
use tower_cookies::{cookie::SameSite, Cookie, Cookies};

/// Nome do cookie que guarda o token.
pub const COOKIE_TOKEN: &str = "token";

// Alfabeto padrão, com ou sem '=' no fim
const BASE64_TOLERANTE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodifica o payload (segmento do meio) de um token `header.payload.assinatura`.
///
/// A assinatura NÃO é verificada. Devolve `None` se o token não tiver três
/// segmentos ou se o payload não for base64 (url-safe ou padrão) com um
/// objeto JSON em UTF-8.
pub fn decode_payload(token: &str) -> Option<Map<String, Value>> {
    let partes: Vec<&str> = token.trim().split('.').collect();
    if partes.len() != 3 || partes[1].is_empty() {
        return None;
    }

    // url-safe -> padrão
    let normalizado: String = partes[1]
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            outro => outro,
        })
        .collect();

    let bytes = BASE64_TOLERANTE.decode(normalizado.as_bytes()).ok()?;
    let texto = String::from_utf8(bytes).ok()?;
    match serde_json::from_str::<Value>(&texto).ok()? {
        Value::Object(obj) => Some(obj),
        _ => None,
    }
}

pub fn decode_claims(token: &str) -> Option<Claims> {
    decode_payload(token).map(Claims::from_payload)
}

/// Sessão para um token acabado de emitir. O token tem de passar no mesmo
/// critério do porteiro (`exp > agora`), senão o login não teria efeito.
pub fn sessao_do_token(token: String, agora: i64) -> AppResult<Sessao> {
    let claims = decode_claims(&token).ok_or_else(|| {
        tracing::error!("Token recebido do backend não pôde ser decodificado.");
        AppError::RespostaInvalida("token ilegível".to_string())
    })?;
    match claims.exp {
        Some(exp) if exp > agora => Ok(Sessao::new(token, claims)),
        Some(exp) => {
            tracing::error!("Token recebido do backend já expirou (exp={}, agora={}).", exp, agora);
            Err(AppError::RespostaInvalida("token expirado".to_string()))
        }
        None => {
            tracing::error!("Token recebido do backend não tem 'exp'.");
            Err(AppError::RespostaInvalida("token sem validade".to_string()))
        }
    }
}

/// Autentica no backend e devolve a sessão correspondente ao token emitido.
pub async fn autenticar(api: &ApiClient, login: &str, senha: &str, agora: i64) -> AppResult<Sessao> {
    let token = api::auth::login(api, login, senha).await?;
    sessao_do_token(token, agora)
}

/// Guarda o token no cookie. Junto com `encerrar_sessao`, é o único ponto
/// que altera o token persistido.
pub fn iniciar_sessao(cookies: &Cookies, sessao: &Sessao, config: &AppConfig, agora: i64) {
    let mut cookie = Cookie::build((COOKIE_TOKEN, sessao.token().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure);

    if let Some(exp) = sessao.expira_em() {
        cookie = cookie.max_age(Duration::seconds((exp - agora).max(0)));
    }

    cookies.add(cookie.build());
    tracing::info!("✅ Sessão iniciada para '{}'", sessao.login());
}

pub fn encerrar_sessao(cookies: &Cookies) {
    cookies.remove(Cookie::build((COOKIE_TOKEN, "")).path("/").build());
}
