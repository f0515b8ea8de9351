// src/web/mw_auth.rs
use crate::{
    models::sessao::Sessao,
    services::auth_service::{self, COOKIE_TOKEN},
};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

/// Caminhos acessíveis sem sessão.
pub const ROTAS_PUBLICAS: &[&str] = &["/login", "/logout", "/favicon.ico", "/health"];

pub fn e_rota_publica(path: &str) -> bool {
    ROTAS_PUBLICAS.contains(&path) || path.starts_with("/static/")
}

/// Resultado do porteiro para um pedido.
#[derive(Debug)]
pub enum Decisao {
    Permitir(Sessao),
    Redirecionar { limpar_token: bool },
}

/// Decide o destino do pedido só a partir do token e da hora atual
/// (segundos desde a época). Um token vale enquanto `agora < exp`.
pub fn avaliar(token: Option<&str>, agora: i64) -> Decisao {
    let token = match token.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t,
        None => return Decisao::Redirecionar { limpar_token: false },
    };

    let claims = match auth_service::decode_claims(token) {
        Some(c) => c,
        None => return Decisao::Redirecionar { limpar_token: true },
    };

    match claims.exp {
        Some(exp) if exp > agora => Decisao::Permitir(Sessao::new(token, claims)),
        _ => Decisao::Redirecionar { limpar_token: true },
    }
}

/// Middleware aplicado a todo o router: sem token válido, redireciona
/// para /login antes de qualquer página ser renderizada.
pub async fn require_auth(cookies: Cookies, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if e_rota_publica(&path) {
        return next.run(request).await;
    }

    let token = cookies.get(COOKIE_TOKEN).map(|c| c.value().to_owned());
    let agora = chrono::Utc::now().timestamp();

    match avaliar(token.as_deref(), agora) {
        Decisao::Permitir(sessao) => {
            tracing::debug!("Autenticação MW: '{}' autenticado em {}", sessao.login(), path);
            request.extensions_mut().insert(sessao);
            next.run(request).await
        }
        Decisao::Redirecionar { limpar_token } => {
            if limpar_token {
                tracing::debug!("Autenticação MW: token inválido ou expirado em {}. Limpando cookie.", path);
                auth_service::encerrar_sessao(&cookies);
            } else {
                tracing::debug!("Autenticação MW: sem token em {}. Redirecionando para /login", path);
            }
            Redirect::to("/login").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use serde_json::json;

    const AGORA: i64 = 1_750_000_000;

    fn token(payload: serde_json::Value) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload.to_string()))
    }

    #[test]
    fn absent_token_redirects_without_clearing() {
        assert!(matches!(
            avaliar(None, AGORA),
            Decisao::Redirecionar { limpar_token: false }
        ));
        assert!(matches!(
            avaliar(Some("  "), AGORA),
            Decisao::Redirecionar { limpar_token: false }
        ));
    }

    #[test]
    fn expired_one_second_ago_redirects_and_clears() {
        let t = token(json!({"sub": "ana", "exp": AGORA - 1}));
        assert!(matches!(
            avaliar(Some(&t), AGORA),
            Decisao::Redirecionar { limpar_token: true }
        ));
    }

    #[test]
    fn valid_for_one_more_second_is_allowed() {
        let t = token(json!({"sub": "ana", "roles": ["PROF"], "exp": AGORA + 1}));
        match avaliar(Some(&t), AGORA) {
            Decisao::Permitir(sessao) => {
                assert_eq!(sessao.login(), "ana");
                assert_eq!(sessao.token(), t);
            }
            outro => panic!("esperava Permitir, veio {:?}", outro),
        }
    }

    #[test]
    fn missing_exp_or_garbage_redirects() {
        let sem_exp = token(json!({"sub": "ana"}));
        assert!(matches!(
            avaliar(Some(&sem_exp), AGORA),
            Decisao::Redirecionar { limpar_token: true }
        ));
        assert!(matches!(
            avaliar(Some("lixo"), AGORA),
            Decisao::Redirecionar { limpar_token: true }
        ));
    }

    #[test]
    fn public_paths() {
        assert!(e_rota_publica("/login"));
        assert!(e_rota_publica("/static/app.css"));
        assert!(!e_rota_publica("/dashboard"));
        assert!(!e_rota_publica("/login/extra"));
    }
}
