// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::sessao::LoginForm,
    services::auth_service::{self, COOKIE_TOKEN},
    state::AppState,
    templates::LoginPage,
    web::{mw_auth, renderizar},
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

// GET /login
pub async fn show_login_form(cookies: Cookies) -> AppResult<Response> {
    let token = cookies.get(COOKIE_TOKEN).map(|c| c.value().to_owned());
    let agora = chrono::Utc::now().timestamp();

    match mw_auth::avaliar(token.as_deref(), agora) {
        // Já tem sessão válida
        mw_auth::Decisao::Permitir(sessao) => {
            tracing::debug!("GET /login: '{}' já autenticado, redirecionando para /dashboard", sessao.login());
            return Ok(Redirect::to("/dashboard").into_response());
        }
        mw_auth::Decisao::Redirecionar { limpar_token: true } => {
            tracing::debug!("GET /login: removendo token expirado ou ilegível.");
            auth_service::encerrar_sessao(&cookies);
        }
        mw_auth::Decisao::Redirecionar { limpar_token: false } => {}
    }

    let template = LoginPage {
        login: String::new(),
        error: None,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de login para: {}", form.login);

    let pagina_com_erro = |mensagem: &str| -> AppResult<Response> {
        let template = LoginPage {
            login: form.login.clone(),
            error: Some(mensagem.to_string()),
        };
        Ok(renderizar(&template)?.into_response())
    };

    if form.login.trim().is_empty() || form.senha.is_empty() {
        tracing::warn!("Login falhou: campos em branco.");
        return pagina_com_erro("Informe login e senha.");
    }

    let agora = chrono::Utc::now().timestamp();
    match auth_service::autenticar(&state.api, form.login.trim(), &form.senha, agora).await {
        Ok(sessao) => {
            auth_service::iniciar_sessao(&cookies, &sessao, &state.config, agora);
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(AppError::Api { status: 400 | 401 | 403, .. }) => {
            tracing::warn!("Credenciais rejeitadas para: {}", form.login);
            pagina_com_erro("Login ou senha inválidos.")
        }
        Err(e) => {
            tracing::error!("Erro ao autenticar {}: {:?}", form.login, e);
            pagina_com_erro(&e.mensagem_usuario())
        }
    }
}

// GET /logout
pub async fn handle_logout(cookies: Cookies) -> Redirect {
    auth_service::encerrar_sessao(&cookies);
    tracing::info!("🚪 Sessão encerrada.");
    Redirect::to("/login")
}
