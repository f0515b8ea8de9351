// src/web/mw_admin.rs
use crate::{error::AppError, models::sessao::Sessao};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Middleware que verifica se a sessão tem o papel ADMIN.
/// Deve ser executado *depois* de `require_auth`, que insere a `Sessao`.
pub async fn require_admin(
    Extension(sessao): Extension<Sessao>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if sessao.is_admin() {
        tracing::debug!("Admin MW: Acesso admin concedido para {}", sessao.login());
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            "Admin MW: Acesso negado para {} (papéis: {:?}).",
            sessao.login(),
            sessao.roles()
        );
        Err(AppError::Forbidden)
    }
}
