// src/web/mod.rs
pub mod auth_handlers;
pub mod dashboard_handlers;
pub mod laboratorio_handlers;
pub mod mw_admin;
pub mod mw_auth;
pub mod reserva_handlers;
pub mod routes;
pub mod semestre_handlers;
pub mod usuario_handlers;

use crate::error::{AppError, AppResult};
use askama::Template;
use axum::response::{Html, Redirect};
use serde::Deserialize;

/// Mensagens de retorno passadas pela query string depois de um POST.
#[derive(Deserialize, Debug, Default)]
pub struct FeedbackParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Renderiza um template Askama, registando a falha.
pub fn renderizar<T: Template>(template: &T) -> AppResult<Html<String>> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Falha ao renderizar template: {}", e);
        AppError::TemplateError(e)
    })
}

/// Redireciona para `destino` com `?chave=mensagem` (padrão Post/Redirect/Get).
pub fn redirecionar_com(destino: &str, chave: &str, mensagem: &str) -> Redirect {
    let separador = if destino.contains('?') { '&' } else { '?' };
    let url = format!(
        "{}{}{}={}",
        destino,
        separador,
        chave,
        urlencoding::encode(mensagem)
    );
    Redirect::to(&url)
}

pub fn sucesso(destino: &str, mensagem: &str) -> Redirect {
    redirecionar_com(destino, "success", mensagem)
}

/// Falha numa ação: volta a `destino` com a mensagem, ou termina a sessão
/// se o backend rejeitou o token.
pub fn falha(destino: &str, erro: &AppError) -> Redirect {
    if erro.sessao_expirada() {
        tracing::warn!("Backend rejeitou o token; encerrando sessão.");
        return Redirect::to("/logout");
    }
    redirecionar_com(destino, "error", &erro.mensagem_usuario())
}

/// Acumula falhas de chamadas feitas em conjunto numa página; cada falha
/// vira um aviso e o valor por omissão (lista vazia, zero).
#[derive(Debug, Default)]
pub struct Degradacao {
    pub avisos: Vec<String>,
    pub sessao_expirada: bool,
}

impl Degradacao {
    pub fn valor<T: Default>(&mut self, resultado: AppResult<T>, o_que: &str) -> T {
        match resultado {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Falha ao carregar {}: {:?}", o_que, e);
                if e.sessao_expirada() {
                    self.sessao_expirada = true;
                }
                self.avisos
                    .push(format!("Falha ao carregar {}: {}", o_que, e.mensagem_usuario()));
                T::default()
            }
        }
    }
}

/// Converte o valor de um `<select>` em id; vazio ou inválido vale `None`.
pub fn id_opcional(valor: Option<&str>) -> Option<i64> {
    valor.and_then(|v| v.trim().parse().ok())
}
