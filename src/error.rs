// src/error.rs
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Configuração inválida: {0}")]
    ConfigError(String),

    // Falha de rede/transporte ao falar com o backend
    #[error("Falha de comunicação com o servidor: {0}")]
    TransportError(#[from] reqwest::Error),

    // Erro de negócio reportado pelo backend (4xx/5xx)
    #[error("Servidor respondeu {status}: {mensagem}")]
    Api { status: u16, mensagem: String },

    #[error("Resposta inválida do servidor: {0}")]
    RespostaInvalida(String),

    #[error("Erro ao renderizar página: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Dados inválidos: {0}")]
    Validacao(String),

    #[error("Acesso negado")]
    Forbidden,
}

impl AppError {
    /// Texto curto mostrado na notificação da página.
    pub fn mensagem_usuario(&self) -> String {
        match self {
            AppError::Api { mensagem, .. } => mensagem.clone(),
            AppError::TransportError(_) => {
                "Não foi possível contactar o servidor. Tente novamente.".to_string()
            }
            AppError::RespostaInvalida(_) => {
                "O servidor devolveu uma resposta inesperada.".to_string()
            }
            AppError::Validacao(msg) => msg.clone(),
            AppError::Forbidden => "Não tem permissão para esta ação.".to_string(),
            _ => "Ocorreu um erro inesperado.".to_string(),
        }
    }

    /// O backend rejeitou o token (expirado ou revogado).
    pub fn sessao_expirada(&self) -> bool {
        matches!(self, AppError::Api { status: 401, .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::Api { status: 401, .. } => return Redirect::to("/logout").into_response(),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Não tem permissão para aceder a esta página."),
            AppError::EnvVarError(_) | AppError::ConfigError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::TransportError(_) | AppError::Api { .. } | AppError::RespostaInvalida(_) => {
                (StatusCode::BAD_GATEWAY, "Erro ao comunicar com o servidor de reservas.")
            }
            AppError::Validacao(_) => (StatusCode::BAD_REQUEST, "Dados inválidos."),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado."),
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="/dashboard">Voltar ao início</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
