// src/web/usuario_handlers.rs
use crate::{
    api::{usuarios, ApiClient},
    error::{AppError, AppResult},
    models::{
        sessao::{normalizar_papel, Sessao, PAPEIS_DEFINIDOS},
        usuario::{Usuario, UsuarioForm},
    },
    state::AppState,
    templates::{PapelOpcao, UsuarioFormPage, UsuarioLinha, UsuariosPage},
    web::{falha, redirecionar_com, renderizar, sucesso, FeedbackParams},
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

pub const AVISO_SEM_RESULTADOS: &str = "Nenhum usuário encontrado.";

#[derive(Deserialize, Debug, Default)]
pub struct PesquisaParams {
    #[serde(default)]
    pub nome: String,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Resultado da pesquisa de utilizadores, com o aviso a mostrar.
#[derive(Debug, Default)]
pub struct ResultadoPesquisa {
    pub usuarios: Vec<Usuario>,
    pub aviso: Option<String>,
}

/// Pesquisa por nome; termo vazio lista todos.
pub async fn pesquisar(api: &ApiClient, sessao: &Sessao, nome: &str) -> AppResult<ResultadoPesquisa> {
    let nome = nome.trim();
    let usuarios = if nome.is_empty() {
        usuarios::listar(api, sessao).await?
    } else {
        usuarios::pesquisar(api, sessao, nome).await?
    };
    tracing::debug!("Pesquisa de usuários '{}': {} resultado(s)", nome, usuarios.len());

    let aviso = usuarios.is_empty().then(|| AVISO_SEM_RESULTADOS.to_string());
    Ok(ResultadoPesquisa { usuarios, aviso })
}

fn linha(u: Usuario) -> UsuarioLinha {
    UsuarioLinha {
        id: u.id,
        nome: u.nome,
        login: u.login,
        email: u.email.unwrap_or_default(),
        roles: u.roles.join(", "),
    }
}

fn papeis_marcados(roles: &[String]) -> Vec<PapelOpcao> {
    PAPEIS_DEFINIDOS
        .iter()
        .map(|&nome| PapelOpcao {
            nome,
            marcado: roles.iter().any(|r| normalizar_papel(r) == nome),
        })
        .collect()
}

// GET /usuarios?nome=
pub async fn handle_pesquisar(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Query(params): Query<PesquisaParams>,
) -> AppResult<Response> {
    let (usuarios, aviso, error_message) = match pesquisar(&state.api, &sessao, &params.nome).await {
        Ok(resultado) => (resultado.usuarios, resultado.aviso, params.error),
        Err(e) if e.sessao_expirada() => return Ok(Redirect::to("/logout").into_response()),
        Err(e) => {
            tracing::error!("Erro ao pesquisar usuários: {:?}", e);
            (Vec::new(), None, Some(e.mensagem_usuario()))
        }
    };

    let template = UsuariosPage {
        nome: params.nome,
        usuarios: usuarios.into_iter().map(linha).collect(),
        aviso,
        success_message: params.success,
        error_message,
    };
    Ok(renderizar(&template)?.into_response())
}

// GET /usuarios/novo
pub async fn show_novo_usuario(Query(params): Query<FeedbackParams>) -> AppResult<Response> {
    let template = UsuarioFormPage {
        titulo: "Novo usuário".to_string(),
        acao: "/usuarios/novo".to_string(),
        criacao: true,
        nome: String::new(),
        login: String::new(),
        email: String::new(),
        papeis: papeis_marcados(&[]),
        error_message: params.error,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /usuarios/novo
pub async fn handle_criar_usuario(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Form(pares): Form<Vec<(String, String)>>,
) -> Redirect {
    let form = UsuarioForm::from_pares(pares);
    tracing::info!("POST /usuarios/novo: criando usuário '{}'", form.login);

    if let Err(msg) = form.validar(true) {
        tracing::warn!("Criação de usuário rejeitada: {}", msg);
        return falha("/usuarios/novo", &AppError::Validacao(msg));
    }

    let login = form.login.trim().to_string();
    match usuarios::criar(&state.api, &sessao, &form.into_payload()).await {
        Ok(()) => {
            tracing::info!("Usuário '{}' criado.", login);
            sucesso("/usuarios", &format!("Usuário '{}' criado com sucesso.", login))
        }
        Err(e) => {
            tracing::error!("Erro ao criar usuário '{}': {:?}", login, e);
            falha("/usuarios/novo", &e)
        }
    }
}

// GET /usuarios/{id}
pub async fn show_usuario(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(id): Path<i64>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let usuario = match usuarios::buscar(&state.api, &sessao, id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            tracing::warn!("Usuário {} não encontrado.", id);
            return Ok(redirecionar_com("/usuarios", "error", "Usuário não encontrado.").into_response());
        }
        Err(e) => return Ok(falha("/usuarios", &e).into_response()),
    };

    let template = UsuarioFormPage {
        titulo: format!("Usuário {}", usuario.login),
        acao: format!("/usuarios/{}", id),
        criacao: false,
        papeis: papeis_marcados(&usuario.roles),
        nome: usuario.nome,
        login: usuario.login,
        email: usuario.email.unwrap_or_default(),
        error_message: params.error,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /usuarios/{id}
pub async fn handle_editar_usuario(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(id): Path<i64>,
    Form(pares): Form<Vec<(String, String)>>,
) -> Redirect {
    let form = UsuarioForm::from_pares(pares);
    let voltar = format!("/usuarios/{}", id);
    tracing::info!("POST /usuarios/{}: atualizando '{}'", id, form.login);

    if let Err(msg) = form.validar(false) {
        tracing::warn!("Edição do usuário {} rejeitada: {}", id, msg);
        return falha(&voltar, &AppError::Validacao(msg));
    }

    match usuarios::atualizar(&state.api, &sessao, id, &form.into_payload()).await {
        Ok(()) => {
            tracing::info!("✅ Usuário {} atualizado.", id);
            sucesso("/usuarios", "Dados do usuário atualizados.")
        }
        Err(e) => {
            tracing::error!("Erro ao atualizar usuário {}: {:?}", id, e);
            falha(&voltar, &e)
        }
    }
}
