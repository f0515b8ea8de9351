// src/web/semestre_handlers.rs
use crate::{
    api::semestres,
    error::{AppError, AppResult},
    models::{semestre::SemestreForm, sessao::Sessao},
    state::AppState,
    templates::{SemestreFormPage, SemestreLinha, SemestresPage},
    web::{falha, redirecionar_com, renderizar, sucesso, FeedbackParams},
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

// GET /semestres
pub async fn handle_listar(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let (lista, error_message) = match semestres::listar(&state.api, &sessao).await {
        Ok(lista) => (lista, params.error),
        Err(e) if e.sessao_expirada() => return Ok(Redirect::to("/logout").into_response()),
        Err(e) => {
            tracing::error!("Erro ao listar semestres: {:?}", e);
            (Vec::new(), Some(e.mensagem_usuario()))
        }
    };

    let template = SemestresPage {
        semestres: lista
            .into_iter()
            .map(|s| SemestreLinha {
                id: s.id,
                periodo: s.periodo(),
                nome: s.nome,
            })
            .collect(),
        success_message: params.success,
        error_message,
    };
    Ok(renderizar(&template)?.into_response())
}

// GET /semestres/novo
pub async fn show_novo_semestre(Query(params): Query<FeedbackParams>) -> AppResult<Response> {
    let template = SemestreFormPage {
        titulo: "Novo semestre".to_string(),
        acao: "/semestres/novo".to_string(),
        nome: String::new(),
        data_inicio: String::new(),
        data_fim: String::new(),
        error_message: params.error,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /semestres/novo
pub async fn handle_criar_semestre(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Form(form): Form<SemestreForm>,
) -> Redirect {
    let payload = match form.validar() {
        Ok(p) => p,
        Err(msg) => return falha("/semestres/novo", &AppError::Validacao(msg)),
    };

    match semestres::criar(&state.api, &sessao, &payload).await {
        Ok(()) => {
            tracing::info!("Semestre '{}' criado.", payload.nome);
            sucesso("/semestres", &format!("Semestre '{}' criado com sucesso.", payload.nome))
        }
        Err(e) => {
            tracing::error!("Erro ao criar semestre '{}': {:?}", payload.nome, e);
            falha("/semestres/novo", &e)
        }
    }
}

// GET /semestres/{id}
pub async fn show_semestre(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(id): Path<i64>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let semestre = match semestres::buscar(&state.api, &sessao, id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(redirecionar_com("/semestres", "error", "Semestre não encontrado.").into_response())
        }
        Err(e) => return Ok(falha("/semestres", &e).into_response()),
    };

    // <input type="date"> espera AAAA-MM-DD
    let data = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    let template = SemestreFormPage {
        titulo: format!("Semestre {}", semestre.nome),
        acao: format!("/semestres/{}", id),
        data_inicio: data(semestre.data_inicio),
        data_fim: data(semestre.data_fim),
        nome: semestre.nome,
        error_message: params.error,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /semestres/{id}
pub async fn handle_editar_semestre(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(id): Path<i64>,
    Form(form): Form<SemestreForm>,
) -> Redirect {
    let voltar = format!("/semestres/{}", id);
    let payload = match form.validar() {
        Ok(p) => p,
        Err(msg) => return falha(&voltar, &AppError::Validacao(msg)),
    };

    match semestres::atualizar(&state.api, &sessao, id, &payload).await {
        Ok(()) => {
            tracing::info!("✅ Semestre {} atualizado.", id);
            sucesso("/semestres", "Semestre atualizado.")
        }
        Err(e) => {
            tracing::error!("Erro ao atualizar semestre {}: {:?}", id, e);
            falha(&voltar, &e)
        }
    }
}
