// src/web/laboratorio_handlers.rs
use crate::{
    api::laboratorios,
    error::{AppError, AppResult},
    models::{
        laboratorio::{Laboratorio, LaboratorioForm},
        sessao::Sessao,
    },
    state::AppState,
    templates::{LaboratorioFormPage, LaboratorioLinha, LaboratoriosPage},
    web::{falha, redirecionar_com, renderizar, sucesso, FeedbackParams},
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

fn linha(l: Laboratorio) -> LaboratorioLinha {
    LaboratorioLinha {
        id: l.id,
        nome: l.nome,
        descricao: l.descricao.unwrap_or_default(),
        capacidade: l.capacidade.map(|c| c.to_string()).unwrap_or_default(),
    }
}

// GET /laboratorios
pub async fn handle_listar(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let (laboratorios, error_message) = match laboratorios::listar(&state.api, &sessao).await {
        Ok(lista) => (lista, params.error),
        Err(e) if e.sessao_expirada() => return Ok(Redirect::to("/logout").into_response()),
        Err(e) => {
            tracing::error!("Erro ao listar laboratórios: {:?}", e);
            (Vec::new(), Some(e.mensagem_usuario()))
        }
    };

    let template = LaboratoriosPage {
        laboratorios: laboratorios.into_iter().map(linha).collect(),
        success_message: params.success,
        error_message,
    };
    Ok(renderizar(&template)?.into_response())
}

// GET /laboratorios/novo
pub async fn show_novo_laboratorio(Query(params): Query<FeedbackParams>) -> AppResult<Response> {
    let template = LaboratorioFormPage {
        titulo: "Novo laboratório".to_string(),
        acao: "/laboratorios/novo".to_string(),
        nome: String::new(),
        descricao: String::new(),
        capacidade: String::new(),
        error_message: params.error,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /laboratorios/novo
pub async fn handle_criar_laboratorio(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Form(form): Form<LaboratorioForm>,
) -> Redirect {
    let payload = match form.validar() {
        Ok(p) => p,
        Err(msg) => return falha("/laboratorios/novo", &AppError::Validacao(msg)),
    };

    match laboratorios::criar(&state.api, &sessao, &payload).await {
        Ok(()) => {
            tracing::info!("Laboratório '{}' criado.", payload.nome);
            sucesso("/laboratorios", &format!("Laboratório '{}' criado com sucesso.", payload.nome))
        }
        Err(e) => {
            tracing::error!("Erro ao criar laboratório '{}': {:?}", payload.nome, e);
            falha("/laboratorios/novo", &e)
        }
    }
}

// GET /laboratorios/{id}
pub async fn show_laboratorio(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(id): Path<i64>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    let lab = match laboratorios::buscar(&state.api, &sessao, id).await {
        Ok(Some(l)) => l,
        Ok(None) => {
            return Ok(redirecionar_com("/laboratorios", "error", "Laboratório não encontrado.").into_response())
        }
        Err(e) => return Ok(falha("/laboratorios", &e).into_response()),
    };

    let dados = linha(lab);
    let template = LaboratorioFormPage {
        titulo: format!("Laboratório {}", dados.nome),
        acao: format!("/laboratorios/{}", id),
        nome: dados.nome,
        descricao: dados.descricao,
        capacidade: dados.capacidade,
        error_message: params.error,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /laboratorios/{id}
pub async fn handle_editar_laboratorio(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(id): Path<i64>,
    Form(form): Form<LaboratorioForm>,
) -> Redirect {
    let voltar = format!("/laboratorios/{}", id);
    let payload = match form.validar() {
        Ok(p) => p,
        Err(msg) => return falha(&voltar, &AppError::Validacao(msg)),
    };

    match laboratorios::atualizar(&state.api, &sessao, id, &payload).await {
        Ok(()) => {
            tracing::info!("✅ Laboratório {} atualizado.", id);
            sucesso("/laboratorios", "Laboratório atualizado.")
        }
        Err(e) => {
            tracing::error!("Erro ao atualizar laboratório {}: {:?}", id, e);
            falha(&voltar, &e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_leaves_missing_fields_blank() {
        let l = linha(Laboratorio {
            id: 2,
            nome: "Lab 2".into(),
            descricao: None,
            capacidade: Some(30),
        });
        assert_eq!(l.descricao, "");
        assert_eq!(l.capacidade, "30");
    }
}
