// src/web/reserva_handlers.rs
use crate::{
    api::{laboratorios, reservas, semestres, ApiClient},
    error::{AppError, AppResult},
    models::{
        laboratorio::Laboratorio,
        reserva::{Reserva, ReservaFixaForm, ReservaForm, DIAS_SEMANA},
        semestre::Semestre,
        sessao::Sessao,
    },
    services::{
        calendario_service::{cor_da_reserva, eventos_json, mapear_eventos},
        permissoes,
    },
    state::AppState,
    templates::{OpcaoSelect, ReservaLinha, ReservasFixasPage, ReservasPage},
    web::{falha, id_opcional, redirecionar_com, renderizar, sucesso, Degradacao},
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use futures_util::future::join3;
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct ReservasParams {
    pub laboratorio: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Campos escondidos dos botões aprovar/cancelar: para onde voltar.
#[derive(Deserialize, Debug, Default)]
pub struct AcaoReservaForm {
    pub laboratorio: Option<String>,
    pub origem: Option<String>,
}

impl AcaoReservaForm {
    fn destino(&self) -> String {
        let base = if self.origem.as_deref() == Some("fixas") {
            "/reservas/fixas"
        } else {
            "/reservas"
        };
        match id_opcional(self.laboratorio.as_deref()) {
            Some(id) => format!("{}?laboratorio={}", base, id),
            None => base.to_string(),
        }
    }
}

/// Dados comuns às duas páginas de calendário.
struct DadosCalendario {
    laboratorios: Vec<Laboratorio>,
    semestres: Vec<Semestre>,
    reservas: Vec<Reserva>,
    degradacao: Degradacao,
}

async fn carregar(
    api: &ApiClient,
    sessao: &Sessao,
    laboratorio_id: Option<i64>,
    fixas: bool,
) -> DadosCalendario {
    let lista_reservas = async {
        if fixas {
            reservas::listar_fixas(api, sessao, laboratorio_id).await
        } else {
            reservas::listar(api, sessao, laboratorio_id).await
        }
    };
    let (labs, sems, lista) = join3(
        laboratorios::listar(api, sessao),
        semestres::listar(api, sessao),
        lista_reservas,
    )
    .await;

    let mut degradacao = Degradacao::default();
    DadosCalendario {
        laboratorios: degradacao.valor(labs, "laboratórios"),
        semestres: degradacao.valor(sems, "semestres"),
        reservas: degradacao.valor(lista, "reservas"),
        degradacao,
    }
}

fn opcoes_laboratorios(labs: &[Laboratorio], atual: Option<i64>) -> Vec<OpcaoSelect> {
    labs.iter()
        .map(|l| OpcaoSelect {
            valor: l.id.to_string(),
            rotulo: l.nome.clone(),
            selecionado: Some(l.id) == atual,
        })
        .collect()
}

fn opcoes_semestres(sems: &[Semestre]) -> Vec<OpcaoSelect> {
    sems.iter()
        .map(|s| OpcaoSelect {
            valor: s.id.to_string(),
            rotulo: s.nome.clone(),
            selecionado: false,
        })
        .collect()
}

fn linhas(reservas: &[Reserva], sessao: &Sessao) -> Vec<ReservaLinha> {
    reservas
        .iter()
        .map(|r| ReservaLinha {
            id: r.id,
            titulo: format!("{} — {}", r.nome_usuario(), r.nome_laboratorio()),
            horario: r.horario(),
            status: r.status.clone().unwrap_or_default(),
            cor: cor_da_reserva(r),
            pode_aprovar: permissoes::pode_aprovar(sessao.roles(), r),
            pode_cancelar: permissoes::pode_cancelar(sessao.roles(), sessao.login(), r),
        })
        .collect()
}

fn com_laboratorio(base: &str, laboratorio_id: i64) -> String {
    format!("{}?laboratorio={}", base, laboratorio_id)
}

// GET /reservas?laboratorio=
pub async fn handle_pagina_reservas(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Query(params): Query<ReservasParams>,
) -> AppResult<Response> {
    let atual = id_opcional(params.laboratorio.as_deref());
    tracing::debug!("GET /reservas: laboratório {:?}", atual);

    let dados = carregar(&state.api, &sessao, atual, false).await;
    if dados.degradacao.sessao_expirada {
        return Ok(Redirect::to("/logout").into_response());
    }

    let template = ReservasPage {
        laboratorio_atual: atual.map(|id| id.to_string()).unwrap_or_default(),
        laboratorios: opcoes_laboratorios(&dados.laboratorios, atual),
        semestres: opcoes_semestres(&dados.semestres),
        eventos_json: eventos_json(&mapear_eventos(&dados.reservas)),
        reservas: linhas(&dados.reservas, &sessao),
        pode_criar: permissoes::pode_criar_reserva(sessao.roles()),
        avisos: dados.degradacao.avisos,
        success_message: params.success,
        error_message: params.error,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /reservas
pub async fn handle_criar_reserva(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Form(form): Form<ReservaForm>,
) -> Redirect {
    if !permissoes::pode_criar_reserva(sessao.roles()) {
        tracing::warn!("'{}' tentou criar reserva sem permissão.", sessao.login());
        return redirecionar_com("/reservas", "error", "Sem permissão para criar reservas.");
    }

    let payload = match form.validar() {
        Ok(p) => p,
        Err(msg) => return falha("/reservas", &AppError::Validacao(msg)),
    };
    let destino = com_laboratorio("/reservas", payload.laboratorio_id);

    match reservas::criar(&state.api, &sessao, &payload).await {
        Ok(()) => {
            tracing::info!("Reserva criada por '{}' no laboratório {}.", sessao.login(), payload.laboratorio_id);
            sucesso(&destino, "Reserva solicitada com sucesso.")
        }
        Err(e) => {
            tracing::error!("Erro ao criar reserva: {:?}", e);
            falha(&destino, &e)
        }
    }
}

// POST /reservas/{id}/aprovar
pub async fn handle_aprovar(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(id): Path<i64>,
    Form(form): Form<AcaoReservaForm>,
) -> Redirect {
    let destino = form.destino();

    let reserva = match reservas::buscar(&state.api, &sessao, id).await {
        Ok(Some(r)) => r,
        Ok(None) => return redirecionar_com(&destino, "error", "Reserva não encontrada."),
        Err(e) => return falha(&destino, &e),
    };
    if !permissoes::pode_aprovar(sessao.roles(), &reserva) {
        tracing::warn!("'{}' não pode aprovar a reserva {}.", sessao.login(), id);
        return redirecionar_com(&destino, "error", "Sem permissão para aprovar esta reserva.");
    }

    match reservas::aprovar(&state.api, &sessao, id).await {
        Ok(()) => {
            tracing::info!("✅ Reserva {} aprovada por '{}'.", id, sessao.login());
            sucesso(&destino, "Reserva aprovada.")
        }
        Err(e) => {
            tracing::error!("Erro ao aprovar reserva {}: {:?}", id, e);
            falha(&destino, &e)
        }
    }
}

// POST /reservas/{id}/cancelar
pub async fn handle_cancelar(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Path(id): Path<i64>,
    Form(form): Form<AcaoReservaForm>,
) -> Redirect {
    let destino = form.destino();

    let reserva = match reservas::buscar(&state.api, &sessao, id).await {
        Ok(Some(r)) => r,
        Ok(None) => return redirecionar_com(&destino, "error", "Reserva não encontrada."),
        Err(e) => return falha(&destino, &e),
    };
    if !permissoes::pode_cancelar(sessao.roles(), sessao.login(), &reserva) {
        tracing::warn!("'{}' não pode cancelar a reserva {}.", sessao.login(), id);
        return redirecionar_com(&destino, "error", "Sem permissão para cancelar esta reserva.");
    }

    match reservas::cancelar(&state.api, &sessao, id).await {
        Ok(()) => {
            tracing::info!("Reserva {} cancelada por '{}'.", id, sessao.login());
            sucesso(&destino, "Reserva cancelada.")
        }
        Err(e) => {
            tracing::error!("Erro ao cancelar reserva {}: {:?}", id, e);
            falha(&destino, &e)
        }
    }
}

// GET /reservas/fixas?laboratorio=
pub async fn handle_pagina_fixas(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Query(params): Query<ReservasParams>,
) -> AppResult<Response> {
    let atual = id_opcional(params.laboratorio.as_deref());

    let dados = carregar(&state.api, &sessao, atual, true).await;
    if dados.degradacao.sessao_expirada {
        return Ok(Redirect::to("/logout").into_response());
    }

    let dias = DIAS_SEMANA
        .iter()
        .enumerate()
        .map(|(i, nome)| OpcaoSelect {
            valor: i.to_string(),
            rotulo: nome.to_string(),
            selecionado: false,
        })
        .collect();

    let template = ReservasFixasPage {
        laboratorio_atual: atual.map(|id| id.to_string()).unwrap_or_default(),
        laboratorios: opcoes_laboratorios(&dados.laboratorios, atual),
        semestres: opcoes_semestres(&dados.semestres),
        dias,
        eventos_json: eventos_json(&mapear_eventos(&dados.reservas)),
        reservas: linhas(&dados.reservas, &sessao),
        pode_criar: permissoes::pode_criar_reserva_fixa(sessao.roles()),
        avisos: dados.degradacao.avisos,
        success_message: params.success,
        error_message: params.error,
    };
    Ok(renderizar(&template)?.into_response())
}

// POST /reservas/fixas
pub async fn handle_criar_fixa(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
    Form(form): Form<ReservaFixaForm>,
) -> Redirect {
    if !permissoes::pode_criar_reserva_fixa(sessao.roles()) {
        tracing::warn!("'{}' tentou criar reserva fixa sem permissão.", sessao.login());
        return redirecionar_com("/reservas/fixas", "error", "Apenas administradores criam reservas fixas.");
    }

    let payload = match form.validar() {
        Ok(p) => p,
        Err(msg) => return falha("/reservas/fixas", &AppError::Validacao(msg)),
    };
    let destino = com_laboratorio("/reservas/fixas", payload.laboratorio_id);

    match reservas::criar_fixa(&state.api, &sessao, &payload).await {
        Ok(()) => {
            tracing::info!(
                "Reserva fixa criada: laboratório {}, {} {}-{}",
                payload.laboratorio_id,
                DIAS_SEMANA[payload.dia_semana as usize],
                payload.hora_inicio,
                payload.hora_fim
            );
            sucesso(&destino, "Reserva fixa criada com sucesso.")
        }
        Err(e) => {
            tracing::error!("Erro ao criar reserva fixa: {:?}", e);
            falha(&destino, &e)
        }
    }
}
