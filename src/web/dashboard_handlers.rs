// src/web/dashboard_handlers.rs
use crate::{
    api::{dashboard, laboratorios, reservas, usuarios},
    error::AppResult,
    models::{
        dashboard::{barras, Indicadores},
        sessao::Sessao,
    },
    state::AppState,
    templates::DashboardPage,
    web::{renderizar, Degradacao},
};
use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
};

// GET /dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Extension(sessao): Extension<Sessao>,
) -> AppResult<Response> {
    tracing::debug!("GET /dashboard: carregando indicadores para {}", sessao.login());
    let api = &state.api;

    // Todas as chamadas saem juntas; cada falha vira zero/lista vazia
    let (n_usuarios, n_laboratorios, n_reservas, n_pendentes, mensal, uso) = tokio::join!(
        usuarios::total(api, &sessao),
        laboratorios::total(api, &sessao),
        reservas::total(api, &sessao),
        reservas::total_pendentes(api, &sessao),
        dashboard::reservas_por_mes(api, &sessao),
        dashboard::uso_laboratorios(api, &sessao),
    );

    let mut degradacao = Degradacao::default();
    let indicadores = Indicadores {
        usuarios: degradacao.valor(n_usuarios, "total de usuários"),
        laboratorios: degradacao.valor(n_laboratorios, "total de laboratórios"),
        reservas: degradacao.valor(n_reservas, "total de reservas"),
        pendentes: degradacao.valor(n_pendentes, "reservas pendentes"),
    };
    let mensal = degradacao.valor(mensal, "reservas por mês");
    let uso = degradacao.valor(uso, "uso dos laboratórios");

    if degradacao.sessao_expirada {
        return Ok(Redirect::to("/logout").into_response());
    }

    let template = DashboardPage {
        usuario_login: sessao.login().to_string(),
        indicadores,
        reservas_mes: barras(mensal.iter().map(|p| (p.mes.as_str(), p.total as f64))),
        uso_laboratorios: barras(uso.iter().map(|p| (p.laboratorio.as_str(), p.horas))),
        avisos: degradacao.avisos,
    };
    Ok(renderizar(&template)?.into_response())
}
