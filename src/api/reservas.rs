// src/api/reservas.rs
use super::ApiClient;
use crate::{
    error::AppResult,
    models::{
        reserva::{Reserva, ReservaFixaPayload, ReservaPayload},
        sessao::Sessao,
    },
};

/// Reservas normais, de um laboratório ou de todos.
pub async fn listar(
    api: &ApiClient,
    sessao: &Sessao,
    laboratorio_id: Option<i64>,
) -> AppResult<Vec<Reserva>> {
    let path = match laboratorio_id {
        Some(id) => format!("/reserva/laboratorio/{}", id),
        None => "/reserva".to_string(),
    };
    api.get_lista(&path, sessao).await
}

/// Reservas fixas (semanais), de um laboratório ou de todos.
pub async fn listar_fixas(
    api: &ApiClient,
    sessao: &Sessao,
    laboratorio_id: Option<i64>,
) -> AppResult<Vec<Reserva>> {
    let path = match laboratorio_id {
        Some(id) => format!("/reserva/fixa/laboratorio/{}", id),
        None => "/reserva/fixa".to_string(),
    };
    api.get_lista(&path, sessao).await
}

pub async fn buscar(api: &ApiClient, sessao: &Sessao, id: i64) -> AppResult<Option<Reserva>> {
    api.get_registro(&format!("/reserva/{}", id), sessao).await
}

pub async fn criar(api: &ApiClient, sessao: &Sessao, payload: &ReservaPayload) -> AppResult<()> {
    api.post_json("/reserva", sessao, payload).await
}

pub async fn criar_fixa(
    api: &ApiClient,
    sessao: &Sessao,
    payload: &ReservaFixaPayload,
) -> AppResult<()> {
    api.post_json("/reserva/fixa", sessao, payload).await
}

pub async fn aprovar(api: &ApiClient, sessao: &Sessao, id: i64) -> AppResult<()> {
    api.put_vazio(&format!("/reserva/{}/aprovar", id), sessao).await
}

pub async fn cancelar(api: &ApiClient, sessao: &Sessao, id: i64) -> AppResult<()> {
    api.put_vazio(&format!("/reserva/{}/cancelar", id), sessao).await
}

pub async fn total(api: &ApiClient, sessao: &Sessao) -> AppResult<i64> {
    api.get_numero("/reserva/total", sessao).await
}

pub async fn total_pendentes(api: &ApiClient, sessao: &Sessao) -> AppResult<i64> {
    api.get_numero("/reserva/pendentes/total", sessao).await
}
