// src/api/laboratorios.rs
use super::ApiClient;
use crate::{
    error::AppResult,
    models::{
        laboratorio::{Laboratorio, LaboratorioPayload},
        sessao::Sessao,
    },
};

pub async fn listar(api: &ApiClient, sessao: &Sessao) -> AppResult<Vec<Laboratorio>> {
    api.get_lista("/laboratorios", sessao).await
}

pub async fn buscar(api: &ApiClient, sessao: &Sessao, id: i64) -> AppResult<Option<Laboratorio>> {
    api.get_registro(&format!("/laboratorios/{}", id), sessao).await
}

pub async fn criar(api: &ApiClient, sessao: &Sessao, payload: &LaboratorioPayload) -> AppResult<()> {
    api.post_json("/laboratorios", sessao, payload).await
}

pub async fn atualizar(
    api: &ApiClient,
    sessao: &Sessao,
    id: i64,
    payload: &LaboratorioPayload,
) -> AppResult<()> {
    api.put_json(&format!("/laboratorios/{}", id), sessao, payload).await
}

pub async fn total(api: &ApiClient, sessao: &Sessao) -> AppResult<i64> {
    api.get_numero("/laboratorios/total", sessao).await
}
