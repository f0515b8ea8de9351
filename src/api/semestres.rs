// src/api/semestres.rs
use super::ApiClient;
use crate::{
    error::AppResult,
    models::{
        semestre::{Semestre, SemestrePayload},
        sessao::Sessao,
    },
};

pub async fn listar(api: &ApiClient, sessao: &Sessao) -> AppResult<Vec<Semestre>> {
    api.get_lista("/semestre", sessao).await
}

pub async fn buscar(api: &ApiClient, sessao: &Sessao, id: i64) -> AppResult<Option<Semestre>> {
    api.get_registro(&format!("/semestre/{}", id), sessao).await
}

pub async fn criar(api: &ApiClient, sessao: &Sessao, payload: &SemestrePayload) -> AppResult<()> {
    api.post_json("/semestre", sessao, payload).await
}

pub async fn atualizar(
    api: &ApiClient,
    sessao: &Sessao,
    id: i64,
    payload: &SemestrePayload,
) -> AppResult<()> {
    api.put_json(&format!("/semestre/{}", id), sessao, payload).await
}
