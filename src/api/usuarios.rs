// src/api/usuarios.rs
use super::ApiClient;
use crate::{
    error::AppResult,
    models::{
        sessao::Sessao,
        usuario::{Usuario, UsuarioPayload},
    },
};

pub async fn listar(api: &ApiClient, sessao: &Sessao) -> AppResult<Vec<Usuario>> {
    api.get_lista("/usuarios", sessao).await
}

pub async fn pesquisar(api: &ApiClient, sessao: &Sessao, nome: &str) -> AppResult<Vec<Usuario>> {
    let path = format!("/usuarios/pesquisar?nome={}", urlencoding::encode(nome));
    api.get_lista(&path, sessao).await
}

pub async fn buscar(api: &ApiClient, sessao: &Sessao, id: i64) -> AppResult<Option<Usuario>> {
    api.get_registro(&format!("/usuarios/{}", id), sessao).await
}

pub async fn criar(api: &ApiClient, sessao: &Sessao, payload: &UsuarioPayload) -> AppResult<()> {
    api.post_json("/usuarios", sessao, payload).await
}

pub async fn atualizar(
    api: &ApiClient,
    sessao: &Sessao,
    id: i64,
    payload: &UsuarioPayload,
) -> AppResult<()> {
    api.put_json(&format!("/usuarios/{}", id), sessao, payload).await
}

pub async fn total(api: &ApiClient, sessao: &Sessao) -> AppResult<i64> {
    api.get_numero("/usuarios/total", sessao).await
}
