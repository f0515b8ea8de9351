// src/api/dashboard.rs
use super::ApiClient;
use crate::{
    error::AppResult,
    models::{
        dashboard::{ReservasPorMes, UsoLaboratorio},
        sessao::Sessao,
    },
};

pub async fn reservas_por_mes(api: &ApiClient, sessao: &Sessao) -> AppResult<Vec<ReservasPorMes>> {
    api.get_lista("/reserva/estatisticas/mensal", sessao).await
}

pub async fn uso_laboratorios(api: &ApiClient, sessao: &Sessao) -> AppResult<Vec<UsoLaboratorio>> {
    api.get_lista("/reserva/estatisticas/uso-laboratorios", sessao).await
}
