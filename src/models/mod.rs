// src/models/mod.rs
pub mod dashboard;
pub mod laboratorio;
pub mod reserva;
pub mod semestre;
pub mod sessao;
pub mod usuario;

use serde::{Deserialize, Deserializer};

/// Texto obrigatório vindo do backend: ausente ou `null` vira "".
pub(crate) fn texto_ou_vazio<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
