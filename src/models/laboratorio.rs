// src/models/laboratorio.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Laboratorio {
    pub id: i64,
    #[serde(default, deserialize_with = "super::texto_ou_vazio")]
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub capacidade: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaboratorioPayload {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacidade: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaboratorioForm {
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub capacidade: String,
}

impl LaboratorioForm {
    pub fn validar(&self) -> Result<LaboratorioPayload, String> {
        let nome = self.nome.trim();
        if nome.is_empty() {
            return Err("O nome do laboratório é obrigatório.".to_string());
        }
        let capacidade = match self.capacidade.trim() {
            "" => None,
            txt => match txt.parse::<i32>() {
                Ok(n) if n > 0 => Some(n),
                _ => return Err("A capacidade deve ser um número positivo.".to_string()),
            },
        };
        let descricao = self.descricao.trim();
        Ok(LaboratorioPayload {
            nome: nome.to_string(),
            descricao: (!descricao.is_empty()).then(|| descricao.to_string()),
            capacidade,
        })
    }
}
