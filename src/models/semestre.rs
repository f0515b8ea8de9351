// src/models/semestre.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Semestre {
    pub id: i64,
    #[serde(default, deserialize_with = "super::texto_ou_vazio")]
    pub nome: String,
    #[serde(default)]
    pub data_inicio: Option<NaiveDate>,
    #[serde(default)]
    pub data_fim: Option<NaiveDate>,
}

impl Semestre {
    pub fn periodo(&self) -> String {
        match (self.data_inicio, self.data_fim) {
            (Some(i), Some(f)) => format!("{} a {}", i.format("%d/%m/%Y"), f.format("%d/%m/%Y")),
            _ => "—".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemestrePayload {
    pub nome: String,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemestreForm {
    pub nome: String,
    #[serde(default)]
    pub data_inicio: String,
    #[serde(default)]
    pub data_fim: String,
}

impl SemestreForm {
    pub fn validar(&self) -> Result<SemestrePayload, String> {
        let nome = self.nome.trim();
        if nome.is_empty() {
            return Err("O nome do semestre é obrigatório.".to_string());
        }
        let inicio = NaiveDate::parse_from_str(self.data_inicio.trim(), "%Y-%m-%d")
            .map_err(|_| "Data de início inválida.".to_string())?;
        let fim = NaiveDate::parse_from_str(self.data_fim.trim(), "%Y-%m-%d")
            .map_err(|_| "Data de fim inválida.".to_string())?;
        if fim < inicio {
            return Err("A data de fim deve ser posterior à data de início.".to_string());
        }
        Ok(SemestrePayload {
            nome: nome.to_string(),
            data_inicio: inicio,
            data_fim: fim,
        })
    }
}
