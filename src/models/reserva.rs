// src/models/reserva.rs
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const STATUS_APROVADA: &str = "APROVADA";
pub const STATUS_PENDENTE: &str = "PENDENTE";

pub const DIAS_SEMANA: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoReserva {
    Normal,
    Fixa,
    #[serde(other)]
    Outro,
}

impl TipoReserva {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoReserva::Normal => "NORMAL",
            TipoReserva::Fixa => "FIXA",
            TipoReserva::Outro => "OUTRO",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioResumo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LaboratorioResumo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SemestreResumo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: Option<String>,
}

/// Reserva devolvida por /reserva.
///
/// Uma reserva normal traz `dataHoraInicio`/`dataHoraFim`; uma fixa traz
/// `diaSemana`/`horaInicio`/`horaFim`. Uma fixa já materializada em datas
/// concretas pode trazer ambos.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reserva {
    pub id: i64,
    #[serde(default)]
    pub data_hora_inicio: Option<NaiveDateTime>,
    #[serde(default)]
    pub data_hora_fim: Option<NaiveDateTime>,
    #[serde(default)]
    pub dia_semana: Option<i64>,
    #[serde(default)]
    pub hora_inicio: Option<String>,
    #[serde(default)]
    pub hora_fim: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tipo: Option<TipoReserva>,
    #[serde(default)]
    pub usuario: Option<UsuarioResumo>,
    #[serde(default)]
    pub laboratorio: Option<LaboratorioResumo>,
    #[serde(default)]
    pub semestre: Option<SemestreResumo>,
}

impl Reserva {
    fn status_normalizado(&self) -> Option<String> {
        self.status
            .as_deref()
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
    }

    pub fn esta_aprovada(&self) -> bool {
        self.status_normalizado().as_deref() == Some(STATUS_APROVADA)
    }

    pub fn esta_pendente(&self) -> bool {
        self.status_normalizado().as_deref() == Some(STATUS_PENDENTE)
    }

    pub fn e_fixa(&self) -> bool {
        self.tipo == Some(TipoReserva::Fixa)
    }

    pub fn dono_login(&self) -> Option<&str> {
        self.usuario.as_ref().and_then(|u| u.login.as_deref())
    }

    pub fn dono_roles(&self) -> &[String] {
        self.usuario.as_ref().map(|u| u.roles.as_slice()).unwrap_or(&[])
    }

    pub fn nome_usuario(&self) -> &str {
        self.usuario
            .as_ref()
            .and_then(|u| u.nome.as_deref())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Usuário")
    }

    pub fn nome_laboratorio(&self) -> &str {
        self.laboratorio
            .as_ref()
            .and_then(|l| l.nome.as_deref())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Lab")
    }

    /// Texto do horário para a listagem.
    pub fn horario(&self) -> String {
        match (self.data_hora_inicio, self.data_hora_fim) {
            (Some(inicio), Some(fim)) => format!(
                "{} {}–{}",
                inicio.format("%d/%m/%Y"),
                inicio.format("%H:%M"),
                fim.format("%H:%M")
            ),
            (Some(inicio), None) => inicio.format("%d/%m/%Y %H:%M").to_string(),
            _ => match (self.dia_semana, self.hora_inicio.as_deref()) {
                (Some(dia), Some(hora)) => format!(
                    "{} {}–{}",
                    DIAS_SEMANA[dia.rem_euclid(7) as usize],
                    hora_curta(hora),
                    self.hora_fim.as_deref().map(hora_curta).unwrap_or("?")
                ),
                _ => "—".to_string(),
            },
        }
    }
}

/// "08:00:00" -> "08:00"
pub fn hora_curta(hora: &str) -> &str {
    hora.get(..5).unwrap_or(hora)
}

fn parse_hora(txt: &str) -> Option<NaiveTime> {
    let txt = txt.trim();
    NaiveTime::parse_from_str(txt, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(txt, "%H:%M:%S"))
        .ok()
}

fn parse_data_hora(txt: &str) -> Option<NaiveDateTime> {
    let txt = txt.trim();
    NaiveDateTime::parse_from_str(txt, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(txt, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn parse_id(txt: &str, campo: &str) -> Result<i64, String> {
    txt.trim()
        .parse::<i64>()
        .map_err(|_| format!("Selecione {}.", campo))
}

/// Corpo de POST /reserva.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservaPayload {
    pub laboratorio_id: i64,
    pub semestre_id: i64,
    pub data_hora_inicio: NaiveDateTime,
    pub data_hora_fim: NaiveDateTime,
    pub tipo: TipoReserva,
}

/// Corpo de POST /reserva/fixa.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservaFixaPayload {
    pub laboratorio_id: i64,
    pub semestre_id: i64,
    pub dia_semana: i64,
    pub hora_inicio: String,
    pub hora_fim: String,
    pub tipo: TipoReserva,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservaForm {
    #[serde(default)]
    pub laboratorio_id: String,
    #[serde(default)]
    pub semestre_id: String,
    #[serde(default)]
    pub data_hora_inicio: String,
    #[serde(default)]
    pub data_hora_fim: String,
}

impl ReservaForm {
    pub fn validar(&self) -> Result<ReservaPayload, String> {
        let laboratorio_id = parse_id(&self.laboratorio_id, "um laboratório")?;
        let semestre_id = parse_id(&self.semestre_id, "um semestre")?;
        let inicio = parse_data_hora(&self.data_hora_inicio)
            .ok_or_else(|| "Data/hora de início inválida.".to_string())?;
        let fim = parse_data_hora(&self.data_hora_fim)
            .ok_or_else(|| "Data/hora de fim inválida.".to_string())?;
        if fim <= inicio {
            return Err("O fim da reserva deve ser posterior ao início.".to_string());
        }
        Ok(ReservaPayload {
            laboratorio_id,
            semestre_id,
            data_hora_inicio: inicio,
            data_hora_fim: fim,
            tipo: TipoReserva::Normal,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservaFixaForm {
    #[serde(default)]
    pub laboratorio_id: String,
    #[serde(default)]
    pub semestre_id: String,
    #[serde(default)]
    pub dia_semana: String,
    #[serde(default)]
    pub hora_inicio: String,
    #[serde(default)]
    pub hora_fim: String,
}

impl ReservaFixaForm {
    pub fn validar(&self) -> Result<ReservaFixaPayload, String> {
        let laboratorio_id = parse_id(&self.laboratorio_id, "um laboratório")?;
        let semestre_id = parse_id(&self.semestre_id, "um semestre")?;
        let dia_semana = match self.dia_semana.trim().parse::<i64>() {
            Ok(d) if (0..7).contains(&d) => d,
            _ => return Err("Selecione o dia da semana.".to_string()),
        };
        let inicio = parse_hora(&self.hora_inicio)
            .ok_or_else(|| "Hora de início inválida.".to_string())?;
        let fim =
            parse_hora(&self.hora_fim).ok_or_else(|| "Hora de fim inválida.".to_string())?;
        if fim <= inicio {
            return Err("A hora de fim deve ser posterior à hora de início.".to_string());
        }
        Ok(ReservaFixaPayload {
            laboratorio_id,
            semestre_id,
            dia_semana,
            hora_inicio: inicio.format("%H:%M").to_string(),
            hora_fim: fim.format("%H:%M").to_string(),
            tipo: TipoReserva::Fixa,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_record() {
        let reserva: Reserva = serde_json::from_str(
            r#"{
                "id": 7,
                "dataHoraInicio": "2025-03-10T08:00:00",
                "dataHoraFim": "2025-03-10T10:00:00",
                "status": "aprovada",
                "tipo": "NORMAL",
                "usuario": {"nome": "Ana", "login": "ana", "roles": ["PROF"]},
                "laboratorio": {"id": 2, "nome": "Lab Redes"}
            }"#,
        )
        .unwrap();
        assert!(reserva.esta_aprovada());
        assert_eq!(reserva.tipo, Some(TipoReserva::Normal));
        assert_eq!(reserva.dono_login(), Some("ana"));
        assert_eq!(reserva.horario(), "10/03/2025 08:00–10:00");
    }

    #[test]
    fn unknown_type_does_not_break_parsing() {
        let reserva: Reserva =
            serde_json::from_str(r#"{"id": 1, "tipo": "EVENTO", "status": null}"#).unwrap();
        assert_eq!(reserva.tipo, Some(TipoReserva::Outro));
        assert_eq!(reserva.nome_usuario(), "Usuário");
        assert_eq!(reserva.nome_laboratorio(), "Lab");
    }

    #[test]
    fn recurring_schedule_text() {
        let reserva = Reserva {
            id: 3,
            dia_semana: Some(2),
            hora_inicio: Some("08:00:00".into()),
            hora_fim: Some("10:00:00".into()),
            ..Default::default()
        };
        assert_eq!(reserva.horario(), "Terça 08:00–10:00");
    }

    #[test]
    fn validates_one_off_form() {
        let form = ReservaForm {
            laboratorio_id: "2".into(),
            semestre_id: "1".into(),
            data_hora_inicio: "2025-03-10T10:00".into(),
            data_hora_fim: "2025-03-10T08:00".into(),
        };
        assert!(form.validar().is_err());

        let form = ReservaForm {
            data_hora_fim: "2025-03-10T12:00".into(),
            ..form
        };
        let payload = form.validar().unwrap();
        assert_eq!(payload.tipo, TipoReserva::Normal);
    }

    #[test]
    fn validates_fixed_form() {
        let form = ReservaFixaForm {
            laboratorio_id: "2".into(),
            semestre_id: "1".into(),
            dia_semana: "7".into(),
            hora_inicio: "08:00".into(),
            hora_fim: "10:00".into(),
        };
        assert_eq!(form.validar().unwrap_err(), "Selecione o dia da semana.");

        let form = ReservaFixaForm {
            dia_semana: "2".into(),
            ..form
        };
        let payload = form.validar().unwrap();
        assert_eq!(payload.hora_inicio, "08:00");
        assert_eq!(payload.tipo, TipoReserva::Fixa);
    }
}
