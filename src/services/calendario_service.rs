// src/services/calendario_service.rs
use crate::models::reserva::{hora_curta, Reserva};
use serde::Serialize;

pub const COR_APROVADA: &str = "#16a34a";
pub const COR_PENDENTE: &str = "#f59e0b";
pub const COR_FIXA: &str = "#86efac";
pub const COR_PADRAO: &str = "#6366f1";

/// Evento no formato que o FullCalendar consome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventoCalendario {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub extended_props: PropsEvento,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropsEvento {
    pub reserva_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<&'static str>,
}

pub fn cor_da_reserva(reserva: &Reserva) -> &'static str {
    if reserva.esta_aprovada() {
        COR_APROVADA
    } else if reserva.esta_pendente() {
        COR_PENDENTE
    } else if reserva.e_fixa() {
        COR_FIXA
    } else {
        COR_PADRAO
    }
}

/// Converte reservas em eventos. Cada reserva gera zero, um ou dois eventos:
/// um semanal (dia da semana + horas) e/ou um datado (início/fim absolutos).
/// A lista é sempre recalculada por inteiro.
pub fn mapear_eventos(reservas: &[Reserva]) -> Vec<EventoCalendario> {
    reservas.iter().flat_map(eventos_da_reserva).collect()
}

fn eventos_da_reserva(reserva: &Reserva) -> Vec<EventoCalendario> {
    let title = format!("{} — {}", reserva.nome_usuario(), reserva.nome_laboratorio());
    let cor = cor_da_reserva(reserva);
    let props = PropsEvento {
        reserva_id: reserva.id,
        status: reserva.status.clone(),
        tipo: reserva.tipo.map(|t| t.as_str()),
    };
    let mut eventos = Vec::with_capacity(2);

    let hora_inicio = reserva
        .hora_inicio
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty());
    if let (Some(dia), Some(inicio)) = (reserva.dia_semana, hora_inicio) {
        if reserva.data_hora_inicio.is_none() || reserva.e_fixa() {
            eventos.push(EventoCalendario {
                id: format!("fixa-{}", reserva.id),
                title: title.clone(),
                start: None,
                end: None,
                days_of_week: Some(vec![dia.rem_euclid(7) as u8]),
                start_time: Some(hora_curta(inicio).to_string()),
                end_time: reserva
                    .hora_fim
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .map(|h| hora_curta(h).to_string()),
                background_color: cor,
                border_color: cor,
                extended_props: props.clone(),
            });
        }
    }

    if let Some(inicio) = reserva.data_hora_inicio {
        eventos.push(EventoCalendario {
            id: reserva.id.to_string(),
            title,
            start: Some(inicio.format("%Y-%m-%dT%H:%M:%S").to_string()),
            end: reserva
                .data_hora_fim
                .map(|fim| fim.format("%Y-%m-%dT%H:%M:%S").to_string()),
            days_of_week: None,
            start_time: None,
            end_time: None,
            background_color: cor,
            border_color: cor,
            extended_props: props,
        });
    }

    eventos
}

/// JSON para embutir num `<script>`; `<` é escapado para não fechar a tag.
pub fn eventos_json(eventos: &[EventoCalendario]) -> String {
    serde_json::to_string(eventos)
        .unwrap_or_else(|e| {
            tracing::error!("Falha ao serializar eventos do calendário: {}", e);
            "[]".to_string()
        })
        .replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reserva::{LaboratorioResumo, TipoReserva, UsuarioResumo};
    use chrono::NaiveDate;

    fn recorrente(dia: i64, status: Option<&str>, tipo: Option<TipoReserva>) -> Reserva {
        Reserva {
            id: 10,
            dia_semana: Some(dia),
            hora_inicio: Some("08:00".into()),
            hora_fim: Some("10:00".into()),
            status: status.map(str::to_string),
            tipo,
            usuario: Some(UsuarioResumo {
                nome: Some("Ana".into()),
                ..Default::default()
            }),
            laboratorio: Some(LaboratorioResumo {
                id: Some(1),
                nome: Some("Lab Redes".into()),
            }),
            ..Default::default()
        }
    }

    fn datada(status: &str) -> Reserva {
        let dia = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        Reserva {
            id: 20,
            data_hora_inicio: dia.and_hms_opt(8, 0, 0),
            data_hora_fim: dia.and_hms_opt(10, 0, 0),
            status: Some(status.to_string()),
            tipo: Some(TipoReserva::Normal),
            ..Default::default()
        }
    }

    #[test]
    fn weekday_reservation_becomes_one_recurring_event() {
        let eventos = mapear_eventos(&[recorrente(2, None, Some(TipoReserva::Fixa))]);
        assert_eq!(eventos.len(), 1);
        let e = &eventos[0];
        assert_eq!(e.days_of_week, Some(vec![2]));
        assert_eq!(e.start_time.as_deref(), Some("08:00"));
        assert_eq!(e.end_time.as_deref(), Some("10:00"));
        assert_eq!(e.start, None);
        assert_eq!(e.title, "Ana — Lab Redes");
        assert_eq!(e.extended_props.reserva_id, 10);
    }

    #[test]
    fn weekday_wraps_modulo_seven() {
        let eventos = mapear_eventos(&[recorrente(7, None, None)]);
        assert_eq!(eventos[0].days_of_week, Some(vec![0]));
        let eventos = mapear_eventos(&[recorrente(-1, None, None)]);
        assert_eq!(eventos[0].days_of_week, Some(vec![6]));
    }

    #[test]
    fn dated_reservation_uses_absolute_times() {
        let eventos = mapear_eventos(&[datada("PENDENTE")]);
        assert_eq!(eventos.len(), 1);
        assert_eq!(eventos[0].start.as_deref(), Some("2025-03-10T08:00:00"));
        assert_eq!(eventos[0].end.as_deref(), Some("2025-03-10T10:00:00"));
        assert_eq!(eventos[0].days_of_week, None);
        assert_eq!(eventos[0].title, "Usuário — Lab");
    }

    #[test]
    fn materialized_fixed_reservation_yields_two_events() {
        let mut reserva = recorrente(3, Some("APROVADA"), Some(TipoReserva::Fixa));
        reserva.data_hora_inicio = datada("APROVADA").data_hora_inicio;
        let eventos = mapear_eventos(&[reserva]);
        assert_eq!(eventos.len(), 2);
        assert!(eventos.iter().all(|e| e.background_color == COR_APROVADA));
    }

    #[test]
    fn record_without_schedule_yields_nothing() {
        let reserva = Reserva {
            id: 1,
            dia_semana: Some(1),
            ..Default::default()
        };
        assert!(mapear_eventos(&[reserva]).is_empty());
    }

    #[test]
    fn colours_follow_status_then_type() {
        assert_eq!(cor_da_reserva(&datada("APROVADA")), COR_APROVADA);
        assert_eq!(cor_da_reserva(&datada("pendente")), COR_PENDENTE);
        assert_eq!(cor_da_reserva(&datada("CANCELADA")), COR_PADRAO);
        assert_eq!(
            cor_da_reserva(&recorrente(1, Some("CANCELADA"), Some(TipoReserva::Fixa))),
            COR_FIXA
        );
        assert_eq!(cor_da_reserva(&Reserva::default()), COR_PADRAO);
    }

    #[test]
    fn mapping_is_idempotent() {
        let reservas = vec![
            recorrente(2, Some("PENDENTE"), Some(TipoReserva::Fixa)),
            datada("APROVADA"),
        ];
        assert_eq!(mapear_eventos(&reservas), mapear_eventos(&reservas));
    }

    #[test]
    fn json_is_safe_inside_script_tag() {
        let mut reserva = datada("PENDENTE");
        reserva.usuario = Some(UsuarioResumo {
            nome: Some("</script><b>".into()),
            ..Default::default()
        });
        let json = eventos_json(&mapear_eventos(&[reserva]));
        assert!(!json.contains('<'));
        assert!(!json.contains("daysOfWeek"));
        assert!(json.contains("\"backgroundColor\":\"#f59e0b\""));
    }
}
