// src/models/dashboard.rs
use serde::{Deserialize, Serialize};

/// Ponto da série "reservas por mês".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservasPorMes {
    pub mes: String,
    #[serde(default)]
    pub total: i64,
}

/// Ponto da série "horas de uso por laboratório".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsoLaboratorio {
    pub laboratorio: String,
    #[serde(default)]
    pub horas: f64,
}

/// Contadores do topo do dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Indicadores {
    pub usuarios: i64,
    pub laboratorios: i64,
    pub reservas: i64,
    pub pendentes: i64,
}

/// Barra já calculada para o gráfico em HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct BarraGrafico {
    pub rotulo: String,
    pub valor: String,
    pub percentual: u32,
}

/// Converte uma série em barras proporcionais ao maior valor.
pub fn barras<'a, I>(pontos: I) -> Vec<BarraGrafico>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let pontos: Vec<(&str, f64)> = pontos.into_iter().collect();
    let maximo = pontos.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    pontos
        .into_iter()
        .map(|(rotulo, valor)| BarraGrafico {
            rotulo: rotulo.to_string(),
            valor: if valor.fract() == 0.0 {
                format!("{}", valor as i64)
            } else {
                format!("{:.1}", valor)
            },
            percentual: if maximo > 0.0 {
                ((valor.max(0.0) / maximo) * 100.0).round() as u32
            } else {
                0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_largest_value() {
        let barras = barras(vec![("Jan", 5.0), ("Fev", 10.0), ("Mar", 2.5)]);
        assert_eq!(barras[0].percentual, 50);
        assert_eq!(barras[1].percentual, 100);
        assert_eq!(barras[2].valor, "2.5");
    }

    #[test]
    fn empty_or_zero_series_has_no_width() {
        assert!(barras(Vec::<(&str, f64)>::new()).is_empty());
        let barras = barras(vec![("Jan", 0.0)]);
        assert_eq!(barras[0].percentual, 0);
        assert_eq!(barras[0].valor, "0");
    }
}
