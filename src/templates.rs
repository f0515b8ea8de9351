// src/templates.rs
use askama::Template;
use crate::models::dashboard::{BarraGrafico, Indicadores};

// --- Linhas já formatadas para as tabelas ---

#[derive(Clone, Debug)]
pub struct UsuarioLinha {
    pub id: i64,
    pub nome: String,
    pub login: String,
    pub email: String,
    pub roles: String,
}

#[derive(Clone, Debug)]
pub struct LaboratorioLinha {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub capacidade: String,
}

#[derive(Clone, Debug)]
pub struct SemestreLinha {
    pub id: i64,
    pub nome: String,
    pub periodo: String,
}

#[derive(Clone, Debug)]
pub struct ReservaLinha {
    pub id: i64,
    pub titulo: String,
    pub horario: String,
    pub status: String,
    pub cor: &'static str,
    pub pode_aprovar: bool,
    pub pode_cancelar: bool,
}

/// Opção de um `<select>`.
#[derive(Clone, Debug)]
pub struct OpcaoSelect {
    pub valor: String,
    pub rotulo: String,
    pub selecionado: bool,
}

/// Checkbox de papel no formulário de utilizador.
#[derive(Clone, Debug)]
pub struct PapelOpcao {
    pub nome: &'static str,
    pub marcado: bool,
}

// --- Páginas ---

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub login: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub usuario_login: String,
    pub indicadores: Indicadores,
    pub reservas_mes: Vec<BarraGrafico>,
    pub uso_laboratorios: Vec<BarraGrafico>,
    pub avisos: Vec<String>,
}

#[derive(Template)]
#[template(path = "usuarios.html")]
pub struct UsuariosPage {
    pub nome: String,
    pub usuarios: Vec<UsuarioLinha>,
    pub aviso: Option<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "usuario_form.html")]
pub struct UsuarioFormPage {
    pub titulo: String,
    pub acao: String,
    pub criacao: bool,
    pub nome: String,
    pub login: String,
    pub email: String,
    pub papeis: Vec<PapelOpcao>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "laboratorios.html")]
pub struct LaboratoriosPage {
    pub laboratorios: Vec<LaboratorioLinha>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "laboratorio_form.html")]
pub struct LaboratorioFormPage {
    pub titulo: String,
    pub acao: String,
    pub nome: String,
    pub descricao: String,
    pub capacidade: String,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "semestres.html")]
pub struct SemestresPage {
    pub semestres: Vec<SemestreLinha>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "semestre_form.html")]
pub struct SemestreFormPage {
    pub titulo: String,
    pub acao: String,
    pub nome: String,
    pub data_inicio: String,
    pub data_fim: String,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "reservas.html")]
pub struct ReservasPage {
    pub laboratorio_atual: String,
    pub laboratorios: Vec<OpcaoSelect>,
    pub semestres: Vec<OpcaoSelect>,
    pub eventos_json: String,
    pub reservas: Vec<ReservaLinha>,
    pub pode_criar: bool,
    pub avisos: Vec<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "reservas_fixas.html")]
pub struct ReservasFixasPage {
    pub laboratorio_atual: String,
    pub laboratorios: Vec<OpcaoSelect>,
    pub semestres: Vec<OpcaoSelect>,
    pub dias: Vec<OpcaoSelect>,
    pub eventos_json: String,
    pub reservas: Vec<ReservaLinha>,
    pub pode_criar: bool,
    pub avisos: Vec<String>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}
