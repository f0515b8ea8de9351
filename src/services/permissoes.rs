// src/services/permissoes.rs
//
// Predicados que decidem que botões a interface mostra. São apenas
// indicativos: o backend volta a validar cada ação com o token.
use crate::models::{
    reserva::Reserva,
    sessao::{normalizar_papel, PAPEL_ADMIN, PAPEL_PROF, PAPEL_PROF_COMP},
};

fn tem(roles: &[String], papel: &str) -> bool {
    roles.iter().any(|r| normalizar_papel(r) == papel)
}

/// Papéis que podem criar uma reserva normal.
pub const ROLES_QUE_CRIAM_RESERVA: &[&str] = &[PAPEL_ADMIN, PAPEL_PROF, PAPEL_PROF_COMP];

pub fn pode_criar_reserva(roles: &[String]) -> bool {
    ROLES_QUE_CRIAM_RESERVA.iter().any(|p| tem(roles, p))
}

/// Reservas fixas definem a grelha semanal do semestre: só admin.
pub fn pode_criar_reserva_fixa(roles: &[String]) -> bool {
    tem(roles, PAPEL_ADMIN)
}

/// ADMIN cancela qualquer reserva; PROF só as suas; PROF_COMP as de
/// utilizadores PROF_COMP ou PROF.
pub fn pode_cancelar(roles: &[String], login: &str, reserva: &Reserva) -> bool {
    if tem(roles, PAPEL_ADMIN) {
        return true;
    }
    if tem(roles, PAPEL_PROF) {
        let login = login.trim();
        if !login.is_empty() && reserva.dono_login().map(str::trim) == Some(login) {
            return true;
        }
    }
    if tem(roles, PAPEL_PROF_COMP) {
        let dono = reserva.dono_roles();
        if tem(dono, PAPEL_PROF_COMP) || tem(dono, PAPEL_PROF) {
            return true;
        }
    }
    false
}

pub fn pode_aprovar(roles: &[String], reserva: &Reserva) -> bool {
    tem(roles, PAPEL_ADMIN) && !reserva.esta_aprovada()
}
