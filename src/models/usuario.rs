// src/models/usuario.rs
use serde::{Deserialize, Serialize};

use super::sessao::{normalizar_papel, PAPEIS_DEFINIDOS};

// Utilizador tal como o backend o devolve em /usuarios
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    #[serde(default, deserialize_with = "super::texto_ou_vazio")]
    pub nome: String,
    #[serde(default, deserialize_with = "super::texto_ou_vazio")]
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Corpo de POST /usuarios e PUT /usuarios/{id}.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPayload {
    pub nome: String,
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    // Ausente na edição quando o campo fica em branco
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    pub roles: Vec<String>,
}

/// Dados do formulário de criação/edição.
///
/// Vem como lista de pares porque os papéis chegam como várias
/// checkboxes com o mesmo nome `roles`.
#[derive(Debug, Clone, Default)]
pub struct UsuarioForm {
    pub nome: String,
    pub login: String,
    pub email: String,
    pub senha: String,
    pub roles: Vec<String>,
}

impl UsuarioForm {
    pub fn from_pares(pares: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (chave, valor) in pares {
            match chave.as_str() {
                "nome" => form.nome = valor,
                "login" => form.login = valor,
                "email" => form.email = valor,
                "senha" => form.senha = valor,
                "roles" => {
                    let papel = normalizar_papel(&valor);
                    if !papel.is_empty() && !form.roles.contains(&papel) {
                        form.roles.push(papel);
                    }
                }
                _ => {}
            }
        }
        form
    }

    /// Verificação de campos obrigatórios antes de enviar ao backend.
    /// `criacao` exige senha.
    pub fn validar(&self, criacao: bool) -> Result<(), String> {
        if self.nome.trim().is_empty() {
            return Err("O nome é obrigatório.".to_string());
        }
        if self.login.trim().is_empty() {
            return Err("O login é obrigatório.".to_string());
        }
        if criacao && self.senha.len() < 4 {
            return Err("A senha deve ter pelo menos 4 caracteres.".to_string());
        }
        if !criacao && !self.senha.is_empty() && self.senha.len() < 4 {
            return Err("A nova senha deve ter pelo menos 4 caracteres.".to_string());
        }
        if self.roles.is_empty() {
            return Err("Selecione pelo menos um papel.".to_string());
        }
        if let Some(papel) = self
            .roles
            .iter()
            .find(|r| !PAPEIS_DEFINIDOS.contains(&r.as_str()))
        {
            return Err(format!("Papel desconhecido: {}", papel));
        }
        Ok(())
    }

    pub fn into_payload(self) -> UsuarioPayload {
        let email = self.email.trim().to_string();
        UsuarioPayload {
            nome: self.nome.trim().to_string(),
            login: self.login.trim().to_string(),
            email: (!email.is_empty()).then_some(email),
            senha: (!self.senha.is_empty()).then_some(self.senha),
            roles: self.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn par(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn collects_repeated_roles() {
        let form = UsuarioForm::from_pares(vec![
            par("nome", "Ana"),
            par("login", "ana"),
            par("senha", "segredo"),
            par("roles", "PROF"),
            par("roles", "role_prof_comp"),
            par("roles", "PROF"),
        ]);
        assert_eq!(form.roles, vec!["PROF", "PROF_COMP"]);
        assert!(form.validar(true).is_ok());
    }

    #[test]
    fn requires_password_only_on_creation() {
        let form = UsuarioForm {
            nome: "Ana".into(),
            login: "ana".into(),
            roles: vec!["ADMIN".into()],
            ..Default::default()
        };
        assert!(form.validar(true).is_err());
        assert!(form.validar(false).is_ok());
        assert_eq!(form.into_payload().senha, None);
    }

    #[test]
    fn rejects_unknown_role() {
        let form = UsuarioForm {
            nome: "Ana".into(),
            login: "ana".into(),
            roles: vec!["ROOT".into()],
            ..Default::default()
        };
        assert_eq!(form.validar(false), Err("Papel desconhecido: ROOT".to_string()));
    }

    #[test]
    fn list_survives_record_with_null_name() {
        let lista: Vec<Usuario> = serde_json::from_str(
            r#"[{"id":1,"nome":null,"login":"ana"},{"id":2,"login":"rui","roles":["PROF"]}]"#,
        )
        .unwrap();
        assert_eq!(lista.len(), 2);
        assert_eq!(lista[0].nome, "");
        assert_eq!(lista[1].login, "rui");
    }
}
