// src/models/sessao.rs
use serde::Deserialize;
use serde_json::{Map, Value};

pub const PAPEL_ADMIN: &str = "ADMIN";
pub const PAPEL_PROF: &str = "PROF";
pub const PAPEL_PROF_COMP: &str = "PROF_COMP";

/// Papéis que podem ser atribuídos a um utilizador nos formulários.
pub const PAPEIS_DEFINIDOS: &[&str] = &[PAPEL_ADMIN, PAPEL_PROF, PAPEL_PROF_COMP];

/// Normaliza um nome de papel: "role_prof " -> "PROF".
pub fn normalizar_papel(papel: &str) -> String {
    let papel = papel.trim().to_ascii_uppercase();
    match papel.strip_prefix("ROLE_") {
        Some(resto) => resto.to_string(),
        None => papel,
    }
}

/// Campos lidos do payload do token (sem verificar assinatura).
///
/// Só servem para decidir o que a interface mostra; o backend valida
/// o token em cada chamada.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Claims {
    pub sub: Option<String>,
    pub roles: Vec<String>,
    pub exp: Option<i64>,
}

impl Claims {
    pub fn from_payload(mut payload: Map<String, Value>) -> Self {
        let sub = payload
            .remove("sub")
            .and_then(|v| v.as_str().map(str::to_string));

        let exp = payload.remove("exp").and_then(|v| match v {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

        // O backend pode usar "roles", "role" ou "authorities"
        let raw_roles = ["roles", "role", "authorities"]
            .iter()
            .find_map(|chave| payload.remove(*chave));
        let roles: Vec<String> = match raw_roles {
            Some(Value::Array(itens)) => itens
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(obj) => obj
                        .get("authority")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
            _ => Vec::new(),
        };
        let roles = roles
            .iter()
            .map(|r| normalizar_papel(r))
            .filter(|r| !r.is_empty())
            .collect();

        Self {
            sub,
            roles,
            exp,
        }
    }
}

// Struct para dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub login: String,
    pub senha: String,
}

/// Sessão do operador, reconstruída a partir do cookie em cada pedido.
/// É passada explicitamente aos handlers pelo middleware de autenticação.
#[derive(Debug, Clone)]
pub struct Sessao {
    token: String,
    claims: Claims,
}

impl Sessao {
    pub fn new(token: impl Into<String>, claims: Claims) -> Self {
        Self {
            token: token.into(),
            claims,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Login do utilizador (claim `sub`), vazio se ausente.
    pub fn login(&self) -> &str {
        self.claims.sub.as_deref().unwrap_or_default()
    }

    pub fn roles(&self) -> &[String] {
        &self.claims.roles
    }

    pub fn tem_papel(&self, papel: &str) -> bool {
        let papel = normalizar_papel(papel);
        self.claims.roles.iter().any(|r| *r == papel)
    }

    pub fn is_admin(&self) -> bool {
        self.tem_papel(PAPEL_ADMIN)
    }

    pub fn expira_em(&self) -> Option<i64> {
        self.claims.exp
    }
}
