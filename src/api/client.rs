// src/api/client.rs
use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    models::sessao::Sessao,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Cliente HTTP do backend de reservas.
///
/// Todas as páginas passam por aqui: o token da sessão vai no cabeçalho
/// `Authorization` e todas as respostas são lidas pelos mesmos helpers
/// defensivos.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api_url.clone(),
        }
    }

    fn pedido(&self, method: Method, path: &str, sessao: Option<&Sessao>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("Pedido ao backend: {} {}", method, url);
        let req = self.http.request(method, url);
        match sessao {
            Some(s) => req.bearer_auth(s.token()),
            None => req,
        }
    }

    /// Envia o pedido e devolve o corpo como texto se o status for 2xx.
    async fn executar(&self, req: RequestBuilder) -> AppResult<String> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Corpo ilegível num erro: fica a mensagem genérica
            let corpo = response.text().await.unwrap_or_default();
            let mensagem = extrair_mensagem(status, &corpo);
            error!("Erro do backend ({}): {}", status, mensagem);
            return Err(AppError::Api {
                status: status.as_u16(),
                mensagem,
            });
        }
        Ok(response.text().await?)
    }

    pub async fn get_lista<T>(&self, path: &str, sessao: &Sessao) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let corpo = self.executar(self.pedido(Method::GET, path, Some(sessao))).await?;
        interpretar_json(path, &corpo)
    }

    pub async fn get_registro<T>(&self, path: &str, sessao: &Sessao) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let corpo = self.executar(self.pedido(Method::GET, path, Some(sessao))).await?;
        interpretar_json(path, &corpo)
    }

    pub async fn get_numero(&self, path: &str, sessao: &Sessao) -> AppResult<i64> {
        let corpo = self.executar(self.pedido(Method::GET, path, Some(sessao))).await?;
        Ok(interpretar_numero(&corpo))
    }

    /// POST sem sessão, devolvendo o corpo em texto (usado no login).
    pub async fn post_publico<B>(&self, path: &str, body: &B) -> AppResult<String>
    where
        B: Serialize + ?Sized,
    {
        self.executar(self.pedido(Method::POST, path, None).json(body))
            .await
    }

    pub async fn post_json<B>(&self, path: &str, sessao: &Sessao, body: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.executar(self.pedido(Method::POST, path, Some(sessao)).json(body))
            .await
            .map(|_| ())
    }

    pub async fn put_json<B>(&self, path: &str, sessao: &Sessao, body: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.executar(self.pedido(Method::PUT, path, Some(sessao)).json(body))
            .await
            .map(|_| ())
    }

    /// PUT sem corpo, para transições de estado (aprovar, cancelar).
    pub async fn put_vazio(&self, path: &str, sessao: &Sessao) -> AppResult<()> {
        self.executar(self.pedido(Method::PUT, path, Some(sessao)))
            .await
            .map(|_| ())
    }
}

/// Mensagem legível para uma resposta de erro.
///
/// Procura `message`, `mensagem`, `error`, `erro` ou `detail` num corpo
/// JSON, depois aceita texto simples curto, e por fim uma mensagem genérica.
pub fn extrair_mensagem(status: StatusCode, corpo: &str) -> String {
    let corpo = corpo.trim();
    let generica = || format!("Erro {} ao comunicar com o servidor.", status.as_u16());

    if corpo.is_empty() {
        return generica();
    }

    match serde_json::from_str::<Value>(corpo) {
        Ok(Value::Object(obj)) => ["message", "mensagem", "error", "erro", "detail"]
            .iter()
            .filter_map(|chave| obj.get(*chave))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(generica),
        Ok(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Ok(_) => generica(),
        // Texto simples; páginas HTML de proxies ficam de fora
        Err(_) if corpo.len() <= 200 && !corpo.starts_with('<') => corpo.to_string(),
        Err(_) => generica(),
    }
}

/// Corpo vazio vale `T::default()` (lista vazia, `None`).
pub fn interpretar_json<T>(path: &str, corpo: &str) -> AppResult<T>
where
    T: DeserializeOwned + Default,
{
    if corpo.trim().is_empty() {
        debug!("Corpo vazio em {}, usando valor por omissão", path);
        return Ok(T::default());
    }
    serde_json::from_str(corpo).map_err(|e| {
        warn!("Resposta inválida de {}: {}", path, e);
        AppError::RespostaInvalida(format!("{}: {}", path, e))
    })
}

/// Número devolvido pelos endpoints de contagem; qualquer coisa não
/// numérica vale 0.
pub fn interpretar_numero(corpo: &str) -> i64 {
    let corpo = corpo.trim();
    if let Ok(n) = corpo.parse::<i64>() {
        return n;
    }
    if let Ok(f) = corpo.parse::<f64>() {
        if f.is_finite() {
            return f as i64;
        }
    }
    match serde_json::from_str::<Value>(corpo) {
        Ok(Value::Object(obj)) => obj
            .values()
            .find_map(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(0),
        Ok(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => {
            if !corpo.is_empty() {
                warn!("Contagem não numérica recebida: {:?}", corpo);
            }
            0
        }
    }
}
