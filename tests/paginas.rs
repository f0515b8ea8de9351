// tests/paginas.rs
//
// Router completo contra um backend simulado com wiremock.
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use reservalab_admin::{config::AppConfig, state::AppState, web::routes::create_router};
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    matchers::{body_json, header as header_eq, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn app(server: &MockServer) -> Router {
    let config = AppConfig::new(&server.uri()).unwrap();
    create_router(AppState::new(config))
}

fn token(sub: &str, roles: &[&str], exp: i64) -> String {
    let payload = json!({ "sub": sub, "roles": roles, "exp": exp });
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.assinatura",
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

fn token_valido(sub: &str, roles: &[&str]) -> String {
    token(sub, roles, chrono::Utc::now().timestamp() + 3600)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().uri(uri);
    if let Some(t) = token {
        req = req.header(header::COOKIE, format!("token={}", t));
    }
    req.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, token: Option<&str>, corpo: &str) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(t) = token {
        req = req.header(header::COOKIE, format!("token={}", t));
    }
    req.body(Body::from(corpo.to_string())).unwrap()
}

fn location(res: &Response) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn set_cookie(res: &Response) -> String {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

async fn texto(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn protected_page_without_cookie_redirects_to_login() {
    let server = MockServer::start().await;

    let res = app(&server).oneshot(get("/dashboard", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    assert!(set_cookie(&res).is_empty());
}

#[tokio::test]
async fn expired_cookie_is_cleared_before_redirect() {
    let server = MockServer::start().await;
    let vencido = token("ana", &["ADMIN"], chrono::Utc::now().timestamp() - 1);

    let res = app(&server)
        .oneshot(get("/reservas", Some(&vencido)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    let cookie = set_cookie(&res);
    assert!(cookie.starts_with("token="), "cookie: {}", cookie);
    assert!(!cookie.contains(&vencido));
}

#[tokio::test]
async fn login_page_drops_stale_cookie() {
    let server = MockServer::start().await;
    let vencido = token("ana", &["ADMIN"], chrono::Utc::now().timestamp() - 60);

    let res = app(&server)
        .oneshot(get("/login", Some(&vencido)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let cookie = set_cookie(&res);
    assert!(cookie.starts_with("token="), "cookie: {}", cookie);
    assert!(!cookie.contains(&vencido));
}

#[tokio::test]
async fn calendar_pages_load_portuguese_locale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;
    let tok = token_valido("ana", &["ADMIN"]);

    for pagina in ["/reservas", "/reservas/fixas"] {
        let res = app(&server).oneshot(get(pagina, Some(&tok))).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(texto(res).await.contains("locales/pt-br.global.min.js"));
    }
}

#[tokio::test]
async fn health_is_public() {
    let server = MockServer::start().await;
    let res = app(&server).oneshot(get("/health", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_stores_token_cookie() {
    let server = MockServer::start().await;
    let tok = token_valido("ana", &["ADMIN"]);
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "login": "ana", "senha": "segredo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": tok })))
        .expect(1)
        .mount(&server)
        .await;

    let res = app(&server)
        .oneshot(post_form("/login", None, "login=ana&senha=segredo"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/dashboard");
    let cookie = set_cookie(&res);
    assert!(cookie.contains(&format!("token={}", tok)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn login_with_token_without_expiry_stays_on_login_page() {
    let server = MockServer::start().await;
    let sem_exp = format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.assinatura",
        URL_SAFE_NO_PAD.encode(json!({ "sub": "ana", "roles": ["ADMIN"] }).to_string())
    );
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": sem_exp })))
        .mount(&server)
        .await;

    let res = app(&server)
        .oneshot(post_form("/login", None, "login=ana&senha=segredo"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(set_cookie(&res).is_empty());
    assert!(texto(res).await.contains("O servidor devolveu uma resposta inesperada."));
}

#[tokio::test]
async fn rejected_credentials_render_login_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })))
        .mount(&server)
        .await;

    let res = app(&server)
        .oneshot(post_form("/login", None, "login=ana&senha=errada"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(set_cookie(&res).is_empty());
    assert!(texto(res).await.contains("Login ou senha inválidos."));
}

#[tokio::test]
async fn dashboard_degrades_failed_calls() {
    let server = MockServer::start().await;
    let tok = token_valido("ana", &["ADMIN"]);

    for (rota, corpo) in [
        ("/usuarios/total", "12"),
        ("/laboratorios/total", "4"),
        ("/reserva/total", "30"),
        ("/reserva/pendentes/total", "2"),
        ("/reserva/estatisticas/mensal", r#"[{"mes":"Março","total":8}]"#),
    ] {
        Mock::given(method("GET"))
            .and(path(rota))
            .and(header_eq("authorization", format!("Bearer {}", tok).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(corpo))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/reserva/estatisticas/uso-laboratorios"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let res = app(&server)
        .oneshot(get("/dashboard", Some(&tok)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let html = texto(res).await;
    assert!(html.contains("<strong>12</strong>"));
    assert!(html.contains("Março"));
    assert!(html.contains("Falha ao carregar uso dos laboratórios"));
}

#[tokio::test]
async fn backend_401_ends_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let tok = token_valido("ana", &["ADMIN"]);

    let res = app(&server)
        .oneshot(get("/dashboard", Some(&tok)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/logout");
}

#[tokio::test]
async fn empty_user_search_shows_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/usuarios/pesquisar"))
        .and(query_param("nome", "zzz"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;
    let tok = token_valido("ana", &["ADMIN"]);

    let res = app(&server)
        .oneshot(get("/usuarios?nome=zzz", Some(&tok)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(texto(res).await.contains("Nenhum usuário encontrado."));
}

#[tokio::test]
async fn management_pages_require_admin() {
    let server = MockServer::start().await;
    let tok = token_valido("joao", &["PROF"]);

    let res = app(&server)
        .oneshot(get("/laboratorios", Some(&tok)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn prof_cannot_cancel_someone_elses_reservation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reserva/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "status": "PENDENTE",
            "usuario": { "id": 2, "nome": "Maria", "login": "maria", "roles": ["PROF"] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/reserva/5/cancelar"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let tok = token_valido("joao", &["PROF"]);

    let res = app(&server)
        .oneshot(post_form("/reservas/5/cancelar", Some(&tok), "laboratorio=1"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(location(&res).starts_with("/reservas?laboratorio=1&error="));
}

#[tokio::test]
async fn owner_cancels_and_returns_to_calendar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reserva/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "status": "APROVADA",
            "usuario": { "id": 3, "nome": "João", "login": "joao", "roles": ["PROF"] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/reserva/5/cancelar"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let tok = token_valido("joao", &["PROF"]);

    let res = app(&server)
        .oneshot(post_form("/reservas/5/cancelar", Some(&tok), "laboratorio=&origem=fixas"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/reservas/fixas?success=Reserva%20cancelada.");
}

#[tokio::test]
async fn calendar_page_embeds_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/laboratorios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "nome": "Lab Redes" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/semestre"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reserva/laboratorio/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 9,
            "dataHoraInicio": "2025-03-10T08:00:00",
            "dataHoraFim": "2025-03-10T10:00:00",
            "status": "APROVADA",
            "tipo": "NORMAL",
            "laboratorio": { "id": 1, "nome": "Lab Redes" }
        }])))
        .mount(&server)
        .await;
    let tok = token_valido("joao", &["PROF"]);

    let res = app(&server)
        .oneshot(get("/reservas?laboratorio=1", Some(&tok)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let html = texto(res).await;
    assert!(html.contains(r##""backgroundColor":"#16a34a""##));
    assert!(html.contains(r#""reservaId":9"#));
    assert!(html.contains("Nova reserva"));
}
