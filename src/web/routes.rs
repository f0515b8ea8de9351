// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, dashboard_handlers, laboratorio_handlers, mw_admin, mw_auth,
        reserva_handlers, semestre_handlers, usuario_handlers,
    },
};
use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/logout", get(auth_handlers::handle_logout))
        .route("/health", get(|| async { "ok" }));

    // --- Rotas de Admin ---
    // Cadastros: exigem login E papel ADMIN
    let admin_routes = Router::new()
        .route("/usuarios", get(usuario_handlers::handle_pesquisar))
        .route(
            "/usuarios/novo",
            get(usuario_handlers::show_novo_usuario).post(usuario_handlers::handle_criar_usuario),
        )
        .route(
            "/usuarios/{id}",
            get(usuario_handlers::show_usuario).post(usuario_handlers::handle_editar_usuario),
        )
        .route("/laboratorios", get(laboratorio_handlers::handle_listar))
        .route(
            "/laboratorios/novo",
            get(laboratorio_handlers::show_novo_laboratorio)
                .post(laboratorio_handlers::handle_criar_laboratorio),
        )
        .route(
            "/laboratorios/{id}",
            get(laboratorio_handlers::show_laboratorio)
                .post(laboratorio_handlers::handle_editar_laboratorio),
        )
        .route("/semestres", get(semestre_handlers::handle_listar))
        .route(
            "/semestres/novo",
            get(semestre_handlers::show_novo_semestre).post(semestre_handlers::handle_criar_semestre),
        )
        .route(
            "/semestres/{id}",
            get(semestre_handlers::show_semestre).post(semestre_handlers::handle_editar_semestre),
        )
        // mw_auth é aplicado no router pai e corre antes deste
        .route_layer(middleware::from_fn(mw_admin::require_admin));

    let reserva_routes = Router::new()
        .route(
            "/",
            get(reserva_handlers::handle_pagina_reservas).post(reserva_handlers::handle_criar_reserva),
        )
        .route(
            "/fixas",
            get(reserva_handlers::handle_pagina_fixas).post(reserva_handlers::handle_criar_fixa),
        )
        .route("/{id}/aprovar", post(reserva_handlers::handle_aprovar))
        .route("/{id}/cancelar", post(reserva_handlers::handle_cancelar));

    // --- Rotas Autenticadas ---
    let authenticated_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/dashboard", get(dashboard_handlers::handle_dashboard))
        .nest("/reservas", reserva_routes)
        .merge(admin_routes);

    // --- Router Final ---
    // O porteiro envolve tudo (deixa passar as rotas públicas) e precisa
    // do CookieManagerLayer por fora para ler o token.
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(middleware::from_fn(mw_auth::require_auth))
        .layer(CookieManagerLayer::new())
        .with_state(app_state)
}
