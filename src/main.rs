// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard, customer_guard, dealer_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação (inclui a antiga função de borda dealer-otp)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/dealer-otp", post(handlers::auth::dealer_otp))
        .route("/customer-login", post(handlers::auth::customer_login));

    // Rotas de sessão (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // O fluxo de cadastro é público: o cliente ainda não tem sessão
    let registration_routes = Router::new()
        .route("/start", post(handlers::registration::start))
        .route("/verify-otp", post(handlers::registration::verify_otp))
        .route(
            "/{customer_code}/personal-details",
            put(handlers::registration::personal_details),
        )
        .route(
            "/{customer_code}/vehicle-details",
            put(handlers::registration::vehicle_details),
        )
        .route(
            "/{customer_code}/tyre-details",
            put(handlers::registration::tyre_details),
        );

    // Painel do dealer: auth_guard roda primeiro, depois o guard de papel
    let dealer_routes = Router::new()
        .route("/summary", get(handlers::dealer::summary))
        .route("/subscriptions", get(handlers::dealer::subscriptions))
        .route("/customers", get(handlers::dealer::customers))
        .route("/qr", get(handlers::dealer::qr_code))
        .route("/flyer", get(handlers::dealer::flyer))
        .layer(axum_middleware::from_fn(dealer_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let admin_routes = Router::new()
        .route("/summary", get(handlers::admin::summary))
        .route(
            "/subscriptions",
            get(handlers::admin::subscriptions),
        )
        .route(
            "/subscriptions/export",
            get(handlers::admin::export_subscriptions),
        )
        .route("/customers", get(handlers::admin::customers))
        .route("/dealers", get(handlers::admin::dealers))
        .route("/dealers/import", post(handlers::admin::import_dealers))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let customer_routes = Router::new()
        .route(
            "/profile",
            get(handlers::customer::get_profile).put(handlers::customer::update_profile),
        )
        .route("/membership", get(handlers::customer::membership))
        .route("/referral", get(handlers::customer::referral))
        .route(
            "/complaints",
            get(handlers::customer::list_complaints).post(handlers::customer::raise_complaint),
        )
        .route("/transactions", get(handlers::customer::transactions))
        .layer(axum_middleware::from_fn(customer_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/plans", get(handlers::checkout::list_plans))
        .route("/api/checkout", post(handlers::checkout::confirm))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/registration", registration_routes)
        .nest("/api/dealer", dealer_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/customer", customer_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        // O portal roda em outra origem; CORS liberado como no serviço hospedado
        .layer(CorsLayer::permissive())
        .with_state(app_state.clone());

    // Inicia o servidor
    let listener = TcpListener::bind(&app_state.bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
