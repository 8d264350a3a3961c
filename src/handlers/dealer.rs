// src/handlers/dealer.rs
//
// Painel do dealer. O escopo vem sempre do dealer_code dos claims,
// nunca de parâmetro: um dealer não enxerga os números de outro.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::DealerContext,
    models::dashboard::{CustomerPage, DealerSummary, ListFilter, SubscriptionPage},
};

// GET /api/dealer/summary
#[utoipa::path(
    get,
    path = "/api/dealer/summary",
    tag = "Dealer",
    responses(
        (status = 200, description = "Cadastros, conversão, comissão e fila", body = DealerSummary),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Sessão sem papel de dealer")
    ),
    security(("api_jwt" = []))
)]
pub async fn summary(
    State(app_state): State<AppState>,
    DealerContext(dealer_code): DealerContext,
) -> Result<Json<DealerSummary>, AppError> {
    let summary = app_state.dashboard_service.dealer_summary(&dealer_code).await?;
    Ok(Json(summary))
}

// GET /api/dealer/subscriptions
#[utoipa::path(
    get,
    path = "/api/dealer/subscriptions",
    tag = "Dealer",
    params(ListFilter),
    responses(
        (status = 200, description = "Assinaturas do dealer, filtradas e paginadas", body = SubscriptionPage)
    ),
    security(("api_jwt" = []))
)]
pub async fn subscriptions(
    State(app_state): State<AppState>,
    DealerContext(dealer_code): DealerContext,
    Query(filter): Query<ListFilter>,
) -> Result<Json<SubscriptionPage>, AppError> {
    let page = app_state
        .dashboard_service
        .dealer_subscriptions(&dealer_code, &filter)
        .await?;
    Ok(Json(page))
}

// GET /api/dealer/customers
#[utoipa::path(
    get,
    path = "/api/dealer/customers",
    tag = "Dealer",
    params(ListFilter),
    responses(
        (status = 200, description = "Cadastros do dealer, filtrados e paginados", body = CustomerPage)
    ),
    security(("api_jwt" = []))
)]
pub async fn customers(
    State(app_state): State<AppState>,
    DealerContext(dealer_code): DealerContext,
    Query(filter): Query<ListFilter>,
) -> Result<Json<CustomerPage>, AppError> {
    let page = app_state
        .dashboard_service
        .dealer_customers(&dealer_code, &filter)
        .await?;
    Ok(Json(page))
}

// GET /api/dealer/qr — PNG do QR de cadastro
#[utoipa::path(
    get,
    path = "/api/dealer/qr",
    tag = "Dealer",
    responses(
        (status = 200, description = "QR Code do link de cadastro (PNG)", body = Vec<u8>, content_type = "image/png"),
        (status = 404, description = "Dealer não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn qr_code(
    State(app_state): State<AppState>,
    DealerContext(dealer_code): DealerContext,
) -> Result<Response, AppError> {
    let png = app_state.document_service.generate_qr_png(&dealer_code).await?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"QR-{}.png\"", dealer_code),
        ),
    ];

    Ok((StatusCode::OK, headers, png).into_response())
}

// GET /api/dealer/flyer — flyer em PDF com planos + QR
#[utoipa::path(
    get,
    path = "/api/dealer/flyer",
    tag = "Dealer",
    responses(
        (status = 200, description = "Flyer do dealer (PDF)", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Dealer não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn flyer(
    State(app_state): State<AppState>,
    DealerContext(dealer_code): DealerContext,
) -> Result<Response, AppError> {
    let pdf = app_state.document_service.generate_flyer_pdf(&dealer_code).await?;

    // Headers para o navegador baixar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"flyer_{}.pdf\"", dealer_code),
        ),
    ];

    Ok((StatusCode::OK, headers, pdf).into_response())
}
