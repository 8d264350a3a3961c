// src/handlers/admin.rs
//
// Painel consolidado do admin: visão sobre todos os dealers, cadastros
// e assinaturas, export CSV e import de dealers em massa.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{
        AdminSummary, CustomerPage, DealerImportReport, DealerPage, ListFilter, SubscriptionPage,
    },
};

// GET /api/admin/summary
#[utoipa::path(
    get,
    path = "/api/admin/summary",
    tag = "Admin",
    responses(
        (status = 200, description = "Totais consolidados + conversão", body = AdminSummary),
        (status = 403, description = "Sessão sem papel de admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn summary(State(app_state): State<AppState>) -> Result<Json<AdminSummary>, AppError> {
    let summary = app_state.dashboard_service.admin_summary().await?;
    Ok(Json(summary))
}

// GET /api/admin/subscriptions
#[utoipa::path(
    get,
    path = "/api/admin/subscriptions",
    tag = "Admin",
    params(ListFilter),
    responses(
        (status = 200, description = "Todas as assinaturas, filtradas e paginadas", body = SubscriptionPage)
    ),
    security(("api_jwt" = []))
)]
pub async fn subscriptions(
    State(app_state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<SubscriptionPage>, AppError> {
    let page = app_state.dashboard_service.admin_subscriptions(&filter).await?;
    Ok(Json(page))
}

// GET /api/admin/customers
#[utoipa::path(
    get,
    path = "/api/admin/customers",
    tag = "Admin",
    params(ListFilter),
    responses(
        (status = 200, description = "Todos os cadastros, filtrados e paginados", body = CustomerPage)
    ),
    security(("api_jwt" = []))
)]
pub async fn customers(
    State(app_state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<CustomerPage>, AppError> {
    let page = app_state.dashboard_service.admin_customers(&filter).await?;
    Ok(Json(page))
}

// GET /api/admin/dealers
#[utoipa::path(
    get,
    path = "/api/admin/dealers",
    tag = "Admin",
    params(ListFilter),
    responses(
        (status = 200, description = "Todos os dealers, filtrados e paginados", body = DealerPage)
    ),
    security(("api_jwt" = []))
)]
pub async fn dealers(
    State(app_state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<DealerPage>, AppError> {
    let page = app_state.dashboard_service.admin_dealers(&filter).await?;
    Ok(Json(page))
}

// GET /api/admin/subscriptions/export — CSV do conjunto filtrado
#[utoipa::path(
    get,
    path = "/api/admin/subscriptions/export",
    tag = "Admin",
    params(ListFilter),
    responses(
        (status = 200, description = "CSV com todos os campos entre aspas", body = String, content_type = "text/csv")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_subscriptions(
    State(app_state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Response, AppError> {
    let csv = app_state.admin_service.export_subscriptions_csv(&filter).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"subscriptions.csv\"".to_string(),
        ),
    ];

    Ok((StatusCode::OK, headers, csv).into_response())
}

// POST /api/admin/dealers/import — corpo text/csv com (código, status)
#[utoipa::path(
    post,
    path = "/api/admin/dealers/import",
    tag = "Admin",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Relatório agregado do import", body = DealerImportReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn import_dealers(
    State(app_state): State<AppState>,
    body: String,
) -> Result<Json<DealerImportReport>, AppError> {
    let report = app_state.admin_service.import_dealers_csv(&body).await?;
    Ok(Json(report))
}
