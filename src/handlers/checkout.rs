// src/handlers/checkout.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::Plan,
    services::checkout::CheckoutResponse,
};

// GET /api/plans
#[utoipa::path(
    get,
    path = "/api/plans",
    tag = "Checkout",
    responses(
        (status = 200, description = "Catálogo de planos (3 níveis)", body = Vec<Plan>)
    )
)]
pub async fn list_plans(State(app_state): State<AppState>) -> Json<Vec<Plan>> {
    Json(app_state.checkout_service.list_plans())
}

// O contexto entregue pelo fim do cadastro (customer/dealer/plano)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    #[schema(example = "CUS10001")]
    pub customer_code: String,
    #[schema(example = "DLR12345")]
    pub dealer_code: Option<String>,
    #[schema(example = "PLAN_GOLD")]
    pub plan_id: String,
}

// POST /api/checkout
#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = "Checkout",
    request_body = CheckoutPayload,
    responses(
        (status = 201, description = "Assinatura confirmada (pagamento simulado)", body = CheckoutResponse),
        (status = 200, description = "Já existia assinatura vigente; pedido existente devolvido", body = CheckoutResponse),
        (status = 404, description = "Plano ou cliente não encontrados")
    )
)]
pub async fn confirm(
    State(app_state): State<AppState>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state
        .checkout_service
        .confirm(&payload.customer_code, payload.dealer_code.as_deref(), &payload.plan_id)
        .await?;

    let status = if response.already_active { StatusCode::OK } else { StatusCode::CREATED };
    Ok((status, Json(response)))
}
