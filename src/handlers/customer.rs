// src/handlers/customer.rs
//
// Área logada do cliente. O escopo é o customer_code dos claims.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CustomerContext,
    models::customer::{Complaint, Customer, FaultType},
    models::subscription::Subscription,
    services::customer::{MembershipCard, ReferralView},
};

// GET /api/customer/profile
#[utoipa::path(
    get,
    path = "/api/customer/profile",
    tag = "Customer",
    responses(
        (status = 200, description = "Perfil do cliente", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    CustomerContext(customer_code): CustomerContext,
) -> Result<Json<Customer>, AppError> {
    let customer = app_state.customer_service.get_profile(&customer_code).await?;
    Ok(Json(customer))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[schema(example = "Ravi Kumar")]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[schema(example = "Maharashtra")]
    pub state: Option<String>,
    #[schema(example = "Pune")]
    pub city: String,
    pub vehicle_number: Option<String>,
    pub vehicle_make_model: Option<String>,
}

// PUT /api/customer/profile
#[utoipa::path(
    put,
    path = "/api/customer/profile",
    tag = "Customer",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = Customer),
        (status = 400, description = "Nome ou cidade vazios")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    CustomerContext(customer_code): CustomerContext,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<Customer>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let customer = app_state
        .customer_service
        .update_profile(
            &customer_code,
            &payload.name,
            payload.email.as_deref(),
            payload.state.as_deref(),
            &payload.city,
            payload.vehicle_number.as_deref(),
            payload.vehicle_make_model.as_deref(),
        )
        .await?;

    Ok(Json(customer))
}

// GET /api/customer/membership — as carteirinhas do cliente
#[utoipa::path(
    get,
    path = "/api/customer/membership",
    tag = "Customer",
    responses(
        (status = 200, description = "Assinaturas com vigência e benefícios do catálogo", body = Vec<MembershipCard>)
    ),
    security(("api_jwt" = []))
)]
pub async fn membership(
    State(app_state): State<AppState>,
    CustomerContext(customer_code): CustomerContext,
) -> Result<Json<Vec<MembershipCard>>, AppError> {
    let cards = app_state.customer_service.membership_cards(&customer_code).await?;
    Ok(Json(cards))
}

// GET /api/customer/referral
#[utoipa::path(
    get,
    path = "/api/customer/referral",
    tag = "Customer",
    responses(
        (status = 200, description = "Código de indicação + indicações registradas", body = ReferralView)
    ),
    security(("api_jwt" = []))
)]
pub async fn referral(
    State(app_state): State<AppState>,
    CustomerContext(customer_code): CustomerContext,
) -> Result<Json<ReferralView>, AppError> {
    let view = app_state.customer_service.referral_view(&customer_code).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RaiseComplaintPayload {
    // Um dos 6 tipos de ocorrência
    pub fault_type: FaultType,
    #[schema(example = "MH12AB1234")]
    pub vehicle_number: Option<String>,
    #[schema(example = "Pune")]
    pub service_city: Option<String>,
    pub description: Option<String>,
}

// POST /api/customer/complaints
#[utoipa::path(
    post,
    path = "/api/customer/complaints",
    tag = "Customer",
    request_body = RaiseComplaintPayload,
    responses(
        (status = 201, description = "Chamado aberto (status OPEN)", body = Complaint)
    ),
    security(("api_jwt" = []))
)]
pub async fn raise_complaint(
    State(app_state): State<AppState>,
    CustomerContext(customer_code): CustomerContext,
    Json(payload): Json<RaiseComplaintPayload>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = app_state
        .customer_service
        .raise_complaint(
            &customer_code,
            payload.fault_type,
            payload.vehicle_number.as_deref(),
            payload.service_city.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(complaint)))
}

// GET /api/customer/complaints
#[utoipa::path(
    get,
    path = "/api/customer/complaints",
    tag = "Customer",
    responses(
        (status = 200, description = "Chamados do cliente, mais recentes primeiro", body = Vec<Complaint>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_complaints(
    State(app_state): State<AppState>,
    CustomerContext(customer_code): CustomerContext,
) -> Result<Json<Vec<Complaint>>, AppError> {
    let complaints = app_state.customer_service.list_complaints(&customer_code).await?;
    Ok(Json(complaints))
}

// GET /api/customer/transactions
#[utoipa::path(
    get,
    path = "/api/customer/transactions",
    tag = "Customer",
    responses(
        (status = 200, description = "Histórico de pedidos do cliente", body = Vec<Subscription>)
    ),
    security(("api_jwt" = []))
)]
pub async fn transactions(
    State(app_state): State<AppState>,
    CustomerContext(customer_code): CustomerContext,
) -> Result<Json<Vec<Subscription>>, AppError> {
    let subs = app_state.customer_service.list_transactions(&customer_code).await?;
    Ok(Json(subs))
}
