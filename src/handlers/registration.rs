// src/handlers/registration.rs
//
// Endpoints do fluxo de cadastro em etapas. Cada transição de avanço
// vira uma chamada; voltar de etapa é só navegação na UI e não passa
// por aqui.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    services::registration::{CompleteResponse, StartResponse, StepResponse, VerifyOtpResponse},
};

// O formulário cai no dealer de demonstração quando o link não traz um
fn default_dealer() -> String {
    "DLR12345".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartRegistrationPayload {
    #[schema(example = "9876543210")]
    pub mobile: String,
    #[serde(default = "default_dealer")]
    #[schema(example = "DLR12345")]
    pub dealer: String,
}

// POST /api/registration/start
#[utoipa::path(
    post,
    path = "/api/registration/start",
    tag = "Registration",
    request_body = StartRegistrationPayload,
    responses(
        (status = 200, description = "OTP enviado, aguardando verificação", body = StartResponse),
        (status = 400, description = "Celular fora do formato de 10 dígitos")
    )
)]
pub async fn start(
    State(app_state): State<AppState>,
    Json(payload): Json<StartRegistrationPayload>,
) -> Result<Json<StartResponse>, AppError> {
    let response = app_state.registration_service.start(&payload.mobile).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpPayload {
    #[schema(example = "9876543210")]
    pub mobile: String,
    #[schema(example = "1234")]
    pub otp: String,
    #[serde(default = "default_dealer")]
    #[schema(example = "DLR12345")]
    pub dealer: String,
}

// POST /api/registration/verify-otp
#[utoipa::path(
    post,
    path = "/api/registration/verify-otp",
    tag = "Registration",
    request_body = VerifyOtpPayload,
    responses(
        (status = 200, description = "Classificação: cadastro novo, retomada ou já concluído", body = VerifyOtpResponse),
        (status = 401, description = "OTP inválido, estado inalterado"),
        (status = 404, description = "Dealer do link não existe")
    )
)]
pub async fn verify_otp(
    State(app_state): State<AppState>,
    Json(payload): Json<VerifyOtpPayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state
        .registration_service
        .verify_otp(&payload.mobile, &payload.otp, &payload.dealer)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetailsPayload {
    #[schema(example = "Ravi Kumar")]
    pub name: String,
    #[schema(example = "Maharashtra")]
    pub state: String,
    #[schema(example = "Pune")]
    pub city: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
}

// PUT /api/registration/{customer_code}/personal-details
#[utoipa::path(
    put,
    path = "/api/registration/{customer_code}/personal-details",
    tag = "Registration",
    request_body = PersonalDetailsPayload,
    params(("customer_code" = String, Path, description = "Código do cliente")),
    responses(
        (status = 200, description = "Dados pessoais gravados, próxima etapa: veículo", body = StepResponse),
        (status = 400, description = "Nome, estado ou cidade vazios: nada é persistido"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn personal_details(
    State(app_state): State<AppState>,
    Path(customer_code): Path<String>,
    Json(payload): Json<PersonalDetailsPayload>,
) -> Result<Json<StepResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .registration_service
        .submit_personal_details(
            &customer_code,
            &payload.name,
            &payload.state,
            &payload.city,
            payload.email.as_deref(),
        )
        .await?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetailsPayload {
    #[schema(example = "MH12AB1234")]
    pub vehicle_number: String,
    #[schema(example = "Tata Ace")]
    pub vehicle_make_model: Option<String>,
}

// PUT /api/registration/{customer_code}/vehicle-details
#[utoipa::path(
    put,
    path = "/api/registration/{customer_code}/vehicle-details",
    tag = "Registration",
    request_body = VehicleDetailsPayload,
    params(("customer_code" = String, Path, description = "Código do cliente")),
    responses(
        (status = 200, description = "Veículo gravado, próxima etapa: pneus", body = StepResponse),
        (status = 400, description = "Placa vazia: nada é persistido"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn vehicle_details(
    State(app_state): State<AppState>,
    Path(customer_code): Path<String>,
    Json(payload): Json<VehicleDetailsPayload>,
) -> Result<Json<StepResponse>, AppError> {
    let response = app_state
        .registration_service
        .submit_vehicle_details(
            &customer_code,
            &payload.vehicle_number,
            payload.vehicle_make_model.as_deref(),
        )
        .await?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TyreDetailsPayload {
    #[schema(example = "BKT Agrimax RT657")]
    pub tyre_details: Option<String>,
    // Texto livre do formulário; valor que não parseia vira 1
    #[schema(example = "4")]
    pub count_of_tyres: Option<String>,
    #[schema(example = "INV2345")]
    pub invoice_number: Option<String>,
}

// PUT /api/registration/{customer_code}/tyre-details
#[utoipa::path(
    put,
    path = "/api/registration/{customer_code}/tyre-details",
    tag = "Registration",
    request_body = TyreDetailsPayload,
    params(("customer_code" = String, Path, description = "Código do cliente")),
    responses(
        (status = 200, description = "Cadastro completo; contexto de checkout no corpo", body = CompleteResponse),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn tyre_details(
    State(app_state): State<AppState>,
    Path(customer_code): Path<String>,
    Json(payload): Json<TyreDetailsPayload>,
) -> Result<Json<CompleteResponse>, AppError> {
    let response = app_state
        .registration_service
        .submit_tyre_details(
            &customer_code,
            payload.tyre_details.as_deref(),
            payload.count_of_tyres.as_deref(),
            payload.invoice_number.as_deref(),
        )
        .await?;

    Ok(Json(response))
}
