// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::{
            AuthResponse, DealerOtpPayload, DealerOtpResponse, LoginUserPayload,
            RegisterUserPayload, SessionRole,
        },
        customer::Customer,
    },
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Conta criada", body = AuthResponse),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .auth_service
        .register_user(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Sessão aberta", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Dealer inativo")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(response))
}

// A antiga função de borda dealer-phone-otp
// POST /api/auth/dealer-otp
#[utoipa::path(
    post,
    path = "/api/auth/dealer-otp",
    tag = "Auth",
    request_body = DealerOtpPayload,
    responses(
        (status = 200, description = "OTP enviado ou verificado", body = DealerOtpResponse),
        (status = 400, description = "Telefone ou ação ausente"),
        (status = 401, description = "OTP inválido"),
        (status = 403, description = "Dealer inativo"),
        (status = 404, description = "Dealer ou conta vinculada não encontrados")
    )
)]
pub async fn dealer_otp(
    State(app_state): State<AppState>,
    Json(payload): Json<DealerOtpPayload>,
) -> Result<Json<DealerOtpResponse>, AppError> {
    let response = app_state
        .auth_service
        .dealer_otp(payload.phone.as_deref(), &payload.action, payload.otp.as_deref())
        .await?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerLoginPayload {
    #[schema(example = "9876543210")]
    pub mobile: String,
    #[schema(example = "1234")]
    pub otp: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLoginResponse {
    pub auth: AuthResponse,
    pub customer: Customer,
}

// Login passwordless do cliente (celular + OTP)
// POST /api/auth/customer-login
#[utoipa::path(
    post,
    path = "/api/auth/customer-login",
    tag = "Auth",
    request_body = CustomerLoginPayload,
    responses(
        (status = 200, description = "Sessão do cliente aberta", body = CustomerLoginResponse),
        (status = 401, description = "OTP inválido"),
        (status = 404, description = "Nenhum cadastro para este celular")
    )
)]
pub async fn customer_login(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerLoginPayload>,
) -> Result<Json<CustomerLoginResponse>, AppError> {
    let (auth, customer) = app_state
        .auth_service
        .customer_login(&payload.mobile, &payload.otp)
        .await?;

    Ok(Json(CustomerLoginResponse { auth, customer }))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: Uuid,
    pub role: Option<SessionRole>,
    pub code: Option<String>,
    pub email: Option<String>,
}

// Handler da rota protegida /me
// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Identidade da sessão", body = MeResponse),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
) -> Result<Json<MeResponse>, AppError> {
    // Sessões de cliente não têm linha em `users`; o e-mail só existe
    // para contas admin/dealer
    let email = match current.role {
        Some(SessionRole::Customer) => None,
        _ => app_state.auth_service.find_user(current.id).await.ok().map(|u| u.email),
    };

    Ok(Json(MeResponse {
        id: current.id,
        role: current.role,
        code: current.code,
        email,
    }))
}
