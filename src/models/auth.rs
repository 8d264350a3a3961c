// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Representa uma conta de login (admin ou dealer) vinda do banco
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Mapeia o CREATE TYPE app_role do banco (papéis com conta de login)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "app_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AppRole {
    Admin,
    Dealer,
}

// Papel carregado no token. Clientes não têm conta em `users`:
// autenticam por celular + OTP e recebem um token próprio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionRole {
    Admin,
    Dealer,
    Customer,
}

impl From<AppRole> for SessionRole {
    fn from(role: AppRole) -> Self {
        match role {
            AppRole::Admin => SessionRole::Admin,
            AppRole::Dealer => SessionRole::Dealer,
        }
    }
}

// Vínculo conta -> papel de negócio (tabela user_roles)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub user_id: Uuid,
    pub role: AppRole,
    pub dealer_code: Option<String>,
}

// Estrutura de dados ("claims") dentro do JWT.
// `code` carrega o dealer_code ou o customer_code conforme o papel.
// Conta recém-criada ainda sem papel viaja com role = None.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Option<SessionRole>,
    pub code: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

// Identidade autenticada da requisição (montada pelo middleware)
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Option<SessionRole>,
    pub code: Option<String>,
}

// Dados para registro de uma nova conta
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "dealer@email.com")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Dados para login por e-mail/senha
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token e o papel resolvido
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub role: Option<SessionRole>,
    pub dealer_code: Option<String>,
}

// Payload da função dealer-otp: {phone, action: "send"|"verify", otp?}
#[derive(Debug, Deserialize, ToSchema)]
pub struct DealerOtpPayload {
    #[schema(example = "9876543211")]
    pub phone: Option<String>,
    #[schema(example = "send")]
    pub action: String,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerOtpResponse {
    pub success: bool,
    pub message: Option<String>,
    pub email: Option<String>,
    pub token: Option<String>,
}
