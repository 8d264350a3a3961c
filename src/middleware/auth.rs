// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{CurrentUser, SessionRole},
};

// O middleware em si: valida o Bearer token e injeta a identidade nos
// "extensions" da requisição. A identidade vem inteira dos claims.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::InvalidToken)?;

    let claims = app_state.auth_service.validate_token(bearer.token())?;

    let current = CurrentUser {
        id: claims.sub,
        role: claims.role,
        code: claims.code,
    };
    request.extensions_mut().insert(current);

    Ok(next.run(request).await)
}

// Guards de papel: rodam depois do auth_guard, sobre a identidade já montada

pub async fn dealer_guard(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(&request, SessionRole::Dealer)?;
    Ok(next.run(request).await)
}

pub async fn admin_guard(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(&request, SessionRole::Admin)?;
    Ok(next.run(request).await)
}

pub async fn customer_guard(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(&request, SessionRole::Customer)?;
    Ok(next.run(request).await)
}

fn require_role(request: &Request, expected: SessionRole) -> Result<(), AppError> {
    let current = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::InvalidToken)?;

    if current.role != Some(expected) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// Extrator para obter a identidade autenticada diretamente nos handlers
pub struct AuthenticatedUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// Extrator do escopo do dealer (o dealer_code dos claims)
pub struct DealerContext(pub String);

impl<S> FromRequestParts<S> for DealerContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::InvalidToken)?;

        if current.role != Some(SessionRole::Dealer) {
            return Err(AppError::Forbidden);
        }
        current.code.clone().map(DealerContext).ok_or(AppError::Forbidden)
    }
}

// Extrator do escopo do cliente (o customer_code dos claims)
pub struct CustomerContext(pub String);

impl<S> FromRequestParts<S> for CustomerContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::InvalidToken)?;

        if current.role != Some(SessionRole::Customer) {
            return Err(AppError::Forbidden);
        }
        current.code.clone().map(CustomerContext).ok_or(AppError::Forbidden)
    }
}
