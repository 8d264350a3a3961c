use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    #[error("Celular inválido")]
    InvalidMobile,

    #[error("Telefone é obrigatório")]
    PhoneRequired,

    #[error("OTP inválido")]
    InvalidOtp,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Dealer inativo")]
    DealerInactive,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Dealer não encontrado")]
    DealerNotFound,

    #[error("Nenhuma conta vinculada a este dealer")]
    NoLinkedAccount,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Nenhum cadastro encontrado para este celular")]
    RegistrationNotFound,

    #[error("Plano não encontrado")]
    PlanNotFound,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MissingField(field) => {
                let body = Json(json!({ "error": format!("Campo obrigatório ausente: {}", field) }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidMobile => {
                (StatusCode::BAD_REQUEST, "Informe um celular válido de 10 dígitos.")
            }
            AppError::PhoneRequired => (StatusCode::BAD_REQUEST, "Telefone é obrigatório."),
            AppError::InvalidOtp => (StatusCode::UNAUTHORIZED, "OTP inválido."),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos."),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.")
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Acesso negado para este perfil."),
            AppError::DealerInactive => (StatusCode::FORBIDDEN, "Este dealer está inativo."),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::DealerNotFound => {
                (StatusCode::NOT_FOUND, "Nenhum dealer encontrado com este número.")
            }
            AppError::NoLinkedAccount => {
                (StatusCode::NOT_FOUND, "Nenhuma conta de login vinculada a este dealer.")
            }
            AppError::CustomerNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado."),
            AppError::RegistrationNotFound => {
                (StatusCode::NOT_FOUND, "Nenhum cadastro encontrado para este celular.")
            }
            AppError::PlanNotFound => (StatusCode::NOT_FOUND, "Plano não encontrado."),

            // Todos os outros (DatabaseError, InternalServerError, etc.) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
