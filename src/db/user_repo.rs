// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AppRole, User, UserRole},
};

// O repositório de contas, responsável pelas tabelas 'users' e 'user_roles'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca uma conta pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Busca uma conta pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Cria uma nova conta de login
    pub async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    // Uma única consulta resolve papel + dealer_code da sessão.
    // Conta sem linha em user_roles é tratada como "sem papel", nunca como erro.
    pub async fn find_role(&self, user_id: Uuid) -> Result<Option<UserRole>, AppError> {
        let role = sqlx::query_as::<_, UserRole>("SELECT * FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    // Busca o vínculo de login de um dealer (usado pela função dealer-otp)
    pub async fn find_dealer_link(&self, dealer_code: &str) -> Result<Option<UserRole>, AppError> {
        let role = sqlx::query_as::<_, UserRole>(
            "SELECT * FROM user_roles WHERE dealer_code = $1 AND role = $2",
        )
        .bind(dealer_code)
        .bind(AppRole::Dealer)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }
}
