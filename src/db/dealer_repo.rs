// src/db/dealer_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dealer::{Dealer, DealerStatus},
};

#[derive(Clone)]
pub struct DealerRepository {
    pool: PgPool,
}

impl DealerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_code(&self, dealer_code: &str) -> Result<Option<Dealer>, AppError> {
        let row = sqlx::query_as::<_, Dealer>("SELECT * FROM dealers WHERE dealer_code = $1")
            .bind(dealer_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Dealer>, AppError> {
        let row =
            sqlx::query_as::<_, Dealer>("SELECT * FROM dealers WHERE dealer_mobile_number = $1")
                .bind(mobile)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn list_all(&self) -> Result<Vec<Dealer>, AppError> {
        let rows = sqlx::query_as::<_, Dealer>("SELECT * FROM dealers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    // Import CSV: linha com código conhecido só muda o status
    pub async fn update_status(
        &self,
        dealer_code: &str,
        status: DealerStatus,
    ) -> Result<Option<Dealer>, AppError> {
        let row = sqlx::query_as::<_, Dealer>(
            "UPDATE dealers SET dealer_status = $2, updated_at = now() WHERE dealer_code = $1 RETURNING *",
        )
        .bind(dealer_code)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    // Import CSV: código desconhecido entra como dealer mínimo, com
    // nome/celular placeholder, para completar depois
    pub async fn insert_placeholder(
        &self,
        dealer_code: &str,
        status: DealerStatus,
    ) -> Result<Dealer, AppError> {
        let row = sqlx::query_as::<_, Dealer>(
            r#"
            INSERT INTO dealers (dealer_code, dealer_name, dealer_mobile_number, dealer_status)
            VALUES ($1, $2, '0000000000', $3)
            RETURNING *
            "#,
        )
        .bind(dealer_code)
        .bind(format!("Dealer {}", dealer_code))
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
