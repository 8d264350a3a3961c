// src/db/referral_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::customer::Referral};

// Log append-only de indicações. Nada aqui é consumido por cálculo:
// as linhas existem para atribuição e exibição.
#[derive(Clone)]
pub struct ReferralRepository {
    pool: PgPool,
}

impl ReferralRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        customer_code: &str,
        dealer_code: &str,
        source: &str,
    ) -> Result<Referral, AppError> {
        let row = sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referrals (customer_code, dealer_code, referral_source)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(customer_code)
        .bind(dealer_code)
        .bind(source)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_by_customer(&self, customer_code: &str) -> Result<Vec<Referral>, AppError> {
        let rows = sqlx::query_as::<_, Referral>(
            "SELECT * FROM referrals WHERE customer_code = $1 ORDER BY referral_timestamp DESC",
        )
        .bind(customer_code)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
