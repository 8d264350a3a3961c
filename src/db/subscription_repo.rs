// src/db/subscription_repo.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::subscription::{PaymentStatus, Subscription},
};

#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn next_order_id(&self) -> Result<String, AppError> {
        let seq: i64 = sqlx::query_scalar("SELECT nextval('order_code_seq')")
            .fetch_one(&self.pool)
            .await?;
        Ok(format!("ORD{}", seq))
    }

    // Assinaturas ligadas a qualquer um dos códigos de um mesmo celular
    // (a classificação do OTP decide "já concluído" a partir daqui)
    pub async fn list_by_customer_codes(
        &self,
        customer_codes: &[String],
    ) -> Result<Vec<Subscription>, AppError> {
        if customer_codes.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE customer_code = ANY($1) ORDER BY order_timestamp DESC",
        )
        .bind(customer_codes)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // A carteirinha busca pelo celular: um mesmo cliente pode ter
    // pedidos em códigos diferentes ao longo do tempo
    pub async fn list_by_customer_mobile(&self, mobile: &str) -> Result<Vec<Subscription>, AppError> {
        let rows = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE customer_mobile = $1 ORDER BY order_timestamp DESC",
        )
        .bind(mobile)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_customer_code(
        &self,
        customer_code: &str,
    ) -> Result<Vec<Subscription>, AppError> {
        let rows = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE customer_code = $1 ORDER BY order_timestamp DESC",
        )
        .bind(customer_code)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Assinatura SUCCESS ainda vigente (guarda contra duplo clique no checkout)
    pub async fn find_active_success(
        &self,
        customer_code: &str,
    ) -> Result<Option<Subscription>, AppError> {
        let row = sqlx::query_as::<_, Subscription>(
            r#"
            SELECT * FROM subscriptions
            WHERE customer_code = $1 AND payment_status = $2 AND subscription_end_date >= $3
            ORDER BY order_timestamp DESC
            "#,
        )
        .bind(customer_code)
        .bind(PaymentStatus::Success)
        .bind(Utc::now().date_naive())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    // Insere o pedido e marca o cliente como SUBSCRIBED na mesma transação
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_confirmed(
        &self,
        order_id: &str,
        customer_code: &str,
        customer_name: &str,
        customer_mobile: Option<&str>,
        dealer_code: &str,
        plan_id: &str,
        plan_name: &str,
        plan_price: Decimal,
        transaction_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Subscription, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions
                (order_id, customer_code, customer_name, customer_mobile, dealer_code,
                 plan_id, plan_name, plan_price, payment_status, payment_transaction_id,
                 subscription_start_date, subscription_end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(customer_code)
        .bind(customer_name)
        .bind(customer_mobile)
        .bind(dealer_code)
        .bind(plan_id)
        .bind(plan_name)
        .bind(plan_price)
        .bind(PaymentStatus::Success)
        .bind(transaction_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE customers SET registration_status = 'SUBSCRIBED', updated_at = now() WHERE customer_code = $1",
        )
        .bind(customer_code)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row)
    }

    pub async fn list_all(&self) -> Result<Vec<Subscription>, AppError> {
        let rows = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions ORDER BY order_timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_dealer(&self, dealer_code: &str) -> Result<Vec<Subscription>, AppError> {
        let rows = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE dealer_code = $1 ORDER BY order_timestamp DESC",
        )
        .bind(dealer_code)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
