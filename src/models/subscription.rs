// src/models/subscription.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Success,
    Pending,
    Failed,
}

// Pedido de assinatura. Imutável após o insert: não existe caminho de update.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,

    // Código legível gerado pelo servidor (ex: ORD45001)
    pub order_id: String,

    pub customer_code: String,
    pub customer_name: String,
    pub customer_mobile: Option<String>,
    pub dealer_code: String,

    // Snapshot do plano no momento da compra
    pub plan_id: String,
    pub plan_name: String,
    #[schema(value_type = f64)]
    pub plan_price: Decimal,

    pub payment_status: PaymentStatus,
    pub payment_transaction_id: Option<String>,

    pub subscription_start_date: NaiveDate,
    pub subscription_end_date: NaiveDate,
    pub order_timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
