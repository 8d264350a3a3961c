// src/models/dealer.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE dealer_status do banco. INACTIVE bloqueia o login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "dealer_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DealerStatus {
    Active,
    Inactive,
}

// Parser tolerante usado pelo import CSV (aceita qualquer caixa)
impl FromStr for DealerStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(DealerStatus::Active),
            "INACTIVE" => Ok(DealerStatus::Inactive),
            _ => Err(()),
        }
    }
}

impl DealerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealerStatus::Active => "ACTIVE",
            DealerStatus::Inactive => "INACTIVE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub id: Uuid,
    pub dealer_code: String,
    pub dealer_name: String,
    pub dealer_mobile_number: String,
    pub dealer_email: Option<String>,
    pub dealer_city: Option<String>,
    pub dealer_state: Option<String>,
    pub dealer_gstin: Option<String>,
    pub dealer_channel_type: Option<String>,
    pub dealer_status: DealerStatus,
    pub dealer_enrollment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
