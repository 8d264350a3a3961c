// src/models/customer.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

// Mapeia o CREATE TYPE registration_status do banco.
// Substitui o antigo sentinela "nome == celular / cidade == placeholder":
// o progresso do cadastro agora é um campo explícito.
// A ordem das variantes define o ranking de completude (Ord).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "registration_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Started,
    ProfileComplete,
    VehicleComplete,
    Subscribed,
}

// Mapeia o CREATE TYPE fault_type (6 tipos de ocorrência)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "fault_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultType {
    FlatTyre,
    EmptyTank,
    BatteryIssue,
    KeyLock,
    Accident,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "complaint_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplaintStatus {
    Open,
    Closed,
}

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,

    // Código legível atribuído pelo servidor (ex: CUS10001)
    pub customer_code: String,
    pub customer_name: String,

    // Chave de identidade para reentrada no fluxo (10 dígitos).
    // Não é única: cadastros parciais podem repetir o celular.
    pub mobile_number: String,
    pub email: Option<String>,
    pub state: Option<String>,
    pub city: String,

    pub vehicle_number: Option<String>,
    pub vehicle_make_model: Option<String>,
    pub tyre_details: Option<String>,
    pub count_of_tyres: i32,
    pub invoice_number: Option<String>,

    pub registration_date: NaiveDate,
    pub dealer_code: String,
    pub registration_status: RegistrationStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- CHAMADOS (COMPLAINTS) ---

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Uuid,
    pub complaint_number: String,
    pub customer_code: String,
    pub customer_mobile: String,
    pub vehicle_number: Option<String>,
    pub fault_type: FaultType,
    pub service_city: Option<String>,
    pub description: Option<String>,
    pub status: ComplaintStatus,
    pub service_status: String,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

// --- INDICAÇÕES (REFERRALS) ---

// Log append-only: uma linha por cadastro atribuído a um dealer
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: Uuid,
    pub customer_code: String,
    pub dealer_code: String,
    pub referral_source: String,
    pub referral_timestamp: DateTime<Utc>,
}
