// src/db/complaint_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::customer::{Complaint, FaultType},
};

// Chamados abertos pelos clientes. O fechamento acontece fora do
// portal: não existe caminho de update aqui.
#[derive(Clone)]
pub struct ComplaintRepository {
    pool: PgPool,
}

impl ComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        complaint_number: &str,
        customer_code: &str,
        customer_mobile: &str,
        vehicle_number: Option<&str>,
        fault_type: FaultType,
        service_city: Option<&str>,
        description: Option<&str>,
    ) -> Result<Complaint, AppError> {
        let row = sqlx::query_as::<_, Complaint>(
            r#"
            INSERT INTO complaints
                (complaint_number, customer_code, customer_mobile, vehicle_number,
                 fault_type, service_city, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(complaint_number)
        .bind(customer_code)
        .bind(customer_mobile)
        .bind(vehicle_number)
        .bind(fault_type)
        .bind(service_city)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_by_mobile(&self, mobile: &str) -> Result<Vec<Complaint>, AppError> {
        let rows = sqlx::query_as::<_, Complaint>(
            "SELECT * FROM complaints WHERE customer_mobile = $1 ORDER BY created_at DESC",
        )
        .bind(mobile)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
