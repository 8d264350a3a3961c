// src/db/customer_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::customer::{Customer, RegistrationStatus},
};

// Repositório da tabela 'customers'. Cada passo do fluxo de cadastro
// vira exatamente um UPDATE direcionado aqui.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Todas as linhas de um celular, da mais recente para a mais antiga.
    // O celular não é único: cadastros abandonados deixam linhas parciais.
    pub async fn find_by_mobile(&self, mobile: &str) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE mobile_number = $1 ORDER BY created_at DESC",
        )
        .bind(mobile)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_code(&self, customer_code: &str) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE customer_code = $1")
            .bind(customer_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    // Gera o próximo código legível (CUS10001, CUS10002, ...)
    pub async fn next_customer_code(&self) -> Result<String, AppError> {
        let seq: i64 = sqlx::query_scalar("SELECT nextval('customer_code_seq')")
            .fetch_one(&self.pool)
            .await?;
        Ok(format!("CUS{}", seq))
    }

    // Insere a linha inicial do cadastro: perfil vazio, status STARTED.
    // O preenchimento acontece passo a passo nos updates abaixo.
    pub async fn insert_started(
        &self,
        customer_code: &str,
        mobile: &str,
        dealer_code: &str,
    ) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (customer_code, customer_name, mobile_number, city, dealer_code, registration_status)
            VALUES ($1, '', $2, '', $3, $4)
            RETURNING *
            "#,
        )
        .bind(customer_code)
        .bind(mobile)
        .bind(dealer_code)
        .bind(RegistrationStatus::Started)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_personal_details(
        &self,
        customer_code: &str,
        name: &str,
        state: &str,
        city: &str,
        email: Option<&str>,
    ) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET customer_name = $2, state = $3, city = $4, email = $5,
                registration_status = $6, updated_at = now()
            WHERE customer_code = $1
            RETURNING *
            "#,
        )
        .bind(customer_code)
        .bind(name)
        .bind(state)
        .bind(city)
        .bind(email)
        .bind(RegistrationStatus::ProfileComplete)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(AppError::CustomerNotFound)
    }

    pub async fn update_vehicle_details(
        &self,
        customer_code: &str,
        vehicle_number: &str,
        vehicle_make_model: Option<&str>,
    ) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET vehicle_number = $2, vehicle_make_model = $3,
                registration_status = $4, updated_at = now()
            WHERE customer_code = $1
            RETURNING *
            "#,
        )
        .bind(customer_code)
        .bind(vehicle_number)
        .bind(vehicle_make_model)
        .bind(RegistrationStatus::VehicleComplete)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(AppError::CustomerNotFound)
    }

    // Último passo do fluxo: nenhum campo é obrigatório e o status não
    // avança aqui (SUBSCRIBED só é gravado pelo checkout).
    pub async fn update_tyre_details(
        &self,
        customer_code: &str,
        tyre_details: Option<&str>,
        count_of_tyres: i32,
        invoice_number: Option<&str>,
    ) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET tyre_details = $2, count_of_tyres = $3, invoice_number = $4, updated_at = now()
            WHERE customer_code = $1
            RETURNING *
            "#,
        )
        .bind(customer_code)
        .bind(tyre_details)
        .bind(count_of_tyres)
        .bind(invoice_number)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(AppError::CustomerNotFound)
    }

    // Atualização de perfil pela área do cliente
    pub async fn update_profile(
        &self,
        customer_code: &str,
        name: &str,
        email: Option<&str>,
        state: Option<&str>,
        city: &str,
        vehicle_number: Option<&str>,
        vehicle_make_model: Option<&str>,
    ) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET customer_name = $2, email = $3, state = $4, city = $5,
                vehicle_number = $6, vehicle_make_model = $7, updated_at = now()
            WHERE customer_code = $1
            RETURNING *
            "#,
        )
        .bind(customer_code)
        .bind(name)
        .bind(email)
        .bind(state)
        .bind(city)
        .bind(vehicle_number)
        .bind(vehicle_make_model)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(AppError::CustomerNotFound)
    }

    pub async fn list_all(&self) -> Result<Vec<Customer>, AppError> {
        let rows =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    pub async fn list_by_dealer(&self, dealer_code: &str) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE dealer_code = $1 ORDER BY created_at DESC",
        )
        .bind(dealer_code)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
