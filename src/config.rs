// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ComplaintRepository, CustomerRepository, DealerRepository, ReferralRepository,
        SubscriptionRepository, UserRepository,
    },
    services::{
        admin::AdminService, auth::AuthService, checkout::CheckoutService,
        customer::CustomerService, dashboard::DashboardService, document::DocumentService,
        registration::RegistrationService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub bind_addr: String,
    pub auth_service: AuthService,
    pub registration_service: RegistrationService,
    pub checkout_service: CheckoutService,
    pub dashboard_service: DashboardService,
    pub admin_service: AdminService,
    pub customer_service: CustomerService,
    pub document_service: DocumentService,
}

impl AppState {
    // Carrega as configurações e monta o estado. Se a configuração
    // falhar, a aplicação não deve iniciar.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Opcionais com padrão: o OTP de teste e a base do link de cadastro
        let test_otp = env::var("TEST_OTP").unwrap_or_else(|_| "1234".to_string());
        let portal_base_url =
            env::var("PORTAL_BASE_URL").unwrap_or_else(|_| "https://taas.example.com".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let dealer_repo = DealerRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let subscription_repo = SubscriptionRepository::new(db_pool.clone());
        let referral_repo = ReferralRepository::new(db_pool.clone());
        let complaint_repo = ComplaintRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo,
            dealer_repo.clone(),
            customer_repo.clone(),
            jwt_secret,
            test_otp.clone(),
        );
        let registration_service = RegistrationService::new(
            customer_repo.clone(),
            dealer_repo.clone(),
            subscription_repo.clone(),
            referral_repo.clone(),
            test_otp,
        );
        let checkout_service =
            CheckoutService::new(customer_repo.clone(), subscription_repo.clone());
        let dashboard_service = DashboardService::new(
            customer_repo.clone(),
            dealer_repo.clone(),
            subscription_repo.clone(),
        );
        let admin_service = AdminService::new(
            dealer_repo.clone(),
            customer_repo.clone(),
            subscription_repo.clone(),
        );
        let customer_service = CustomerService::new(
            customer_repo,
            subscription_repo,
            referral_repo,
            complaint_repo,
        );
        let document_service = DocumentService::new(dealer_repo, portal_base_url);

        Ok(Self {
            db_pool,
            bind_addr,
            auth_service,
            registration_service,
            checkout_service,
            dashboard_service,
            admin_service,
            customer_service,
            document_service,
        })
    }
}
