// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::dealer_otp,
        handlers::auth::customer_login,
        handlers::auth::get_me,

        // --- Registration ---
        handlers::registration::start,
        handlers::registration::verify_otp,
        handlers::registration::personal_details,
        handlers::registration::vehicle_details,
        handlers::registration::tyre_details,

        // --- Checkout ---
        handlers::checkout::list_plans,
        handlers::checkout::confirm,

        // --- Dealer ---
        handlers::dealer::summary,
        handlers::dealer::subscriptions,
        handlers::dealer::customers,
        handlers::dealer::qr_code,
        handlers::dealer::flyer,

        // --- Admin ---
        handlers::admin::summary,
        handlers::admin::subscriptions,
        handlers::admin::customers,
        handlers::admin::dealers,
        handlers::admin::export_subscriptions,
        handlers::admin::import_dealers,

        // --- Customer ---
        handlers::customer::get_profile,
        handlers::customer::update_profile,
        handlers::customer::membership,
        handlers::customer::referral,
        handlers::customer::raise_complaint,
        handlers::customer::list_complaints,
        handlers::customer::transactions,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::AppRole,
            models::auth::SessionRole,
            models::auth::UserRole,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::DealerOtpPayload,
            models::auth::DealerOtpResponse,
            handlers::auth::CustomerLoginPayload,
            handlers::auth::CustomerLoginResponse,
            handlers::auth::MeResponse,

            // --- Domínio ---
            models::customer::RegistrationStatus,
            models::customer::Customer,
            models::customer::FaultType,
            models::customer::ComplaintStatus,
            models::customer::Complaint,
            models::customer::Referral,
            models::dealer::DealerStatus,
            models::dealer::Dealer,
            models::subscription::PaymentStatus,
            models::subscription::Subscription,
            models::catalog::Plan,
            models::catalog::PlanBenefit,

            // --- Registration ---
            services::registration::RegistrationStep,
            services::registration::CheckoutHandoff,
            services::registration::StartResponse,
            services::registration::VerifyOtpResponse,
            services::registration::StepResponse,
            services::registration::CompleteResponse,
            handlers::registration::StartRegistrationPayload,
            handlers::registration::VerifyOtpPayload,
            handlers::registration::PersonalDetailsPayload,
            handlers::registration::VehicleDetailsPayload,
            handlers::registration::TyreDetailsPayload,

            // --- Checkout ---
            handlers::checkout::CheckoutPayload,
            services::checkout::CheckoutResponse,

            // --- Painéis ---
            models::dashboard::DealerSummary,
            models::dashboard::AdminSummary,
            models::dashboard::SubscriptionPage,
            models::dashboard::CustomerPage,
            models::dashboard::DealerPage,
            models::dashboard::DealerImportReport,

            // --- Customer ---
            handlers::customer::UpdateProfilePayload,
            handlers::customer::RaiseComplaintPayload,
            services::customer::MembershipCard,
            services::customer::ReferralView,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação, OTP e sessão"),
        (name = "Registration", description = "Fluxo de cadastro em etapas"),
        (name = "Checkout", description = "Planos e pagamento simulado"),
        (name = "Dealer", description = "Painel do dealer, QR e flyer"),
        (name = "Admin", description = "Painel consolidado, export e import CSV"),
        (name = "Customer", description = "Área logada do cliente"),
        (name = "Users", description = "Dados da sessão")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
