// src/services/customer.rs
//
// Área logada do cliente: perfil, carteirinha, indicações, chamados e
// histórico de transações. Cada operação é um CRUD fino sobre uma
// tabela, com o escopo preso ao cliente do token.

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    db::{ComplaintRepository, CustomerRepository, ReferralRepository, SubscriptionRepository},
    models::{
        catalog::{self, PlanBenefit},
        customer::{Complaint, Customer, FaultType, Referral},
        subscription::Subscription,
    },
};

// Carteirinha: a assinatura + o que o catálogo diz sobre o plano dela
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCard {
    pub subscription: Subscription,
    pub active: bool,
    pub total_services: i32,
    pub validity: String,
    pub benefits: Vec<PlanBenefit>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralView {
    // O código de indicação do cliente é o próprio customer_code
    pub referral_code: String,
    pub referrals: Vec<Referral>,
}

// Número de chamado no padrão do portal: CMP + sufixo do timestamp
pub fn generate_complaint_number(now_millis: i64) -> String {
    format!("CMP{:08}", now_millis % 100_000_000)
}

#[derive(Clone)]
pub struct CustomerService {
    customers: CustomerRepository,
    subscriptions: SubscriptionRepository,
    referrals: ReferralRepository,
    complaints: ComplaintRepository,
}

impl CustomerService {
    pub fn new(
        customers: CustomerRepository,
        subscriptions: SubscriptionRepository,
        referrals: ReferralRepository,
        complaints: ComplaintRepository,
    ) -> Self {
        Self { customers, subscriptions, referrals, complaints }
    }

    pub async fn get_profile(&self, customer_code: &str) -> Result<Customer, AppError> {
        self.customers
            .find_by_code(customer_code)
            .await?
            .ok_or(AppError::CustomerNotFound)
    }

    #[allow(clippy::too_many_arguments)]
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
        if name.trim().is_empty() {
            return Err(AppError::MissingField("name"));
        }
        if city.trim().is_empty() {
            return Err(AppError::MissingField("city"));
        }
        self.customers
            .update_profile(customer_code, name.trim(), email, state, city.trim(), vehicle_number, vehicle_make_model)
            .await
    }

    // Carteirinhas do celular do cliente (um celular pode ter mais de
    // um pedido ao longo do tempo)
    pub async fn membership_cards(&self, customer_code: &str) -> Result<Vec<MembershipCard>, AppError> {
        let customer = self.get_profile(customer_code).await?;
        let subs = self
            .subscriptions
            .list_by_customer_mobile(&customer.mobile_number)
            .await?;

        let today = Utc::now().date_naive();
        let cards = subs
            .into_iter()
            .map(|sub| {
                let plan = catalog::find_plan(&sub.plan_id);
                MembershipCard {
                    active: sub.subscription_end_date >= today,
                    total_services: plan.as_ref().map(|p| p.total_services).unwrap_or(3),
                    validity: plan
                        .as_ref()
                        .map(|p| p.validity.clone())
                        .unwrap_or_else(|| "2 Years".to_string()),
                    benefits: plan.map(|p| p.benefits).unwrap_or_default(),
                    subscription: sub,
                }
            })
            .collect();

        Ok(cards)
    }

    pub async fn referral_view(&self, customer_code: &str) -> Result<ReferralView, AppError> {
        let referrals = self.referrals.list_by_customer(customer_code).await?;
        Ok(ReferralView { referral_code: customer_code.to_string(), referrals })
    }

    pub async fn raise_complaint(
        &self,
        customer_code: &str,
        fault_type: FaultType,
        vehicle_number: Option<&str>,
        service_city: Option<&str>,
        description: Option<&str>,
    ) -> Result<Complaint, AppError> {
        let customer = self.get_profile(customer_code).await?;
        let number = generate_complaint_number(Utc::now().timestamp_millis());

        let complaint = self
            .complaints
            .insert(
                &number,
                customer_code,
                &customer.mobile_number,
                vehicle_number,
                fault_type,
                service_city,
                description,
            )
            .await?;

        tracing::info!("Chamado {} aberto pelo cliente {}", number, customer_code);

        Ok(complaint)
    }

    pub async fn list_complaints(&self, customer_code: &str) -> Result<Vec<Complaint>, AppError> {
        let customer = self.get_profile(customer_code).await?;
        self.complaints.list_by_mobile(&customer.mobile_number).await
    }

    // Histórico de transações = os pedidos de assinatura do cliente
    pub async fn list_transactions(&self, customer_code: &str) -> Result<Vec<Subscription>, AppError> {
        self.subscriptions.list_by_customer_code(customer_code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numero_de_chamado_usa_o_sufixo_do_timestamp() {
        assert_eq!(generate_complaint_number(1_770_000_012_345_678), "CMP12345678");
        // Sufixo curto sai com zeros à esquerda, sempre 8 dígitos
        assert_eq!(generate_complaint_number(1_700_000_000_000_042), "CMP00000042");
    }
}
