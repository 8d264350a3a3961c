// src/services/checkout.rs
//
// Seleção de plano + pagamento simulado. O "gateway" aqui é um atraso
// fixo de ~2,5s seguido de um insert com payment_status SUCCESS e um
// id de transação sintético. A troca por um gateway real acontece
// neste serviço, sem tocar no resto do fluxo.

use chrono::{Months, Utc};
use serde::Serialize;
use tokio::time::{sleep, Duration};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CustomerRepository, SubscriptionRepository},
    models::{
        catalog::{self, Plan},
        subscription::Subscription,
    },
};

// Atraso do processamento simulado
const PAYMENT_DELAY_MS: u64 = 2500;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub subscription: Subscription,
    // true quando o pedido devolvido já existia (guarda de duplo clique)
    pub already_active: bool,
}

// Meses de vigência a partir do rótulo do plano. Rótulo contendo "12"
// vira 12 meses; qualquer outro (inclusive o "2 Years" do catálogo
// atual) cai em 6.
pub fn duration_months(duration_label: &str) -> u32 {
    if duration_label.contains("12") { 12 } else { 6 }
}

pub fn synthetic_transaction_id() -> String {
    format!("TXN{}", Uuid::new_v4().simple())
}

#[derive(Clone)]
pub struct CheckoutService {
    customers: CustomerRepository,
    subscriptions: SubscriptionRepository,
}

impl CheckoutService {
    pub fn new(customers: CustomerRepository, subscriptions: SubscriptionRepository) -> Self {
        Self { customers, subscriptions }
    }

    pub fn list_plans(&self) -> Vec<Plan> {
        catalog::plans()
    }

    // Confirmação de pagamento: exatamente um pedido por confirmação.
    pub async fn confirm(
        &self,
        customer_code: &str,
        dealer_code: Option<&str>,
        plan_id: &str,
    ) -> Result<CheckoutResponse, AppError> {
        let plan = catalog::find_plan(plan_id).ok_or(AppError::PlanNotFound)?;

        let customer = self
            .customers
            .find_by_code(customer_code)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        // Guarda contra o duplo envio: uma assinatura SUCCESS ainda
        // vigente devolve o pedido existente em vez de duplicar.
        if let Some(existing) = self.subscriptions.find_active_success(customer_code).await? {
            return Ok(CheckoutResponse { subscription: existing, already_active: true });
        }

        // Processamento simulado. O await não é cancelável depois de
        // emitido; o cliente vê o estado "processando" até o fim.
        sleep(Duration::from_millis(PAYMENT_DELAY_MS)).await;

        let start_date = Utc::now().date_naive();
        let end_date = start_date
            .checked_add_months(Months::new(duration_months(&plan.duration)))
            .ok_or_else(|| anyhow::anyhow!("data de término fora do intervalo"))?;

        let order_id = self.subscriptions.next_order_id().await?;
        let transaction_id = synthetic_transaction_id();

        // O contrato de query params manda o dealer junto; a linha do
        // cliente é a referência quando ele não vem.
        let dealer_code = dealer_code.unwrap_or(&customer.dealer_code);

        let subscription = self
            .subscriptions
            .insert_confirmed(
                &order_id,
                &customer.customer_code,
                &customer.customer_name,
                Some(&customer.mobile_number),
                dealer_code,
                &plan.id,
                &plan.name,
                plan.price,
                &transaction_id,
                start_date,
                end_date,
            )
            .await?;

        tracing::info!(
            "Assinatura confirmada: {} ({} / {})",
            subscription.order_id,
            subscription.customer_code,
            subscription.plan_id
        );

        Ok(CheckoutResponse { subscription, already_active: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotulo_com_doze_vira_doze_meses() {
        assert_eq!(duration_months("12 Months"), 12);
        assert_eq!(duration_months("Valid for 12 months"), 12);
    }

    #[test]
    fn qualquer_outro_rotulo_cai_em_seis_meses() {
        assert_eq!(duration_months("6 Months"), 6);
        // O catálogo atual usa "2 Years" em todos os níveis: a
        // heurística não o trata e o padrão de 6 meses vale.
        assert_eq!(duration_months("2 Years"), 6);
        assert_eq!(duration_months(""), 6);
    }

    #[test]
    fn id_de_transacao_e_sintetico_e_unico() {
        let a = synthetic_transaction_id();
        let b = synthetic_transaction_id();
        assert!(a.starts_with("TXN"));
        assert_eq!(a.len(), 3 + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn data_de_termino_soma_meses_no_calendario() {
        use chrono::NaiveDate;
        let start = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let end = start.checked_add_months(Months::new(6)).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 10).unwrap());
        let end12 = start.checked_add_months(Months::new(12)).unwrap();
        assert_eq!(end12, NaiveDate::from_ymd_opt(2027, 2, 10).unwrap());
    }
}
