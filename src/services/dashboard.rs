// src/services/dashboard.rs
//
// Lado de leitura dos painéis do dealer e do admin. Os endpoints buscam
// o conjunto inteiro do escopo e aplicam filtro e paginação em memória,
// espelhando o comportamento do portal (filtro por tecla sobre dados já
// carregados, sem nova ida ao banco).

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{CustomerRepository, DealerRepository, SubscriptionRepository},
    models::{
        catalog,
        customer::Customer,
        dashboard::{AdminSummary, CustomerPage, DealerPage, DealerSummary, ListFilter, SubscriptionPage},
        dealer::Dealer,
        subscription::{PaymentStatus, Subscription},
    },
};

// Tamanho fixo de página do portal
pub const PAGE_SIZE: usize = 10;

// Comissão do dealer: 10% do preço do plano
fn commission_rate() -> Decimal {
    Decimal::new(10, 2)
}

// --- MÉTRICAS PURAS ---

// Percentual arredondado; zero cadastros nunca divide por zero
pub fn conversion_rate(total_customers: usize, total_subscriptions: usize) -> u32 {
    if total_customers == 0 {
        return 0;
    }
    ((total_subscriptions as f64 / total_customers as f64) * 100.0).round() as u32
}

// Comissão realizada: 10% de cada assinatura SUCCESS
pub fn commission_earned(subscriptions: &[Subscription]) -> Decimal {
    let total: Decimal = subscriptions
        .iter()
        .filter(|s| s.payment_status == PaymentStatus::Success)
        .map(|s| s.plan_price)
        .sum();
    (total * commission_rate()).round_dp(2)
}

// "Valor na fila": projeção de comissão sobre cadastros ainda não
// convertidos, valorados pela média histórica dos planos pagos. Sem
// histórico, vale o preço do plano recomendado do catálogo.
pub fn amount_in_queue(customers: &[Customer], subscriptions: &[Subscription]) -> Decimal {
    let paid: Vec<&Subscription> = subscriptions
        .iter()
        .filter(|s| s.payment_status == PaymentStatus::Success)
        .collect();

    let converted: HashSet<&str> = paid.iter().map(|s| s.customer_code.as_str()).collect();
    let unconverted = customers
        .iter()
        .filter(|c| !converted.contains(c.customer_code.as_str()))
        .count();

    let avg_price = if paid.is_empty() {
        catalog::fallback_plan_price()
    } else {
        let total: Decimal = paid.iter().map(|s| s.plan_price).sum();
        total / Decimal::from(paid.len() as u64)
    };

    (Decimal::from(unconverted as u64) * avg_price * commission_rate()).round_dp(2)
}

// --- FILTROS EM MEMÓRIA ---

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn filter_subscriptions(subscriptions: Vec<Subscription>, filter: &ListFilter) -> Vec<Subscription> {
    subscriptions
        .into_iter()
        .filter(|s| {
            let order_date = s.order_timestamp.date_naive();
            if let Some(from) = filter.from_date {
                if order_date < from {
                    return false;
                }
            }
            if let Some(to) = filter.to_date {
                if order_date > to {
                    return false;
                }
            }
            if let Some(plan_id) = &filter.plan_id {
                if &s.plan_id != plan_id {
                    return false;
                }
            }
            if let Some(dealer_code) = &filter.dealer_code {
                if &s.dealer_code != dealer_code {
                    return false;
                }
            }
            if let Some(q) = filter.q.as_deref().filter(|q| !q.is_empty()) {
                let mobile = s.customer_mobile.as_deref().unwrap_or("");
                return contains_ci(&s.customer_name, q)
                    || s.customer_code.contains(q)
                    || mobile.contains(q);
            }
            true
        })
        .collect()
}

pub fn filter_customers(customers: Vec<Customer>, filter: &ListFilter) -> Vec<Customer> {
    customers
        .into_iter()
        .filter(|c| {
            if let Some(from) = filter.from_date {
                if c.registration_date < from {
                    return false;
                }
            }
            if let Some(to) = filter.to_date {
                if c.registration_date > to {
                    return false;
                }
            }
            if let Some(dealer_code) = &filter.dealer_code {
                if &c.dealer_code != dealer_code {
                    return false;
                }
            }
            if let Some(q) = filter.q.as_deref().filter(|q| !q.is_empty()) {
                return contains_ci(&c.customer_name, q)
                    || c.customer_code.contains(q)
                    || c.mobile_number.contains(q);
            }
            true
        })
        .collect()
}

// Paginação 1-based com tamanho fixo; página fora do intervalo volta vazia
pub fn paginate<T>(items: Vec<T>, page: Option<usize>) -> (Vec<T>, usize, usize) {
    let page = page.unwrap_or(1).max(1);
    let total = items.len();
    let slice = items
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();
    (slice, page, total)
}

// --- O SERVIÇO ---

#[derive(Clone)]
pub struct DashboardService {
    customers: CustomerRepository,
    dealers: DealerRepository,
    subscriptions: SubscriptionRepository,
}

impl DashboardService {
    pub fn new(
        customers: CustomerRepository,
        dealers: DealerRepository,
        subscriptions: SubscriptionRepository,
    ) -> Self {
        Self { customers, dealers, subscriptions }
    }

    pub async fn dealer_summary(&self, dealer_code: &str) -> Result<DealerSummary, AppError> {
        let customers = self.customers.list_by_dealer(dealer_code).await?;
        let subscriptions = self.subscriptions.list_by_dealer(dealer_code).await?;

        Ok(DealerSummary {
            total_registrations: customers.len(),
            total_subscriptions: subscriptions.len(),
            conversion_rate: conversion_rate(customers.len(), subscriptions.len()),
            commission_earned: commission_earned(&subscriptions),
            amount_in_queue: amount_in_queue(&customers, &subscriptions),
        })
    }

    pub async fn dealer_subscriptions(
        &self,
        dealer_code: &str,
        filter: &ListFilter,
    ) -> Result<SubscriptionPage, AppError> {
        let all = self.subscriptions.list_by_dealer(dealer_code).await?;
        let filtered = filter_subscriptions(all, filter);
        let (items, page, total) = paginate(filtered, filter.page);
        Ok(SubscriptionPage { items, page, page_size: PAGE_SIZE, total })
    }

    pub async fn dealer_customers(
        &self,
        dealer_code: &str,
        filter: &ListFilter,
    ) -> Result<CustomerPage, AppError> {
        let all = self.customers.list_by_dealer(dealer_code).await?;
        let filtered = filter_customers(all, filter);
        let (items, page, total) = paginate(filtered, filter.page);
        Ok(CustomerPage { items, page, page_size: PAGE_SIZE, total })
    }

    pub async fn admin_summary(&self) -> Result<AdminSummary, AppError> {
        let dealers = self.dealers.list_all().await?;
        let customers = self.customers.list_all().await?;
        let subscriptions = self.subscriptions.list_all().await?;

        Ok(AdminSummary {
            total_dealers: dealers.len(),
            total_registrations: customers.len(),
            total_subscriptions: subscriptions.len(),
            conversion_rate: conversion_rate(customers.len(), subscriptions.len()),
        })
    }

    pub async fn admin_subscriptions(&self, filter: &ListFilter) -> Result<SubscriptionPage, AppError> {
        let all = self.subscriptions.list_all().await?;
        let filtered = filter_subscriptions(all, filter);
        let (items, page, total) = paginate(filtered, filter.page);
        Ok(SubscriptionPage { items, page, page_size: PAGE_SIZE, total })
    }

    pub async fn admin_customers(&self, filter: &ListFilter) -> Result<CustomerPage, AppError> {
        let all = self.customers.list_all().await?;
        let filtered = filter_customers(all, filter);
        let (items, page, total) = paginate(filtered, filter.page);
        Ok(CustomerPage { items, page, page_size: PAGE_SIZE, total })
    }

    pub async fn admin_dealers(&self, filter: &ListFilter) -> Result<DealerPage, AppError> {
        let all = self.dealers.list_all().await?;
        let filtered = filter_dealers(all, filter);
        let (items, page, total) = paginate(filtered, filter.page);
        Ok(DealerPage { items, page, page_size: PAGE_SIZE, total })
    }
}

pub fn filter_dealers(dealers: Vec<Dealer>, filter: &ListFilter) -> Vec<Dealer> {
    dealers
        .into_iter()
        .filter(|d| {
            if let Some(dealer_code) = &filter.dealer_code {
                if &d.dealer_code != dealer_code {
                    return false;
                }
            }
            if let Some(q) = filter.q.as_deref().filter(|q| !q.is_empty()) {
                return contains_ci(&d.dealer_name, q)
                    || d.dealer_code.contains(q)
                    || d.dealer_mobile_number.contains(q);
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::RegistrationStatus;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn customer(code: &str, dealer: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            customer_code: code.to_string(),
            customer_name: format!("Cliente {}", code),
            mobile_number: "9876543210".to_string(),
            email: None,
            state: None,
            city: "Pune".to_string(),
            vehicle_number: None,
            vehicle_make_model: None,
            tyre_details: None,
            count_of_tyres: 1,
            invoice_number: None,
            registration_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            dealer_code: dealer.to_string(),
            registration_status: RegistrationStatus::ProfileComplete,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn subscription(customer_code: &str, price: i64, status: PaymentStatus, day: u32) -> Subscription {
        let ts = Utc.with_ymd_and_hms(2026, 2, day, 12, 0, 0).unwrap();
        Subscription {
            id: Uuid::new_v4(),
            order_id: format!("ORD{}", day),
            customer_code: customer_code.to_string(),
            customer_name: format!("Cliente {}", customer_code),
            customer_mobile: Some("9876543210".to_string()),
            dealer_code: "DLR12345".to_string(),
            plan_id: "PLAN_GOLD".to_string(),
            plan_name: "Gold Assistance Plan".to_string(),
            plan_price: Decimal::from(price),
            payment_status: status,
            payment_transaction_id: None,
            subscription_start_date: ts.date_naive(),
            subscription_end_date: ts.date_naive(),
            order_timestamp: ts,
            created_at: ts,
        }
    }

    #[test]
    fn conversao_sem_cadastros_e_zero() {
        assert_eq!(conversion_rate(0, 0), 0);
        assert_eq!(conversion_rate(0, 5), 0);
    }

    #[test]
    fn conversao_arredonda_o_percentual() {
        assert_eq!(conversion_rate(3, 2), 67);
        assert_eq!(conversion_rate(4, 1), 25);
        assert_eq!(conversion_rate(2, 2), 100);
    }

    #[test]
    fn comissao_considera_apenas_success() {
        let subs = vec![
            subscription("CUS1", 123, PaymentStatus::Success, 1),
            subscription("CUS2", 93, PaymentStatus::Success, 2),
            subscription("CUS3", 152, PaymentStatus::Failed, 3),
        ];
        // 10% de (123 + 93)
        assert_eq!(commission_earned(&subs), Decimal::new(2160, 2));
    }

    #[test]
    fn fila_usa_media_historica_dos_planos_pagos() {
        let customers = vec![
            customer("CUS1", "DLR12345"),
            customer("CUS2", "DLR12345"),
            customer("CUS3", "DLR12345"),
        ];
        // CUS1 convertido a 100; dois na fila valorados pela média (100)
        let subs = vec![subscription("CUS1", 100, PaymentStatus::Success, 1)];
        assert_eq!(amount_in_queue(&customers, &subs), Decimal::from(20));
    }

    #[test]
    fn fila_sem_historico_usa_o_preco_de_fallback() {
        let customers = vec![customer("CUS1", "DLR12345")];
        // Sem assinatura paga: 1 cliente * 123 (Gold) * 10%
        assert_eq!(amount_in_queue(&customers, &[]), Decimal::new(1230, 2));
    }

    #[test]
    fn filtro_por_plano_e_texto_livre() {
        let mut subs = vec![
            subscription("CUS1", 123, PaymentStatus::Success, 1),
            subscription("CUS2", 93, PaymentStatus::Success, 2),
        ];
        subs[1].plan_id = "PLAN_SILVER".to_string();

        let by_plan = filter_subscriptions(
            subs.clone(),
            &ListFilter { plan_id: Some("PLAN_SILVER".to_string()), ..Default::default() },
        );
        assert_eq!(by_plan.len(), 1);
        assert_eq!(by_plan[0].customer_code, "CUS2");

        let by_text = filter_subscriptions(
            subs,
            &ListFilter { q: Some("cliente cus1".to_string()), ..Default::default() },
        );
        assert_eq!(by_text.len(), 1);
    }

    #[test]
    fn filtro_por_intervalo_de_datas() {
        let subs = vec![
            subscription("CUS1", 123, PaymentStatus::Success, 5),
            subscription("CUS2", 93, PaymentStatus::Success, 20),
        ];
        let filter = ListFilter {
            from_date: NaiveDate::from_ymd_opt(2026, 2, 10),
            to_date: NaiveDate::from_ymd_opt(2026, 2, 28),
            ..Default::default()
        };
        let filtered = filter_subscriptions(subs, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].customer_code, "CUS2");
    }

    #[test]
    fn paginacao_tem_tamanho_fixo() {
        let items: Vec<u32> = (1..=25).collect();
        let (page1, page, total) = paginate(items.clone(), Some(1));
        assert_eq!((page, total), (1, 25));
        assert_eq!(page1, (1..=10).collect::<Vec<u32>>());

        let (page3, _, _) = paginate(items.clone(), Some(3));
        assert_eq!(page3, (21..=25).collect::<Vec<u32>>());

        let (page9, _, _) = paginate(items, Some(9));
        assert!(page9.is_empty());
    }
}
