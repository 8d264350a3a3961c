// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{customer::Customer, dealer::Dealer, subscription::Subscription};

// 1. Resumo do Dealer (os cards do topo)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerSummary {
    pub total_registrations: usize,
    pub total_subscriptions: usize,
    // Percentual arredondado: assinaturas / cadastros
    pub conversion_rate: u32,
    // 10% do preço de cada assinatura SUCCESS
    #[schema(value_type = f64)]
    pub commission_earned: Decimal,
    // Projeção sobre cadastros ainda não convertidos
    #[schema(value_type = f64)]
    pub amount_in_queue: Decimal,
}

// 2. Resumo consolidado do Admin
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub total_dealers: usize,
    pub total_registrations: usize,
    pub total_subscriptions: usize,
    pub conversion_rate: u32,
}

// Filtros aplicados em memória sobre o conjunto já buscado
// (espelha o comportamento de filtro por tecla do portal)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFilter {
    // Intervalo sobre o order_timestamp (datas no formato YYYY-MM-DD)
    pub from_date: Option<chrono::NaiveDate>,
    pub to_date: Option<chrono::NaiveDate>,
    pub plan_id: Option<String>,
    pub dealer_code: Option<String>,
    // Busca livre por nome / código / celular
    pub q: Option<String>,
    // Página 1-based; tamanho fixo de página
    pub page: Option<usize>,
}

// Páginas concretas (tamanho fixo, espelhando a paginação do portal)

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPage {
    pub items: Vec<Subscription>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    pub items: Vec<Customer>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerPage {
    pub items: Vec<Dealer>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

// Resultado agregado do import CSV de dealers (nunca linha a linha)
#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerImportReport {
    pub updated: usize,
    pub inserted: usize,
    pub skipped: usize,
}
