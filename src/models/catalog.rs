// src/models/catalog.rs
//
// Catálogo estático dos planos de assinatura. Os valores são fixos no
// código: o catálogo muda por release, não por operação.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanBenefit {
    pub name: String,
    pub included: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[schema(example = "PLAN_GOLD")]
    pub id: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[schema(value_type = f64)]
    pub price_before_gst: Decimal,

    // Rótulo de vigência (ex: "2 Years"). O checkout deriva a data de
    // término a partir deste texto.
    pub duration: String,
    pub validity: String,
    pub total_services: i32,
    pub features: Vec<String>,
    pub benefits: Vec<PlanBenefit>,
    pub recommended: bool,
}

fn benefit(name: &str, included: bool) -> PlanBenefit {
    PlanBenefit { name: name.to_string(), included }
}

// Os 3 níveis: Silver, Gold (recomendado) e Platinum
pub fn plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "PLAN_SILVER".to_string(),
            name: "Silver Assistance Plan".to_string(),
            price: Decimal::from(93),
            price_before_gst: Decimal::from(49),
            duration: "2 Years".to_string(),
            validity: "2 Years".to_string(),
            total_services: 3,
            features: vec![
                "24/7 Roadside Assistance".to_string(),
                "3 Services in 2 Years".to_string(),
                "Towing Service".to_string(),
                "Ambulance Service".to_string(),
                "Legal Assistance".to_string(),
            ],
            benefits: vec![
                benefit("Towing", true),
                benefit("Hotel", false),
                benefit("Cab Facility", false),
                benefit("Ambulance", true),
                benefit("Legal Assistance", true),
            ],
            recommended: false,
        },
        Plan {
            id: "PLAN_GOLD".to_string(),
            name: "Gold Assistance Plan".to_string(),
            price: Decimal::from(123),
            price_before_gst: Decimal::from(74),
            duration: "2 Years".to_string(),
            validity: "2 Years".to_string(),
            total_services: 3,
            features: vec![
                "24/7 Roadside Assistance".to_string(),
                "3 Services in 2 Years".to_string(),
                "Towing Service".to_string(),
                "Hotel Accommodation".to_string(),
                "Ambulance Service".to_string(),
                "Legal Assistance".to_string(),
            ],
            benefits: vec![
                benefit("Towing", true),
                benefit("Hotel", false),
                benefit("Cab Facility", true),
                benefit("Ambulance", true),
                benefit("Legal Assistance", true),
            ],
            recommended: true,
        },
        Plan {
            id: "PLAN_PLATINUM".to_string(),
            name: "Platinum Assistance Plan".to_string(),
            price: Decimal::from(152),
            price_before_gst: Decimal::from(99),
            duration: "2 Years".to_string(),
            validity: "2 Years".to_string(),
            total_services: 3,
            features: vec![
                "24/7 Roadside Assistance".to_string(),
                "3 Services in 2 Years".to_string(),
                "Towing Service".to_string(),
                "Hotel Accommodation".to_string(),
                "Cab Facility".to_string(),
                "Ambulance Service".to_string(),
                "Legal Assistance".to_string(),
            ],
            benefits: vec![
                benefit("Towing", true),
                benefit("Hotel", true),
                benefit("Cab Facility", true),
                benefit("Ambulance", true),
                benefit("Legal Assistance", true),
            ],
            recommended: false,
        },
    ]
}

pub fn find_plan(plan_id: &str) -> Option<Plan> {
    plans().into_iter().find(|p| p.id == plan_id)
}

// Preço usado como fallback na projeção de comissão quando ainda não
// existe nenhuma assinatura para tirar a média (o plano recomendado).
pub fn fallback_plan_price() -> Decimal {
    plans()
        .into_iter()
        .find(|p| p.recommended)
        .map(|p| p.price)
        .unwrap_or_else(|| Decimal::from(123))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogo_tem_tres_niveis() {
        let all = plans();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|p| p.id == "PLAN_SILVER"));
        assert!(all.iter().any(|p| p.id == "PLAN_GOLD"));
        assert!(all.iter().any(|p| p.id == "PLAN_PLATINUM"));
    }

    #[test]
    fn busca_por_id() {
        assert_eq!(find_plan("PLAN_GOLD").unwrap().price, Decimal::from(123));
        assert!(find_plan("PLAN_DIAMOND").is_none());
    }
}
