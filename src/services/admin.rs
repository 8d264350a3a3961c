// src/services/admin.rs
//
// Rotinas do painel admin: export CSV das assinaturas (join em memória
// contra dealers e clientes por código) e o import CSV de status de
// dealers em massa.

use std::collections::HashMap;

use crate::{
    common::{csv, error::AppError},
    db::{CustomerRepository, DealerRepository, SubscriptionRepository},
    models::{
        customer::Customer,
        dashboard::{DealerImportReport, ListFilter},
        dealer::{Dealer, DealerStatus},
        subscription::Subscription,
    },
    services::dashboard,
};

// --- EXPORT ---

const EXPORT_HEADER: [&str; 14] = [
    "Order ID",
    "Order Date",
    "Customer Code",
    "Customer Name",
    "Customer Mobile",
    "Customer City",
    "Dealer Code",
    "Dealer Name",
    "Plan ID",
    "Plan Name",
    "Plan Price",
    "Payment Status",
    "Start Date",
    "End Date",
];

// Serializa o conjunto filtrado. Tudo entre aspas; aspas internas
// duplicadas (regra do csv::escape_field).
pub fn export_subscriptions(
    subscriptions: &[Subscription],
    dealers: &HashMap<String, Dealer>,
    customers: &HashMap<String, Customer>,
) -> String {
    let mut out = String::new();
    out.push_str(&csv::write_row(
        &EXPORT_HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
    ));
    out.push('\n');

    for sub in subscriptions {
        let dealer_name = dealers
            .get(&sub.dealer_code)
            .map(|d| d.dealer_name.clone())
            .unwrap_or_default();
        let city = customers
            .get(&sub.customer_code)
            .map(|c| c.city.clone())
            .unwrap_or_default();

        let row = vec![
            sub.order_id.clone(),
            sub.order_timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            sub.customer_code.clone(),
            sub.customer_name.clone(),
            sub.customer_mobile.clone().unwrap_or_default(),
            city,
            sub.dealer_code.clone(),
            dealer_name,
            sub.plan_id.clone(),
            sub.plan_name.clone(),
            sub.plan_price.to_string(),
            format!("{:?}", sub.payment_status).to_uppercase(),
            sub.subscription_start_date.to_string(),
            sub.subscription_end_date.to_string(),
        ];
        out.push_str(&csv::write_row(&row));
        out.push('\n');
    }

    out
}

// --- IMPORT ---

// Linha reconhecida do arquivo de import
#[derive(Debug, PartialEq)]
pub struct ImportRow {
    pub dealer_code: String,
    pub status: DealerStatus,
}

// Header casado por substring, sem diferenciar caixa: a primeira célula
// contém "dealer" e "code", a segunda contém "status".
pub fn is_import_header(cells: &[String]) -> bool {
    if cells.len() < 2 {
        return false;
    }
    let first = cells[0].to_lowercase();
    let second = cells[1].to_lowercase();
    first.contains("dealer") && first.contains("code") && second.contains("status")
}

// Transforma o arquivo em linhas aceitas + contagem de descartes.
// Linha sem código, sem coluna de status ou com status desconhecido é
// contada como pulada; o relatório é sempre agregado, nunca por linha.
pub fn parse_import(input: &str) -> (Vec<ImportRow>, usize) {
    let mut rows = csv::parse_rows(input);
    if rows.first().map(|r| is_import_header(r)).unwrap_or(false) {
        rows.remove(0);
    }

    let mut accepted = Vec::new();
    let mut skipped = 0usize;

    for cells in rows {
        let code = cells.first().map(|c| c.trim()).unwrap_or_default();
        let status = cells.get(1).and_then(|s| s.parse::<DealerStatus>().ok());

        match (code.is_empty(), status) {
            (false, Some(status)) => accepted.push(ImportRow {
                dealer_code: code.to_string(),
                status,
            }),
            _ => skipped += 1,
        }
    }

    (accepted, skipped)
}

// --- O SERVIÇO ---

#[derive(Clone)]
pub struct AdminService {
    dealers: DealerRepository,
    customers: CustomerRepository,
    subscriptions: SubscriptionRepository,
}

impl AdminService {
    pub fn new(
        dealers: DealerRepository,
        customers: CustomerRepository,
        subscriptions: SubscriptionRepository,
    ) -> Self {
        Self { dealers, customers, subscriptions }
    }

    // Export do conjunto filtrado (mesmos filtros do painel)
    pub async fn export_subscriptions_csv(&self, filter: &ListFilter) -> Result<String, AppError> {
        let subscriptions = dashboard::filter_subscriptions(self.subscriptions.list_all().await?, filter);

        let dealers: HashMap<String, Dealer> = self
            .dealers
            .list_all()
            .await?
            .into_iter()
            .map(|d| (d.dealer_code.clone(), d))
            .collect();
        let customers: HashMap<String, Customer> = self
            .customers
            .list_all()
            .await?
            .into_iter()
            .map(|c| (c.customer_code.clone(), c))
            .collect();

        Ok(export_subscriptions(&subscriptions, &dealers, &customers))
    }

    // Import em massa: código conhecido só troca o status; desconhecido
    // entra como dealer placeholder com o status informado.
    pub async fn import_dealers_csv(&self, body: &str) -> Result<DealerImportReport, AppError> {
        let (rows, skipped) = parse_import(body);
        let mut report = DealerImportReport { skipped, ..Default::default() };

        for row in rows {
            match self.dealers.update_status(&row.dealer_code, row.status).await? {
                Some(_) => report.updated += 1,
                None => {
                    self.dealers.insert_placeholder(&row.dealer_code, row.status).await?;
                    report.inserted += 1;
                }
            }
        }

        tracing::info!(
            "Import de dealers: {} atualizados, {} inseridos, {} pulados",
            report.updated,
            report.inserted,
            report.skipped
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_casado_por_substring_sem_caixa() {
        let header = vec!["Dealer Code".to_string(), "Status".to_string()];
        assert!(is_import_header(&header));

        let header = vec!["DEALER_CODE".to_string(), "dealer status".to_string()];
        assert!(is_import_header(&header));

        let not_header = vec!["DLR12345".to_string(), "ACTIVE".to_string()];
        assert!(!is_import_header(&not_header));
    }

    #[test]
    fn status_desconhecido_conta_como_pulado() {
        let input = "Dealer Code,Status\nDLR1,ACTIVE\nDLR2,PAUSED\nDLR3,inactive\n";
        let (rows, skipped) = parse_import(input);
        assert_eq!(skipped, 1);
        assert_eq!(
            rows,
            vec![
                ImportRow { dealer_code: "DLR1".to_string(), status: DealerStatus::Active },
                ImportRow { dealer_code: "DLR3".to_string(), status: DealerStatus::Inactive },
            ]
        );
    }

    #[test]
    fn linha_sem_codigo_ou_sem_status_e_pulada() {
        let input = ",ACTIVE\nDLR9\nDLR5,INACTIVE\n";
        let (rows, skipped) = parse_import(input);
        assert_eq!(skipped, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dealer_code, "DLR5");
    }

    #[test]
    fn arquivo_sem_header_tambem_e_aceito() {
        let input = "DLR1,ACTIVE\nDLR2,INACTIVE\n";
        let (rows, skipped) = parse_import(input);
        assert_eq!(skipped, 0);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn export_quota_todos_os_campos() {
        use crate::models::subscription::PaymentStatus;
        use chrono::Utc;
        use rust_decimal::Decimal;
        use uuid::Uuid;

        let sub = Subscription {
            id: Uuid::new_v4(),
            order_id: "ORD45001".to_string(),
            customer_code: "CUS10001".to_string(),
            customer_name: "Ravi \"RK\" Kumar".to_string(),
            customer_mobile: Some("9876543210".to_string()),
            dealer_code: "DLR12345".to_string(),
            plan_id: "PLAN_GOLD".to_string(),
            plan_name: "Gold Assistance Plan".to_string(),
            plan_price: Decimal::from(123),
            payment_status: PaymentStatus::Success,
            payment_transaction_id: None,
            subscription_start_date: Utc::now().date_naive(),
            subscription_end_date: Utc::now().date_naive(),
            order_timestamp: Utc::now(),
            created_at: Utc::now(),
        };

        let out = export_subscriptions(&[sub], &HashMap::new(), &HashMap::new());
        let mut lines = out.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();

        assert!(header.starts_with("\"Order ID\",\"Order Date\""));
        // Campo com aspas internas sai com aspas duplicadas
        assert!(row.contains("\"Ravi \"\"RK\"\" Kumar\""));
        // Dealer/cliente ausentes do join viram campo vazio, ainda entre aspas
        assert!(row.contains("\"\""));
        assert!(row.contains("\"SUCCESS\""));
    }
}
