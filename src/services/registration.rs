// src/services/registration.rs
//
// O fluxo de cadastro do cliente em etapas:
//
//   AwaitingMobile -> AwaitingOtp -> PersonalDetails -> VehicleDetails
//                  -> TyreDetails -> Complete
//
// mais o estado absorvente AlreadyCompleted, alcançável apenas na
// verificação do OTP. Voltar de etapa é assunto da UI e nunca desfaz
// dados já persistidos: cada avanço grava exatamente um UPDATE, e uma
// linha parcial é justamente o que o caminho de retomada detecta.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    db::{CustomerRepository, DealerRepository, ReferralRepository, SubscriptionRepository},
    models::{
        customer::{Customer, RegistrationStatus},
        subscription::{PaymentStatus, Subscription},
    },
};

// Origem padrão registrada no log de indicações
const REFERRAL_SOURCE_QR: &str = "QR_SCAN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    AwaitingMobile,
    AwaitingOtp,
    PersonalDetails,
    VehicleDetails,
    TyreDetails,
    Complete,
    AlreadyCompleted,
}

// Resultado da classificação das linhas persistidas de um celular
#[derive(Debug)]
pub enum VerificationOutcome {
    // Nenhuma linha: cadastro novo
    NewRegistration,
    // Existe assinatura SUCCESS ligada a algum código do celular
    AlreadyCompleted(Customer),
    // Linhas parciais sem assinatura paga: retomar a mais completa
    Resume(Customer),
}

// Contexto entregue ao checkout quando o fluxo termina
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHandoff {
    pub customer_code: String,
    pub dealer_code: String,
    pub mobile: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub step: RegistrationStep,
    pub otp_sent: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub step: RegistrationStep,
    pub resumed: bool,
    pub customer: Customer,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub step: RegistrationStep,
    pub customer: Customer,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResponse {
    pub step: RegistrationStep,
    pub customer: Customer,
    pub checkout: CheckoutHandoff,
}

// --- REGRAS PURAS (testáveis sem banco) ---

// Contrato de entrada do AwaitingMobile -> AwaitingOtp
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.chars().all(|c| c.is_ascii_digit())
}

// Quantidade de pneus: texto livre do formulário, 1 quando não parseia
pub fn parse_tyre_count(raw: Option<&str>) -> i32 {
    raw.and_then(|s| s.trim().parse::<i32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

// A linha "mais completa" de um celular: maior status ganha; empate vai
// para a mais recente (a lista chega ordenada da mais nova para a mais
// antiga).
pub fn select_most_complete(customers: &[Customer]) -> Option<&Customer> {
    customers
        .iter()
        .enumerate()
        .max_by_key(|(idx, c)| (c.registration_status, std::cmp::Reverse(*idx)))
        .map(|(_, c)| c)
}

// Classifica a verificação do OTP a partir do que já está persistido
pub fn classify_verification(
    customers: &[Customer],
    subscriptions: &[Subscription],
) -> VerificationOutcome {
    if customers.is_empty() {
        return VerificationOutcome::NewRegistration;
    }

    let has_paid = subscriptions
        .iter()
        .any(|s| s.payment_status == PaymentStatus::Success);

    // O unwrap é seguro: a lista não está vazia aqui
    let best = select_most_complete(customers).unwrap().clone();

    if has_paid {
        VerificationOutcome::AlreadyCompleted(best)
    } else {
        VerificationOutcome::Resume(best)
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(())
}

// --- O SERVIÇO ---

#[derive(Clone)]
pub struct RegistrationService {
    customers: CustomerRepository,
    dealers: DealerRepository,
    subscriptions: SubscriptionRepository,
    referrals: ReferralRepository,
    test_otp: String,
}

impl RegistrationService {
    pub fn new(
        customers: CustomerRepository,
        dealers: DealerRepository,
        subscriptions: SubscriptionRepository,
        referrals: ReferralRepository,
        test_otp: String,
    ) -> Self {
        Self { customers, dealers, subscriptions, referrals, test_otp }
    }

    // AwaitingMobile -> AwaitingOtp. Celular fora do formato rejeita a
    // transição e nada muda.
    pub async fn start(&self, mobile: &str) -> Result<StartResponse, AppError> {
        if !is_valid_mobile(mobile) {
            return Err(AppError::InvalidMobile);
        }

        // Envio real de SMS fica fora deste serviço: o OTP aceito é o
        // valor de teste configurado.
        tracing::info!("OTP de cadastro solicitado para {}", mobile);

        Ok(StartResponse {
            step: RegistrationStep::AwaitingOtp,
            otp_sent: true,
            message: format!("OTP enviado (teste: {})", self.test_otp),
        })
    }

    // AwaitingOtp -> PersonalDetails | AlreadyCompleted
    pub async fn verify_otp(
        &self,
        mobile: &str,
        otp: &str,
        dealer_code: &str,
    ) -> Result<VerifyOtpResponse, AppError> {
        if !is_valid_mobile(mobile) {
            return Err(AppError::InvalidMobile);
        }
        // OTP errado: estado inalterado, tentativas ilimitadas
        if otp != self.test_otp {
            return Err(AppError::InvalidOtp);
        }

        let existing = self.customers.find_by_mobile(mobile).await?;
        let codes: Vec<String> = existing.iter().map(|c| c.customer_code.clone()).collect();
        let subs = self.subscriptions.list_by_customer_codes(&codes).await?;

        match classify_verification(&existing, &subs) {
            VerificationOutcome::NewRegistration => {
                // O dealer da URL precisa existir antes de atribuirmos
                // o cadastro a ele
                self.dealers
                    .find_by_code(dealer_code)
                    .await?
                    .ok_or(AppError::DealerNotFound)?;

                let code = self.customers.next_customer_code().await?;
                let customer = self.customers.insert_started(&code, mobile, dealer_code).await?;
                self.referrals
                    .insert(&customer.customer_code, dealer_code, REFERRAL_SOURCE_QR)
                    .await?;

                tracing::info!("Novo cadastro iniciado: {} (dealer {})", code, dealer_code);

                Ok(VerifyOtpResponse {
                    step: RegistrationStep::PersonalDetails,
                    resumed: false,
                    customer,
                })
            }
            VerificationOutcome::AlreadyCompleted(customer) => Ok(VerifyOtpResponse {
                step: RegistrationStep::AlreadyCompleted,
                resumed: false,
                customer,
            }),
            VerificationOutcome::Resume(customer) => Ok(VerifyOtpResponse {
                step: RegistrationStep::PersonalDetails,
                resumed: true,
                customer,
            }),
        }
    }

    // PersonalDetails -> VehicleDetails
    pub async fn submit_personal_details(
        &self,
        customer_code: &str,
        name: &str,
        state: &str,
        city: &str,
        email: Option<&str>,
    ) -> Result<StepResponse, AppError> {
        // Validação antes de qualquer chamada de persistência
        require_non_empty(name, "name")?;
        require_non_empty(state, "state")?;
        require_non_empty(city, "city")?;

        let customer = self
            .customers
            .update_personal_details(customer_code, name.trim(), state.trim(), city.trim(), email)
            .await?;

        Ok(StepResponse { step: RegistrationStep::VehicleDetails, customer })
    }

    // VehicleDetails -> TyreDetails
    pub async fn submit_vehicle_details(
        &self,
        customer_code: &str,
        vehicle_number: &str,
        vehicle_make_model: Option<&str>,
    ) -> Result<StepResponse, AppError> {
        require_non_empty(vehicle_number, "vehicle_number")?;

        let customer = self
            .customers
            .update_vehicle_details(customer_code, vehicle_number.trim(), vehicle_make_model)
            .await?;

        Ok(StepResponse { step: RegistrationStep::TyreDetails, customer })
    }

    // TyreDetails -> Complete. Nenhum campo obrigatório; devolve o
    // contexto que o checkout precisa carregar.
    pub async fn submit_tyre_details(
        &self,
        customer_code: &str,
        tyre_details: Option<&str>,
        count_of_tyres: Option<&str>,
        invoice_number: Option<&str>,
    ) -> Result<CompleteResponse, AppError> {
        let count = parse_tyre_count(count_of_tyres);

        let customer = self
            .customers
            .update_tyre_details(customer_code, tyre_details, count, invoice_number)
            .await?;

        let checkout = CheckoutHandoff {
            customer_code: customer.customer_code.clone(),
            dealer_code: customer.dealer_code.clone(),
            mobile: customer.mobile_number.clone(),
            name: customer.customer_name.clone(),
        };

        Ok(CompleteResponse { step: RegistrationStep::Complete, customer, checkout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn customer(code: &str, status: RegistrationStatus, age_days: i64) -> Customer {
        let created = Utc::now() - Duration::days(age_days);
        Customer {
            id: Uuid::new_v4(),
            customer_code: code.to_string(),
            customer_name: String::new(),
            mobile_number: "9876543210".to_string(),
            email: None,
            state: None,
            city: String::new(),
            vehicle_number: None,
            vehicle_make_model: None,
            tyre_details: None,
            count_of_tyres: 1,
            invoice_number: None,
            registration_date: created.date_naive(),
            dealer_code: "DLR12345".to_string(),
            registration_status: status,
            created_at: created,
            updated_at: created,
        }
    }

    fn paid_subscription(customer_code: &str) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            order_id: "ORD45001".to_string(),
            customer_code: customer_code.to_string(),
            customer_name: "Ravi Kumar".to_string(),
            customer_mobile: Some("9876543210".to_string()),
            dealer_code: "DLR12345".to_string(),
            plan_id: "PLAN_GOLD".to_string(),
            plan_name: "Gold Assistance Plan".to_string(),
            plan_price: Decimal::from(123),
            payment_status: PaymentStatus::Success,
            payment_transaction_id: Some("TXN1".to_string()),
            subscription_start_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            subscription_end_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            order_timestamp: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn celular_valido_tem_exatamente_dez_digitos() {
        assert!(is_valid_mobile("9876543210"));
        assert!(!is_valid_mobile("987654321"));
        assert!(!is_valid_mobile("98765432101"));
        assert!(!is_valid_mobile("98765abc10"));
        assert!(!is_valid_mobile(""));
        assert!(!is_valid_mobile("98765 4321"));
    }

    #[test]
    fn quantidade_de_pneus_cai_para_um_quando_nao_parseia() {
        assert_eq!(parse_tyre_count(Some("4")), 4);
        assert_eq!(parse_tyre_count(Some(" 6 ")), 6);
        assert_eq!(parse_tyre_count(Some("quatro")), 1);
        assert_eq!(parse_tyre_count(Some("")), 1);
        assert_eq!(parse_tyre_count(Some("0")), 1);
        assert_eq!(parse_tyre_count(Some("-2")), 1);
        assert_eq!(parse_tyre_count(None), 1);
    }

    #[test]
    fn sem_linhas_persistidas_e_cadastro_novo() {
        let outcome = classify_verification(&[], &[]);
        assert!(matches!(outcome, VerificationOutcome::NewRegistration));
    }

    #[test]
    fn assinatura_paga_em_qualquer_codigo_encerra_o_fluxo() {
        // Duas linhas do mesmo celular; a paga é a mais antiga
        let rows = vec![
            customer("CUS2", RegistrationStatus::Started, 1),
            customer("CUS1", RegistrationStatus::Subscribed, 30),
        ];
        let subs = vec![paid_subscription("CUS1")];

        match classify_verification(&rows, &subs) {
            VerificationOutcome::AlreadyCompleted(best) => {
                // A linha mais completa é a que volta para exibição
                assert_eq!(best.customer_code, "CUS1");
            }
            other => panic!("esperava AlreadyCompleted, veio {:?}", other),
        }
    }

    #[test]
    fn linhas_parciais_sem_pagamento_retomam_a_mais_completa() {
        let rows = vec![
            customer("CUS3", RegistrationStatus::Started, 1),
            customer("CUS2", RegistrationStatus::VehicleComplete, 10),
            customer("CUS1", RegistrationStatus::ProfileComplete, 20),
        ];

        match classify_verification(&rows, &[]) {
            VerificationOutcome::Resume(best) => {
                assert_eq!(best.customer_code, "CUS2");
            }
            other => panic!("esperava Resume, veio {:?}", other),
        }
    }

    #[test]
    fn empate_de_status_retoma_a_linha_mais_recente() {
        let rows = vec![
            customer("CUS_NOVA", RegistrationStatus::Started, 1),
            customer("CUS_VELHA", RegistrationStatus::Started, 15),
        ];

        match classify_verification(&rows, &[]) {
            VerificationOutcome::Resume(best) => {
                assert_eq!(best.customer_code, "CUS_NOVA");
            }
            other => panic!("esperava Resume, veio {:?}", other),
        }
    }

    #[test]
    fn campos_obrigatorios_bloqueiam_a_transicao() {
        assert!(require_non_empty("Ravi", "name").is_ok());
        assert!(matches!(
            require_non_empty("", "name"),
            Err(AppError::MissingField("name"))
        ));
        assert!(matches!(
            require_non_empty("   ", "city"),
            Err(AppError::MissingField("city"))
        ));
    }
}
