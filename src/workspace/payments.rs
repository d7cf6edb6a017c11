use crate::workspace::error::{Result, WorkspaceError};
use crate::workspace::identity::UserId;
use crate::workspace::pricing::{PriceBreakdown, processing_fee};
use crate::workspace::projects::Role;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    ClientPayment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Professional,
}

impl Plan {
    /// Monthly price in cents.
    pub fn monthly_price(self) -> u64 {
        match self {
            Plan::Professional => 2_900,
        }
    }
}

/// Body of the create-payment-intent request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Cents.
    pub amount: u64,
    pub project_id: Uuid,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
}

impl PaymentIntentRequest {
    /// A client payment of the breakdown's total due.
    pub fn client_payment(project_id: Uuid, breakdown: &PriceBreakdown) -> Result<Self> {
        let amount = breakdown.total_due()?;
        if amount == 0 {
            return Err(WorkspaceError::InvalidAmount);
        }
        Ok(Self {
            amount,
            project_id,
            kind: PaymentKind::ClientPayment,
        })
    }
}

/// Body of the create-subscription request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub user_id: UserId,
    pub plan: Plan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: Uuid,
    pub project_id: Uuid,
    pub amount: u64,
    pub platform_fee: u64,
    pub status: PaymentStatus,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: UserId,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    /// Where the user completes the subscription with the processor.
    pub checkout_reference: String,
}

/// The hosted payment functions.
pub trait PaymentGateway {
    fn create_payment_intent(&mut self, request: &PaymentIntentRequest) -> Result<PaymentIntent>;
    fn create_subscription(&mut self, request: &SubscriptionRequest) -> Result<Subscription>;
    fn payment_status(&self, payment_id: Uuid) -> Result<PaymentStatus>;
    fn active_subscription(&self, user: UserId) -> Result<Option<Subscription>>;
}

#[derive(Debug, Default)]
pub struct InMemoryPaymentGateway {
    payments: Vec<PaymentIntent>,
    subscriptions: Vec<Subscription>,
}

impl InMemoryPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the processor's verdict on a pending payment.
    pub fn settle(&mut self, payment_id: Uuid, status: PaymentStatus) -> Result<()> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or(WorkspaceError::PaymentNotFound(payment_id))?;
        payment.status = status;
        Ok(())
    }

    pub fn activate_subscription(&mut self, subscription_id: Uuid) -> Result<()> {
        let subscription = self
            .subscriptions
            .iter_mut()
            .find(|s| s.id == subscription_id)
            .ok_or_else(|| WorkspaceError::Store(format!("subscription {subscription_id} not found")))?;
        subscription.status = SubscriptionStatus::Active;
        Ok(())
    }
}

impl PaymentGateway for InMemoryPaymentGateway {
    fn create_payment_intent(&mut self, request: &PaymentIntentRequest) -> Result<PaymentIntent> {
        if request.amount == 0 {
            return Err(WorkspaceError::InvalidAmount);
        }
        let platform_fee = processing_fee(request.amount)?;
        let id = Uuid::new_v4();
        let payment = PaymentIntent {
            id,
            project_id: request.project_id,
            amount: request.amount,
            platform_fee,
            status: PaymentStatus::Pending,
            client_secret: Some(format!("pi_{}_secret", id.simple())),
        };
        self.payments.push(payment.clone());
        Ok(payment)
    }

    fn create_subscription(&mut self, request: &SubscriptionRequest) -> Result<Subscription> {
        let start = Utc::now();
        let id = Uuid::new_v4();
        let subscription = Subscription {
            id,
            user_id: request.user_id,
            plan: request.plan,
            status: SubscriptionStatus::Pending,
            current_period_start: start,
            current_period_end: start + Duration::days(SUBSCRIPTION_PERIOD_DAYS),
            checkout_reference: format!("cs_{}", id.simple()),
        };
        self.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    fn payment_status(&self, payment_id: Uuid) -> Result<PaymentStatus> {
        self.payments
            .iter()
            .find(|p| p.id == payment_id)
            .map(|p| p.status)
            .ok_or(WorkspaceError::PaymentNotFound(payment_id))
    }

    fn active_subscription(&self, user: UserId) -> Result<Option<Subscription>> {
        Ok(self
            .subscriptions
            .iter()
            .rev()
            .find(|s| s.user_id == user && s.status == SubscriptionStatus::Active)
            .cloned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTab {
    Subscription,
    ProjectPayment,
}

/// Contractors manage their subscription, clients pay for the project.
pub fn payment_tabs(role: Option<Role>) -> &'static [PaymentTab] {
    match role {
        Some(Role::Contractor) => &[PaymentTab::Subscription],
        Some(Role::Client) => &[PaymentTab::ProjectPayment],
        None => &[],
    }
}
