//! Client-side orchestration over the hosted workspace services.
//!
//! Each collaborator is a trait the hosted backend implements; the
//! in-memory implementations back the tests and offline use.

pub mod contracts;
pub mod error;
pub mod identity;
pub mod notify;
pub mod payments;
pub mod pricing;
pub mod projects;

pub use contracts::{Agreement, ContractTemplate, InMemoryTemplateStore, TemplateSelection, TemplateStore};
pub use error::{Result, WorkspaceError};
pub use identity::{Access, Identity, SessionIdentity, UserId, gate};
pub use notify::{Notice, NoticeKind, Notifications};
pub use payments::{InMemoryPaymentGateway, PaymentGateway, PaymentIntentRequest, SubscriptionRequest};
pub use pricing::{PriceBreakdown, PriceItem};
pub use projects::{InMemoryProjectStore, Project, ProjectCode, ProjectStore, Role};
