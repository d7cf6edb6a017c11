//! A contractor and a client going through a project together.

use crewboard::workspace::contracts::{Agreement, TemplateSelection, duplicate_template};
use crewboard::workspace::payments::{PaymentStatus, PaymentTab, Plan, payment_tabs};
use crewboard::workspace::projects::{create_project, join_project, open_project};
use crewboard::workspace::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

struct Workspace {
    projects: InMemoryProjectStore,
    templates: InMemoryTemplateStore,
    payments: InMemoryPaymentGateway,
    notifications: Notifications,
    rng: StdRng,
}

impl Workspace {
    fn new() -> Self {
        Self {
            projects: InMemoryProjectStore::new(),
            templates: InMemoryTemplateStore::with_defaults(),
            payments: InMemoryPaymentGateway::new(),
            notifications: Notifications::new(),
            rng: StdRng::seed_from_u64(42),
        }
    }
}

#[test]
fn signed_out_user_cannot_create_projects() {
    let identity = SessionIdentity::default();
    assert_eq!(gate(&identity), Access::SignInRequired);
    assert_eq!(
        identity::require_user(&identity),
        Err(WorkspaceError::NotSignedIn)
    );
}

#[test]
fn contractor_and_client_share_a_project() {
    let mut ws = Workspace::new();
    let contractor = UserId::new_random();
    let client = UserId::new_random();

    let project = create_project(&mut ws.projects, &mut ws.rng, contractor, "Bathroom tiles").unwrap();
    assert_eq!(payment_tabs(ws.projects.role_of(project.id, contractor).unwrap()), &[PaymentTab::Subscription]);

    let opened = open_project(&ws.projects, &format!(" {} ", project.code.as_str().to_lowercase())).unwrap();
    let role = join_project(&mut ws.projects, &opened, client).unwrap();
    assert_eq!(role, Role::Client);
    assert_eq!(payment_tabs(Some(role)), &[PaymentTab::ProjectPayment]);
}

#[test]
fn mistyped_code_shows_a_notice() {
    let mut ws = Workspace::new();
    let opened = ws
        .notifications
        .report("Invalid code", open_project(&ws.projects, "NOPE00"));
    assert!(opened.is_none());

    let notice = ws.notifications.iter().next().unwrap();
    assert_eq!(notice.kind, NoticeKind::Destructive);
    assert!(notice.description.contains("NOPE00"));
}

#[test]
fn client_signs_and_pays() {
    let mut ws = Workspace::new();
    let contractor = UserId::new_random();
    let client = UserId::new_random();
    let project = create_project(&mut ws.projects, &mut ws.rng, contractor, "Fence").unwrap();

    let selection = TemplateSelection::load(&ws.templates, client).unwrap();
    let template = selection.selected().unwrap();
    let mut agreement = Agreement::new(template);
    assert_eq!(agreement.sign(client), Err(WorkspaceError::AgreementNotAccepted));
    agreement.set_accepted(true);
    agreement.sign(client).unwrap();

    let breakdown = PriceBreakdown::default();
    let request = PaymentIntentRequest::client_payment(project.id, &breakdown).unwrap();
    let intent = ws.payments.create_payment_intent(&request).unwrap();
    assert_eq!(intent.amount, 180_250);
    assert_eq!(intent.platform_fee, 5_407);
    assert_eq!(ws.payments.payment_status(intent.id).unwrap(), PaymentStatus::Pending);
}

#[test]
fn contractor_customizes_a_template() {
    let mut ws = Workspace::new();
    let contractor = UserId::new_random();
    let stranger = UserId::new_random();
    let default = TemplateSelection::load(&ws.templates, contractor)
        .unwrap()
        .selected()
        .cloned()
        .unwrap();

    let copy = duplicate_template(&mut ws.templates, &default, contractor).unwrap();
    let mut selection = TemplateSelection::load(&ws.templates, contractor).unwrap();
    assert_eq!(selection.templates().len(), 2);
    assert_eq!(selection.select(copy.id).unwrap().title, "Standard Services Agreement (Copy)");

    assert_eq!(ws.templates.visible_to(stranger).unwrap().len(), 1);
}

#[test]
fn contractor_subscribes() {
    let mut ws = Workspace::new();
    let contractor = UserId::new_random();
    let request = SubscriptionRequest {
        user_id: contractor,
        plan: Plan::Professional,
    };
    let subscription = ws.payments.create_subscription(&request).unwrap();
    ws.payments.activate_subscription(subscription.id).unwrap();

    let active = ws.payments.active_subscription(contractor).unwrap().unwrap();
    assert_eq!(active.plan, Plan::Professional);
    assert_eq!(Plan::Professional.monthly_price(), 2_900);
}
