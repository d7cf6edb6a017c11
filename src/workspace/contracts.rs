use crate::workspace::error::{Result, WorkspaceError};
use crate::workspace::identity::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTemplate {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// `None` for templates shipped with the workspace.
    pub created_by: Option<UserId>,
    pub is_default: bool,
}

impl ContractTemplate {
    pub fn is_visible_to(&self, user: UserId) -> bool {
        self.is_default || self.created_by == Some(user)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTemplate {
    pub title: String,
    pub content: String,
    pub created_by: Option<UserId>,
    pub is_default: bool,
}

pub trait TemplateStore {
    /// Default templates plus the user's own.
    fn visible_to(&self, user: UserId) -> Result<Vec<ContractTemplate>>;
    fn get(&self, id: Uuid) -> Result<Option<ContractTemplate>>;
    fn insert(&mut self, template: NewTemplate) -> Result<ContractTemplate>;
}

#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    templates: Vec<ContractTemplate>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with one default template.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.templates.push(ContractTemplate {
            id: Uuid::new_v4(),
            title: "Standard Services Agreement".to_string(),
            content: "The contractor agrees to perform the work described in the \
                      project scope. The client agrees to pay the amounts listed in \
                      the price breakdown, including the processing fee."
                .to_string(),
            created_by: None,
            is_default: true,
        });
        store
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn visible_to(&self, user: UserId) -> Result<Vec<ContractTemplate>> {
        Ok(self
            .templates
            .iter()
            .filter(|t| t.is_visible_to(user))
            .cloned()
            .collect())
    }

    fn get(&self, id: Uuid) -> Result<Option<ContractTemplate>> {
        Ok(self.templates.iter().find(|t| t.id == id).cloned())
    }

    fn insert(&mut self, template: NewTemplate) -> Result<ContractTemplate> {
        let template = ContractTemplate {
            id: Uuid::new_v4(),
            title: template.title,
            content: template.content,
            created_by: template.created_by,
            is_default: template.is_default,
        };
        self.templates.push(template.clone());
        Ok(template)
    }
}

/// Stores a private copy of `template` owned by `user`.
pub fn duplicate_template<S: TemplateStore + ?Sized>(
    store: &mut S,
    template: &ContractTemplate,
    user: UserId,
) -> Result<ContractTemplate> {
    let copy = store.insert(NewTemplate {
        title: format!("{} (Copy)", template.title),
        content: template.content.clone(),
        created_by: Some(user),
        is_default: false,
    })?;
    log::info!("Duplicated template {} as {}", template.id, copy.id);
    Ok(copy)
}

/// The templates a user can pick from, with the current pick.
#[derive(Debug, Clone, Default)]
pub struct TemplateSelection {
    templates: Vec<ContractTemplate>,
    selected: Option<usize>,
}

impl TemplateSelection {
    /// Loads the visible templates and selects the first one.
    pub fn load<S: TemplateStore + ?Sized>(store: &S, user: UserId) -> Result<Self> {
        let templates = store.visible_to(user)?;
        let selected = if templates.is_empty() { None } else { Some(0) };
        Ok(Self {
            templates,
            selected,
        })
    }

    pub fn templates(&self) -> &[ContractTemplate] {
        &self.templates
    }

    pub fn selected(&self) -> Option<&ContractTemplate> {
        self.selected.map(|i| &self.templates[i])
    }

    pub fn select(&mut self, id: Uuid) -> Result<&ContractTemplate> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or(WorkspaceError::TemplateNotFound(id))?;
        self.selected = Some(index);
        Ok(&self.templates[index])
    }
}

/// A contract the signer has to accept before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agreement {
    template_id: Uuid,
    accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAgreement {
    pub template_id: Uuid,
    pub signed_by: UserId,
    pub signed_at: DateTime<Utc>,
}

impl Agreement {
    pub fn new(template: &ContractTemplate) -> Self {
        Self {
            template_id: template.id,
            accepted: false,
        }
    }

    pub fn set_accepted(&mut self, accepted: bool) {
        self.accepted = accepted;
    }

    pub fn can_sign(&self) -> bool {
        self.accepted
    }

    pub fn sign(&self, signer: UserId) -> Result<SignedAgreement> {
        if !self.accepted {
            return Err(WorkspaceError::AgreementNotAccepted);
        }
        log::info!("Contract {} signed by {}", self.template_id, signer);
        Ok(SignedAgreement {
            template_id: self.template_id,
            signed_by: signer,
            signed_at: Utc::now(),
        })
    }
}
