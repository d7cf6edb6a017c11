use crate::workspace::error::{Result, WorkspaceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The authenticated user as reported by the identity provider.
pub trait Identity {
    fn current_user(&self) -> Option<UserId>;
    fn is_loading(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The provider hasn't resolved the session yet.
    Loading,
    SignInRequired,
    Granted(UserId),
}

pub fn gate(identity: &impl Identity) -> Access {
    if identity.is_loading() {
        return Access::Loading;
    }
    match identity.current_user() {
        Some(user) => Access::Granted(user),
        None => Access::SignInRequired,
    }
}

pub fn require_user(identity: &impl Identity) -> Result<UserId> {
    match gate(identity) {
        Access::Granted(user) => Ok(user),
        Access::Loading | Access::SignInRequired => Err(WorkspaceError::NotSignedIn),
    }
}

/// Identity state driven by the provider's auth callbacks.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    user: Option<UserId>,
    loading: bool,
}

impl SessionIdentity {
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn signed_in(user: UserId) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn resolve(&mut self, user: Option<UserId>) {
        log::debug!("Auth session resolved: signed in = {}", user.is_some());
        self.user = user;
        self.loading = false;
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.loading = false;
    }
}

impl Identity for SessionIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user
    }

    fn is_loading(&self) -> bool {
        self.loading
    }
}
