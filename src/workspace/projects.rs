use crate::workspace::error::{Result, WorkspaceError};
use crate::workspace::identity::UserId;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const PROJECT_CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MAX_CODE_ATTEMPTS: usize = 16;

/// Short shareable code a client types in to join a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectCode(String);

impl ProjectCode {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..PROJECT_CODE_LEN)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Accepts user input: surrounding whitespace is ignored and letters
    /// are matched case-insensitively.
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim().to_ascii_uppercase();
        let valid = code.len() == PROJECT_CODE_LEN
            && code.bytes().all(|b| CODE_ALPHABET.contains(&b));
        if !valid {
            return Err(WorkspaceError::InvalidProjectCode(input.to_string()));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProjectCode {
    type Error = WorkspaceError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ProjectCode> for String {
    fn from(code: ProjectCode) -> Self {
        code.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Contractor,
    Client,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub code: ProjectCode,
    pub title: String,
    pub status: ProjectStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Row the client submits; the store assigns the id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub code: ProjectCode,
    pub title: String,
    pub status: ProjectStatus,
    pub created_by: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub project_id: Uuid,
    pub user_id: UserId,
    pub role: Role,
}

pub trait ProjectStore {
    fn insert_project(&mut self, project: NewProject) -> Result<Project>;
    fn find_by_code(&self, code: &ProjectCode) -> Result<Option<Project>>;
    /// Newest first.
    fn projects_created_by(&self, user: UserId) -> Result<Vec<Project>>;
    fn remove_project(&mut self, project_id: Uuid) -> Result<()>;
    fn insert_membership(&mut self, membership: Membership) -> Result<()>;
    fn role_of(&self, project_id: Uuid, user: UserId) -> Result<Option<Role>>;
}

#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    projects: Vec<Project>,
    memberships: Vec<Membership>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memberships(&self) -> &[Membership] {
        &self.memberships
    }
}

impl ProjectStore for InMemoryProjectStore {
    fn insert_project(&mut self, project: NewProject) -> Result<Project> {
        if self.projects.iter().any(|p| p.code == project.code) {
            return Err(WorkspaceError::Store(format!(
                "duplicate project code {}",
                project.code
            )));
        }
        let project = Project {
            id: Uuid::new_v4(),
            code: project.code,
            title: project.title,
            status: project.status,
            created_by: project.created_by,
            created_at: Utc::now(),
        };
        self.projects.push(project.clone());
        Ok(project)
    }

    fn find_by_code(&self, code: &ProjectCode) -> Result<Option<Project>> {
        Ok(self.projects.iter().find(|p| &p.code == code).cloned())
    }

    fn projects_created_by(&self, user: UserId) -> Result<Vec<Project>> {
        // Insertion order breaks ties between equal timestamps.
        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .rev()
            .filter(|p| p.created_by == user)
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    fn remove_project(&mut self, project_id: Uuid) -> Result<()> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != project_id);
        if self.projects.len() == before {
            return Err(WorkspaceError::Store(format!("project {project_id} not found")));
        }
        self.memberships.retain(|m| m.project_id != project_id);
        Ok(())
    }

    fn insert_membership(&mut self, membership: Membership) -> Result<()> {
        let exists = self
            .memberships
            .iter()
            .any(|m| m.project_id == membership.project_id && m.user_id == membership.user_id);
        if exists {
            return Err(WorkspaceError::Store(format!(
                "user {} is already a member of project {}",
                membership.user_id, membership.project_id
            )));
        }
        self.memberships.push(membership);
        Ok(())
    }

    fn role_of(&self, project_id: Uuid, user: UserId) -> Result<Option<Role>> {
        Ok(self
            .memberships
            .iter()
            .find(|m| m.project_id == project_id && m.user_id == user)
            .map(|m| m.role))
    }
}

/// Creates an active project with a fresh code and enrolls the owner as
/// its contractor.
pub fn create_project<S, R>(store: &mut S, rng: &mut R, owner: UserId, title: &str) -> Result<Project>
where
    S: ProjectStore + ?Sized,
    R: Rng + ?Sized,
{
    let title = title.trim();
    if title.is_empty() {
        return Err(WorkspaceError::EmptyTitle);
    }

    let mut code = None;
    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = ProjectCode::generate(rng);
        if store.find_by_code(&candidate)?.is_none() {
            code = Some(candidate);
            break;
        }
        log::debug!("Project code {} already taken, retrying", candidate);
    }
    let code = code.ok_or(WorkspaceError::CodeSpaceExhausted(MAX_CODE_ATTEMPTS))?;

    let project = store.insert_project(NewProject {
        code,
        title: title.to_string(),
        status: ProjectStatus::Active,
        created_by: owner,
    })?;
    let enrolled = store.insert_membership(Membership {
        project_id: project.id,
        user_id: owner,
        role: Role::Contractor,
    });
    // The inserts aren't atomic: drop the project again if enrolling fails.
    if let Err(err) = enrolled {
        if let Err(rollback) = store.remove_project(project.id) {
            log::error!(
                "Project {} ({}) left without a contractor: {}",
                project.id,
                project.code,
                rollback
            );
        }
        return Err(err);
    }

    log::info!("Created project {} ({})", project.code, project.title);
    Ok(project)
}

pub fn open_project<S: ProjectStore + ?Sized>(store: &S, input: &str) -> Result<Project> {
    let code = ProjectCode::parse(input)?;
    store
        .find_by_code(&code)?
        .ok_or(WorkspaceError::ProjectNotFound(code))
}

/// Adds a client to a project they opened by code. Existing members keep
/// their role.
pub fn join_project<S: ProjectStore + ?Sized>(store: &mut S, project: &Project, user: UserId) -> Result<Role> {
    if let Some(role) = store.role_of(project.id, user)? {
        return Ok(role);
    }
    store.insert_membership(Membership {
        project_id: project.id,
        user_id: user,
        role: Role::Client,
    })?;
    log::info!("User {} joined project {} as client", user, project.code);
    Ok(Role::Client)
}
