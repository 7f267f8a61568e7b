//! In-memory adapters and a wired-up state for integration tests.
//!
//! These adapters honour the same contracts as the Diesel repositories
//! (ordering, uniqueness, idempotent deletes) so the HTTP tests exercise
//! the real services end to end without a database.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    ContactNotifier, ContactRepository, ContactRepositoryError, NotifierError, ProfileRepository,
    ProfileRepositoryError, ProjectRepository, ProjectRepositoryError, SkillRepository,
    SkillRepositoryError,
};
use crate::domain::{
    BootstrapAdmin, ContactMessage, ContactService, MessageStatus, Profile, ProfileId,
    ProfileService, Project, ProjectService, Skill, SkillService, UploadServiceImpl,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::auth::{Argon2PasswordHasher, JwtTokenService};
use crate::outbound::storage::FsUploadStore;

/// Signing secret used by integration-test tokens.
pub const TEST_AUTH_SECRET: &[u8] = b"integration-test-secret";

/// Bootstrap credentials used by [`bootstrapped_harness`].
pub const TEST_ADMIN_USERNAME: &str = "admin";
/// Bootstrap password used by [`bootstrapped_harness`].
pub const TEST_ADMIN_PASSWORD: &str = "admin123";

/// In-memory singleton-profile store.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    inner: Mutex<Option<Profile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(&self) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.inner.lock().expect("profile lock").clone())
    }

    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self
            .inner
            .lock()
            .expect("profile lock")
            .clone()
            .filter(|profile| profile.id == id))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self
            .inner
            .lock()
            .expect("profile lock")
            .clone()
            .filter(|profile| profile.username.as_ref() == username))
    }

    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut inner = self.inner.lock().expect("profile lock");
        if inner.is_some() {
            return Err(ProfileRepositoryError::duplicate_username(
                profile.username.as_ref(),
            ));
        }
        *inner = Some(profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut inner = self.inner.lock().expect("profile lock");
        match inner.as_mut() {
            Some(stored) if stored.id == profile.id => {
                *stored = profile.clone();
                Ok(())
            }
            _ => Err(ProfileRepositoryError::query("profile not found for update")),
        }
    }
}

/// In-memory skill store, name-ascending listings.
#[derive(Debug, Default)]
pub struct InMemorySkillRepository {
    inner: Mutex<Vec<Skill>>,
}

fn sorted_by_name(mut skills: Vec<Skill>) -> Vec<Skill> {
    skills.sort_by(|a, b| a.name.cmp(&b.name));
    skills
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn list_by_owner(&self, owner: ProfileId) -> Result<Vec<Skill>, SkillRepositoryError> {
        let skills = self.inner.lock().expect("skill lock");
        Ok(sorted_by_name(
            skills
                .iter()
                .filter(|skill| skill.owner_id == owner)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Skill>, SkillRepositoryError> {
        Ok(sorted_by_name(
            self.inner.lock().expect("skill lock").clone(),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, SkillRepositoryError> {
        Ok(self
            .inner
            .lock()
            .expect("skill lock")
            .iter()
            .find(|skill| skill.id == id)
            .cloned())
    }

    async fn insert(&self, skill: &Skill) -> Result<(), SkillRepositoryError> {
        self.inner.lock().expect("skill lock").push(skill.clone());
        Ok(())
    }

    async fn update(&self, skill: &Skill) -> Result<(), SkillRepositoryError> {
        let mut skills = self.inner.lock().expect("skill lock");
        if let Some(stored) = skills.iter_mut().find(|stored| stored.id == skill.id) {
            *stored = skill.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), SkillRepositoryError> {
        self.inner
            .lock()
            .expect("skill lock")
            .retain(|skill| skill.id != id);
        Ok(())
    }
}

/// In-memory project store, newest-first listings.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    inner: Mutex<Vec<Project>>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn list_newest_first(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut projects = self.inner.lock().expect("project lock").clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(self
            .inner
            .lock()
            .expect("project lock")
            .iter()
            .find(|project| project.id == id)
            .cloned())
    }

    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        self.inner
            .lock()
            .expect("project lock")
            .push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut projects = self.inner.lock().expect("project lock");
        if let Some(stored) = projects.iter_mut().find(|stored| stored.id == project.id) {
            *stored = project.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ProjectRepositoryError> {
        self.inner
            .lock()
            .expect("project lock")
            .retain(|project| project.id != id);
        Ok(())
    }
}

/// In-memory contact inbox, newest-first listings.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    inner: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError> {
        self.inner
            .lock()
            .expect("contact lock")
            .push(message.clone());
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>, ContactRepositoryError> {
        let mut messages = self.inner.lock().expect("contact lock").clone();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactMessage>, ContactRepositoryError> {
        Ok(self
            .inner
            .lock()
            .expect("contact lock")
            .iter()
            .find(|message| message.id == id)
            .cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
    ) -> Result<(), ContactRepositoryError> {
        let mut messages = self.inner.lock().expect("contact lock");
        if let Some(stored) = messages.iter_mut().find(|stored| stored.id == id) {
            stored.status = status;
        }
        Ok(())
    }

    async fn mark_notification_sent(&self, id: Uuid) -> Result<(), ContactRepositoryError> {
        let mut messages = self.inner.lock().expect("contact lock");
        if let Some(stored) = messages.iter_mut().find(|stored| stored.id == id) {
            stored.notification_sent = true;
        }
        Ok(())
    }
}

/// Notifier that records deliveries, or fails every attempt, on demand.
#[derive(Debug)]
pub struct RecordingNotifier {
    succeed: bool,
    delivered: Mutex<Vec<Uuid>>,
}

impl RecordingNotifier {
    /// A notifier whose every attempt succeeds.
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// A notifier whose every attempt fails, simulating a dead relay.
    pub fn failing() -> Self {
        Self {
            succeed: false,
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Ids of messages whose notification was delivered.
    pub fn delivered(&self) -> Vec<Uuid> {
        self.delivered.lock().expect("notifier lock").clone()
    }
}

#[async_trait]
impl ContactNotifier for RecordingNotifier {
    async fn notify(&self, message: &ContactMessage) -> Result<(), NotifierError> {
        if self.succeed {
            self.delivered
                .lock()
                .expect("notifier lock")
                .push(message.id);
            Ok(())
        } else {
            Err(NotifierError::send("test relay unreachable"))
        }
    }
}

type TestProfileService =
    ProfileService<InMemoryProfileRepository, Argon2PasswordHasher, JwtTokenService>;

/// Everything an end-to-end HTTP test needs: the handler state plus
/// handles on the underlying stores for seeding and asserting.
pub struct TestHarness {
    pub state: HttpState,
    pub profile_service: Arc<TestProfileService>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub skills: Arc<InMemorySkillRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub contacts: Arc<InMemoryContactRepository>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Build a fully wired state over in-memory stores, with the admin
/// profile bootstrapped from the default credentials.
///
/// `uploads_dir` should be a temporary directory owned by the test.
pub async fn bootstrapped_harness(uploads_dir: &Path, notifier_succeeds: bool) -> TestHarness {
    let profiles = Arc::new(InMemoryProfileRepository::default());
    let skills = Arc::new(InMemorySkillRepository::default());
    let projects = Arc::new(InMemoryProjectRepository::default());
    let contacts = Arc::new(InMemoryContactRepository::default());
    let notifier = Arc::new(if notifier_succeeds {
        RecordingNotifier::succeeding()
    } else {
        RecordingNotifier::failing()
    });

    let profile_service = Arc::new(ProfileService::new(
        profiles.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenService::with_default_ttl(TEST_AUTH_SECRET)),
    ));
    profile_service
        .bootstrap(&BootstrapAdmin::new(
            TEST_ADMIN_USERNAME,
            TEST_ADMIN_PASSWORD,
        ))
        .await
        .expect("bootstrap succeeds");

    let skill_service = Arc::new(SkillService::new(skills.clone()));
    let project_service = Arc::new(ProjectService::new(projects.clone()));
    let contact_service = Arc::new(ContactService::new(
        contacts.clone(),
        notifier.clone(),
        "hello@example.com",
    ));

    let base_url = url::Url::parse("http://localhost:8080").expect("valid base url");
    let upload_store =
        Arc::new(FsUploadStore::open(uploads_dir, &base_url).expect("open upload store"));
    let upload_service = Arc::new(UploadServiceImpl::new(
        upload_store,
        crate::domain::UploadLimits::default(),
    ));

    let state = HttpState {
        login: profile_service.clone(),
        authenticator: profile_service.clone(),
        profile_query: profile_service.clone(),
        profile_command: profile_service.clone(),
        skills_query: skill_service.clone(),
        skills_command: skill_service,
        projects_query: project_service.clone(),
        projects_command: project_service,
        contacts_query: contact_service.clone(),
        contacts_command: contact_service,
        uploads: upload_service,
        upload_limits: crate::domain::UploadLimits::default(),
    };

    TestHarness {
        state,
        profile_service,
        profiles,
        skills,
        projects,
        contacts,
        notifier,
    }
}
