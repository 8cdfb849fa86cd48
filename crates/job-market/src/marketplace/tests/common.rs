use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::marketplace::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateId, CandidateProfile, JobId,
    JobRequirement, NewApplication, NewCandidate, NewJob,
};
use crate::marketplace::repository::{
    ApplicationRepository, CandidateRepository, JobRepository, RepositoryError,
};
use crate::marketplace::{marketplace_router, MarketplaceServices};

pub(super) fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn candidate(
    id: u64,
    experience: u32,
    language_score: u8,
    documents_verified: bool,
) -> CandidateProfile {
    CandidateProfile {
        id: CandidateId(id),
        name: format!("Candidate {id}"),
        skill: "Welding".to_string(),
        experience,
        language_score,
        documents_verified,
        created_at: timestamp(),
    }
}

pub(super) fn job(id: u64, min_experience: u32, min_language_score: u8) -> JobRequirement {
    JobRequirement {
        id: JobId(id),
        title: "Site Welder".to_string(),
        country: "Germany".to_string(),
        min_experience,
        min_language_score,
        created_at: timestamp(),
    }
}

/// Application for ranking tests; the candidate only matters for its experience.
pub(super) fn ranked_application(
    id: u64,
    status: ApplicationStatus,
    eligibility_score: f64,
    experience: u32,
) -> Application {
    Application {
        id: ApplicationId(id),
        candidate_id: CandidateId(id),
        job_id: JobId(1),
        eligibility_score,
        status,
        created_at: timestamp(),
        candidate: candidate(id, experience, 70, true),
    }
}

pub(super) fn ids(applications: &[Application]) -> Vec<u64> {
    applications.iter().map(|application| application.id.0).collect()
}

pub(super) fn new_candidate(experience: u32, language_score: u8, verified: bool) -> NewCandidate {
    NewCandidate {
        name: "Asha".to_string(),
        skill: "Nursing".to_string(),
        experience,
        language_score,
        documents_verified: verified,
    }
}

pub(super) fn new_job(min_experience: u32, min_language_score: u8) -> NewJob {
    NewJob {
        title: "Care Assistant".to_string(),
        country: "Japan".to_string(),
        min_experience,
        min_language_score,
    }
}

#[derive(Default)]
struct Tables {
    candidates: Vec<CandidateProfile>,
    jobs: Vec<JobRequirement>,
    applications: Vec<(ApplicationId, NewApplication)>,
}

/// In-process store implementing every repository trait.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub(super) fn force_status(&self, id: ApplicationId, status: ApplicationStatus) {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if let Some((_, row)) = tables.applications.iter_mut().find(|(key, _)| *key == id) {
            row.status = status;
        }
    }

    fn hydrate(tables: &Tables, id: ApplicationId, row: &NewApplication) -> Option<Application> {
        let candidate = tables
            .candidates
            .iter()
            .find(|candidate| candidate.id == row.candidate_id)?
            .clone();
        Some(Application {
            id,
            candidate_id: row.candidate_id,
            job_id: row.job_id,
            eligibility_score: row.eligibility_score,
            status: row.status,
            created_at: timestamp(),
            candidate,
        })
    }
}

impl CandidateRepository for MemoryStore {
    fn create(&self, candidate: NewCandidate) -> Result<CandidateProfile, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let stored = CandidateProfile {
            id: CandidateId(tables.candidates.len() as u64 + 1),
            name: candidate.name,
            skill: candidate.skill,
            experience: candidate.experience,
            language_score: candidate.language_score,
            documents_verified: candidate.documents_verified,
            created_at: timestamp(),
        };
        tables.candidates.push(stored.clone());
        Ok(stored)
    }

    fn fetch(&self, id: CandidateId) -> Result<Option<CandidateProfile>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.candidates.iter().find(|c| c.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<CandidateProfile>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.candidates.iter().rev().cloned().collect())
    }
}

impl JobRepository for MemoryStore {
    fn create(&self, job: NewJob) -> Result<JobRequirement, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let stored = JobRequirement {
            id: JobId(tables.jobs.len() as u64 + 1),
            title: job.title,
            country: job.country,
            min_experience: job.min_experience,
            min_language_score: job.min_language_score,
            created_at: timestamp(),
        };
        tables.jobs.push(stored.clone());
        Ok(stored)
    }

    fn fetch(&self, id: JobId) -> Result<Option<JobRequirement>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.jobs.iter().find(|j| j.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<JobRequirement>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables.jobs.iter().rev().cloned().collect())
    }
}

impl ApplicationRepository for MemoryStore {
    fn create(&self, application: NewApplication) -> Result<Application, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let id = ApplicationId(tables.applications.len() as u64 + 1);
        let hydrated = Self::hydrate(&tables, id, &application).ok_or_else(|| {
            RepositoryError::MissingReference(format!("candidate {}", application.candidate_id))
        })?;
        tables.applications.push((id, application));
        Ok(hydrated)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .applications
            .iter()
            .find(|(key, _)| *key == id)
            .and_then(|(key, row)| Self::hydrate(&tables, *key, row)))
    }

    fn for_job(&self, job_id: JobId) -> Result<Vec<Application>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .applications
            .iter()
            .filter(|(_, row)| row.job_id == job_id)
            .filter_map(|(key, row)| Self::hydrate(&tables, *key, row))
            .collect())
    }

    fn update_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let row = tables
            .applications
            .iter_mut()
            .find(|(key, _)| *key == id)
            .map(|(_, row)| row)
            .ok_or(RepositoryError::NotFound)?;
        if row.status != expected {
            return Err(RepositoryError::StatusConflict {
                expected,
                found: row.status,
            });
        }
        row.status = next;
        let row = row.clone();
        Self::hydrate(&tables, id, &row).ok_or(RepositoryError::NotFound)
    }
}

/// Store whose status writes always lose a race against a concurrent shortlist.
#[derive(Default, Clone)]
pub(super) struct RacingStore {
    pub(super) inner: MemoryStore,
}

impl CandidateRepository for RacingStore {
    fn create(&self, candidate: NewCandidate) -> Result<CandidateProfile, RepositoryError> {
        CandidateRepository::create(&self.inner, candidate)
    }

    fn fetch(&self, id: CandidateId) -> Result<Option<CandidateProfile>, RepositoryError> {
        CandidateRepository::fetch(&self.inner, id)
    }

    fn list(&self) -> Result<Vec<CandidateProfile>, RepositoryError> {
        CandidateRepository::list(&self.inner)
    }
}

impl ApplicationRepository for RacingStore {
    fn create(&self, application: NewApplication) -> Result<Application, RepositoryError> {
        ApplicationRepository::create(&self.inner, application)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        ApplicationRepository::fetch(&self.inner, id)
    }

    fn for_job(&self, job_id: JobId) -> Result<Vec<Application>, RepositoryError> {
        self.inner.for_job(job_id)
    }

    fn update_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        self.inner.force_status(id, ApplicationStatus::Shortlisted);
        self.inner.update_status(id, expected, next)
    }
}

pub(super) struct UnavailableStore;

impl CandidateRepository for UnavailableStore {
    fn create(&self, _candidate: NewCandidate) -> Result<CandidateProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: CandidateId) -> Result<Option<CandidateProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<CandidateProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryServices = MarketplaceServices<MemoryStore, MemoryStore, MemoryStore>;

pub(super) fn build_services() -> (Arc<MemoryServices>, MemoryStore) {
    let store = MemoryStore::default();
    let shared = Arc::new(store.clone());
    let services = Arc::new(MarketplaceServices::new(
        shared.clone(),
        shared.clone(),
        shared,
    ));
    (services, store)
}

pub(super) fn router_with(services: Arc<MemoryServices>) -> axum::Router {
    marketplace_router(services)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
