use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateId, CandidateProfile, JobId,
    JobRequirement, NewApplication, NewCandidate, NewJob,
};
use super::evaluation::evaluate;
use super::lifecycle::{shortlist_transition, LifecycleError, ShortlistTransition};
use super::ranking::{rank_applications, PageRequest, RankedPage};
use super::repository::{
    ApplicationRepository, CandidateRepository, JobRepository, RepositoryError,
};
use super::validation::ValidationError;
use crate::config::ListingConfig;

/// Entity named in not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Candidate,
    Job,
    Application,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Candidate => "Candidate",
            Entity::Job => "Job",
            Entity::Application => "Application",
        })
    }
}

/// Coarse classification used at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidTransition,
    Validation,
    Internal,
}

/// Error raised by the marketplace services.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("{entity} not found")]
    NotFound { entity: Entity, id: u64 },
    #[error(transparent)]
    InvalidTransition(#[from] LifecycleError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl MarketplaceError {
    fn not_found(entity: Entity, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketplaceError::NotFound { .. } => ErrorKind::NotFound,
            MarketplaceError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            MarketplaceError::Validation(_) => ErrorKind::Validation,
            MarketplaceError::Repository(_) => ErrorKind::Internal,
        }
    }
}

/// Candidate registration and lookup.
pub struct CandidateService<C> {
    repository: Arc<C>,
}

impl<C> CandidateService<C>
where
    C: CandidateRepository + 'static,
{
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    pub fn create(&self, candidate: NewCandidate) -> Result<CandidateProfile, MarketplaceError> {
        let stored = self.repository.create(candidate)?;
        info!(candidate_id = %stored.id, "candidate registered");
        Ok(stored)
    }

    pub fn get(&self, id: CandidateId) -> Result<CandidateProfile, MarketplaceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| MarketplaceError::not_found(Entity::Candidate, id.0))
    }

    pub fn list(&self) -> Result<Vec<CandidateProfile>, MarketplaceError> {
        Ok(self.repository.list()?)
    }
}

/// Job posting and lookup.
pub struct JobService<J> {
    repository: Arc<J>,
}

impl<J> JobService<J>
where
    J: JobRepository + 'static,
{
    pub fn new(repository: Arc<J>) -> Self {
        Self { repository }
    }

    pub fn create(&self, job: NewJob) -> Result<JobRequirement, MarketplaceError> {
        let stored = self.repository.create(job)?;
        info!(job_id = %stored.id, "job posted");
        Ok(stored)
    }

    pub fn get(&self, id: JobId) -> Result<JobRequirement, MarketplaceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| MarketplaceError::not_found(Entity::Job, id.0))
    }

    pub fn list(&self) -> Result<Vec<JobRequirement>, MarketplaceError> {
        Ok(self.repository.list()?)
    }
}

/// Service composing candidate and job lookups with scoring, ranking, and the shortlist rule.
pub struct ApplicationService<C, J, A> {
    candidates: CandidateService<C>,
    jobs: JobService<J>,
    applications: Arc<A>,
}

impl<C, J, A> ApplicationService<C, J, A>
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(candidates: Arc<C>, jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self {
            candidates: CandidateService::new(candidates),
            jobs: JobService::new(jobs),
            applications,
        }
    }

    /// Apply a candidate to a job, scoring and classifying the application once.
    pub fn apply(
        &self,
        candidate_id: CandidateId,
        job_id: JobId,
    ) -> Result<Application, MarketplaceError> {
        let candidate = self.candidates.get(candidate_id)?;
        let job = self.jobs.get(job_id)?;

        let outcome = evaluate(&candidate, &job);
        if !outcome.gaps.is_empty() {
            debug!(
                %candidate_id,
                %job_id,
                reasons = %outcome.summary(),
                "candidate misses job requirements"
            );
        }

        let stored = self.applications.create(NewApplication {
            candidate_id,
            job_id,
            eligibility_score: outcome.eligibility_score,
            status: outcome.status,
        })?;

        info!(
            application_id = %stored.id,
            %candidate_id,
            %job_id,
            score = stored.eligibility_score,
            status = %stored.status,
            "application created"
        );
        Ok(stored)
    }

    /// Ranked, optionally filtered page of a job's applications.
    pub fn list_for_job(
        &self,
        job_id: JobId,
        filter: Option<ApplicationStatus>,
        page: PageRequest,
    ) -> Result<RankedPage, MarketplaceError> {
        self.jobs.get(job_id)?;

        let applications = self.applications.for_job(job_id)?;
        let ranked = rank_applications(applications, filter, page);

        debug!(
            %job_id,
            status = filter.map(ApplicationStatus::label),
            page = page.page,
            limit = page.limit,
            total = ranked.meta.total,
            "applications ranked"
        );
        Ok(ranked)
    }

    /// Promote an eligible application to shortlisted; repeat requests are no-ops.
    pub fn shortlist(&self, id: ApplicationId) -> Result<Application, MarketplaceError> {
        let application = self.fetch(id)?;

        match shortlist_transition(application.status)? {
            ShortlistTransition::AlreadyShortlisted => Ok(application),
            ShortlistTransition::Promote => match self.promote(id) {
                Err(MarketplaceError::Repository(RepositoryError::StatusConflict {
                    found, ..
                })) => {
                    warn!(application_id = %id, %found, "status changed during shortlist; re-reading");
                    let current = self.fetch(id)?;
                    match shortlist_transition(current.status)? {
                        ShortlistTransition::AlreadyShortlisted => Ok(current),
                        ShortlistTransition::Promote => self.promote(id),
                    }
                }
                other => other,
            },
        }
    }

    pub fn get(&self, id: ApplicationId) -> Result<Application, MarketplaceError> {
        self.fetch(id)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Application, MarketplaceError> {
        self.applications
            .fetch(id)?
            .ok_or_else(|| MarketplaceError::not_found(Entity::Application, id.0))
    }

    fn promote(&self, id: ApplicationId) -> Result<Application, MarketplaceError> {
        match self.applications.update_status(
            id,
            ApplicationStatus::Eligible,
            ApplicationStatus::Shortlisted,
        ) {
            Ok(updated) => {
                info!(application_id = %id, "application shortlisted");
                Ok(updated)
            }
            Err(RepositoryError::NotFound) => {
                Err(MarketplaceError::not_found(Entity::Application, id.0))
            }
            Err(other) => Err(other.into()),
        }
    }
}

/// The three services plus listing defaults, shared as router state.
pub struct MarketplaceServices<C, J, A> {
    pub candidates: CandidateService<C>,
    pub jobs: JobService<J>,
    pub applications: ApplicationService<C, J, A>,
    pub listing: ListingConfig,
}

impl<C, J, A> MarketplaceServices<C, J, A>
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(candidates: Arc<C>, jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self::with_listing(candidates, jobs, applications, ListingConfig::default())
    }

    pub fn with_listing(
        candidates: Arc<C>,
        jobs: Arc<J>,
        applications: Arc<A>,
        listing: ListingConfig,
    ) -> Self {
        Self {
            candidates: CandidateService::new(candidates.clone()),
            jobs: JobService::new(jobs.clone()),
            applications: ApplicationService::new(candidates, jobs, applications),
            listing,
        }
    }
}
