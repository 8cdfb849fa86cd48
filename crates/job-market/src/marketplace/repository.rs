use super::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateId, CandidateProfile, JobId,
    JobRequirement, NewApplication, NewCandidate, NewJob,
};

/// Candidate storage. Implementations assign identifiers and creation timestamps.
pub trait CandidateRepository: Send + Sync {
    fn create(&self, candidate: NewCandidate) -> Result<CandidateProfile, RepositoryError>;
    fn fetch(&self, id: CandidateId) -> Result<Option<CandidateProfile>, RepositoryError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<CandidateProfile>, RepositoryError>;
}

/// Job storage. Implementations assign identifiers and creation timestamps.
pub trait JobRepository: Send + Sync {
    fn create(&self, job: NewJob) -> Result<JobRequirement, RepositoryError>;
    fn fetch(&self, id: JobId) -> Result<Option<JobRequirement>, RepositoryError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<JobRequirement>, RepositoryError>;
}

/// Application storage. Every returned application embeds its candidate.
pub trait ApplicationRepository: Send + Sync {
    fn create(&self, application: NewApplication) -> Result<Application, RepositoryError>;
    fn fetch(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError>;
    /// All applications for a job, in storage order.
    fn for_job(&self, job_id: JobId) -> Result<Vec<Application>, RepositoryError>;
    /// Compare-and-swap status write: succeeds only while the stored status is `expected`.
    fn update_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("status changed concurrently (expected {expected}, found {found})")]
    StatusConflict {
        expected: ApplicationStatus,
        found: ApplicationStatus,
    },
    #[error("referenced record missing: {0}")]
    MissingReference(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
