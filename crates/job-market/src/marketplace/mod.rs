//! Candidate intake, job requirements, and the application evaluation workflow.
//!
//! Applications are scored once when a candidate applies, classified as eligible or rejected
//! against the job's minimums, ranked for recruiters, and promoted to shortlisted through a
//! guarded status transition. Persistence sits behind the traits in [`repository`].

pub mod domain;
pub(crate) mod evaluation;
pub mod lifecycle;
pub mod ranking;
pub mod repository;
pub mod response;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, CandidateId, CandidateProfile, JobId,
    JobRequirement, NewApplication, NewCandidate, NewJob,
};
pub use evaluation::{
    calculate_eligibility_score, determine_eligibility, evaluate, unmet_requirements,
    EvaluationOutcome, RequirementGap,
};
pub use lifecycle::{shortlist_transition, LifecycleError, ShortlistTransition};
pub use ranking::{rank_applications, PageRequest, PaginationMeta, RankedPage};
pub use repository::{
    ApplicationRepository, CandidateRepository, JobRepository, RepositoryError,
};
pub use response::ApiResponse;
pub use router::marketplace_router;
pub use service::{
    ApplicationService, CandidateService, ErrorKind, JobService, MarketplaceError,
    MarketplaceServices,
};
pub use validation::{
    ApplyRequest, CreateCandidateRequest, CreateJobRequest, ListApplicationsQuery,
    ListApplicationsRequest, ValidationError,
};
