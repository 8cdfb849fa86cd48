use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u64);

/// Identifier wrapper for posted jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub u64);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub u64);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Candidate attributes consumed by scoring. Treated as immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub id: CandidateId,
    pub name: String,
    pub skill: String,
    /// Years of experience.
    pub experience: u32,
    /// Language test result in `0..=100`.
    pub language_score: u8,
    pub documents_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Minimum thresholds a candidate must meet to be eligible for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirement {
    pub id: JobId,
    pub title: String,
    pub country: String,
    pub min_experience: u32,
    pub min_language_score: u8,
    pub created_at: DateTime<Utc>,
}

/// Status tracked for every application. There is no pending state: applications are
/// classified the moment they are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Eligible,
    Rejected,
    Shortlisted,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Eligible => "ELIGIBLE",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
        }
    }

    /// Initial classification assigned at creation.
    pub const fn from_eligibility(eligible: bool) -> Self {
        if eligible {
            ApplicationStatus::Eligible
        } else {
            ApplicationStatus::Rejected
        }
    }

    /// Eligible and shortlisted applications share the top sort tier.
    pub const fn is_eligible_tier(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Eligible | ApplicationStatus::Shortlisted
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a status string does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ELIGIBLE" => Ok(ApplicationStatus::Eligible),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            "SHORTLISTED" => Ok(ApplicationStatus::Shortlisted),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// A persisted application, always carried with the applicant's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    /// Computed once at creation and never recomputed.
    pub eligibility_score: f64,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub candidate: CandidateProfile,
}

/// Validated candidate attributes ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub name: String,
    pub skill: String,
    pub experience: u32,
    pub language_score: u8,
    pub documents_verified: bool,
}

/// Validated job requirement ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub country: String,
    pub min_experience: u32,
    pub min_language_score: u8,
}

/// Application row handed to persistence once scoring has run.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub eligibility_score: f64,
    pub status: ApplicationStatus,
}
