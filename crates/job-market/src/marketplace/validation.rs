use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationStatus, CandidateId, JobId, NewCandidate, NewJob};
use super::ranking::PageRequest;
use crate::config::ListingConfig;

const MAX_LANGUAGE_SCORE: i64 = 100;

/// A single rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Malformed or out-of-range input, reported before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// Body or query that could not be decoded at all.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::field("body", detail)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect();
        f.write_str(&joined.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    fn text(&mut self, field: &str, value: Option<String>, message: &str) -> String {
        match value.map(|raw| raw.trim().to_string()) {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => {
                self.push(field, message);
                String::new()
            }
        }
    }

    fn non_negative(&mut self, field: &str, value: Option<i64>, message: &str) -> u32 {
        match value.map(u32::try_from) {
            Some(Ok(parsed)) => parsed,
            Some(Err(_)) => {
                self.push(field, message);
                0
            }
            None => {
                self.push(field, "Required");
                0
            }
        }
    }

    fn score(&mut self, field: &str, value: Option<i64>, label: &str) -> u8 {
        match value {
            Some(raw) if raw < 0 => {
                self.push(field, &format!("{label} must be at least 0"));
                0
            }
            Some(raw) if raw > MAX_LANGUAGE_SCORE => {
                self.push(field, &format!("{label} cannot exceed 100"));
                0
            }
            Some(raw) => raw as u8,
            None => {
                self.push(field, "Required");
                0
            }
        }
    }

    fn positive_id(&mut self, field: &str, value: Option<i64>) -> u64 {
        match value {
            Some(raw) if raw > 0 => raw as u64,
            Some(_) => {
                self.push(field, "Must be a positive integer");
                0
            }
            None => {
                self.push(field, "Required");
                0
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }
}

/// `POST /candidates` payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidateRequest {
    pub name: Option<String>,
    pub skill: Option<String>,
    pub experience: Option<i64>,
    pub language_score: Option<i64>,
    #[serde(default)]
    pub documents_verified: bool,
}

impl CreateCandidateRequest {
    pub fn validate(self) -> Result<NewCandidate, ValidationError> {
        let mut issues = Issues::default();
        let name = issues.text("name", self.name, "Name is required");
        let skill = issues.text("skill", self.skill, "Skill is required");
        let experience = issues.non_negative(
            "experience",
            self.experience,
            "Experience must be a non-negative integer",
        );
        let language_score = issues.score("languageScore", self.language_score, "Language score");

        issues.finish(NewCandidate {
            name,
            skill,
            experience,
            language_score,
            documents_verified: self.documents_verified,
        })
    }
}

/// `POST /jobs` payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: Option<String>,
    pub country: Option<String>,
    pub min_experience: Option<i64>,
    pub min_language_score: Option<i64>,
}

impl CreateJobRequest {
    pub fn validate(self) -> Result<NewJob, ValidationError> {
        let mut issues = Issues::default();
        let title = issues.text("title", self.title, "Job title is required");
        let country = issues.text("country", self.country, "Country is required");
        let min_experience = issues.non_negative(
            "minExperience",
            self.min_experience,
            "Minimum experience must be a non-negative integer",
        );
        let min_language_score = issues.score(
            "minLanguageScore",
            self.min_language_score,
            "Minimum language score",
        );

        issues.finish(NewJob {
            title,
            country,
            min_experience,
            min_language_score,
        })
    }
}

/// `POST /applications` payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub candidate_id: Option<i64>,
    pub job_id: Option<i64>,
}

impl ApplyRequest {
    pub fn validate(self) -> Result<(CandidateId, JobId), ValidationError> {
        let mut issues = Issues::default();
        let candidate_id = issues.positive_id("candidateId", self.candidate_id);
        let job_id = issues.positive_id("jobId", self.job_id);
        issues.finish((CandidateId(candidate_id), JobId(job_id)))
    }
}

/// Raw `GET /applications` query string; every value arrives as text.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApplicationsQuery {
    pub job_id: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Validated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListApplicationsRequest {
    pub job_id: JobId,
    pub status: Option<ApplicationStatus>,
    pub page: PageRequest,
}

impl ListApplicationsQuery {
    pub fn validate(self, listing: &ListingConfig) -> Result<ListApplicationsRequest, ValidationError> {
        let mut issues = Issues::default();

        let job_id = match self.job_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match parse_positive(raw) {
                Some(id) => id,
                None => {
                    issues.push("jobId", "Must be a positive integer");
                    0
                }
            },
            _ => {
                issues.push("jobId", "Required");
                0
            }
        };

        let status = match self.status.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match raw.parse::<ApplicationStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    issues.push("status", "Must be one of ELIGIBLE, REJECTED, SHORTLISTED");
                    None
                }
            },
            _ => None,
        };

        let page = match self.page.as_deref() {
            Some(raw) => match parse_positive(raw).and_then(|value| u32::try_from(value).ok()) {
                Some(page) => page,
                None => {
                    issues.push("page", "Must be a positive integer");
                    1
                }
            },
            None => 1,
        };

        let limit = match self.limit.as_deref() {
            Some(raw) => match parse_positive(raw).and_then(|value| u32::try_from(value).ok()) {
                Some(limit) if limit <= listing.max_limit => limit,
                Some(_) => {
                    issues.push(
                        "limit",
                        &format!("Must not exceed {}", listing.max_limit),
                    );
                    listing.default_limit
                }
                None => {
                    issues.push("limit", "Must be a positive integer");
                    listing.default_limit
                }
            },
            None => listing.default_limit,
        };

        issues.finish(ListApplicationsRequest {
            job_id: JobId(job_id),
            status,
            page: PageRequest::new(page, limit),
        })
    }
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

/// Parse a numeric path segment such as `/applications/:id`.
pub fn parse_path_id(raw: &str, field: &str) -> Result<u64, ValidationError> {
    parse_positive(raw).ok_or_else(|| ValidationError::field(field, "Must be a positive integer"))
}
