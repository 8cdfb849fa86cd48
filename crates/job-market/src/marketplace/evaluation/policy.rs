use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::{CandidateProfile, JobRequirement};

/// A single job requirement the candidate falls short of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "requirement", rename_all = "snake_case")]
pub enum RequirementGap {
    Experience { required: u32, actual: u32 },
    LanguageScore { required: u8, actual: u8 },
    DocumentsUnverified,
}

impl fmt::Display for RequirementGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementGap::Experience { required, actual } => {
                write!(f, "experience {actual} below minimum {required}")
            }
            RequirementGap::LanguageScore { required, actual } => {
                write!(f, "language score {actual} below minimum {required}")
            }
            RequirementGap::DocumentsUnverified => f.write_str("documents not verified"),
        }
    }
}

/// Every requirement the candidate fails; empty means eligible.
pub fn unmet_requirements(
    candidate: &CandidateProfile,
    job: &JobRequirement,
) -> Vec<RequirementGap> {
    let mut gaps = Vec::new();

    if candidate.experience < job.min_experience {
        gaps.push(RequirementGap::Experience {
            required: job.min_experience,
            actual: candidate.experience,
        });
    }

    if candidate.language_score < job.min_language_score {
        gaps.push(RequirementGap::LanguageScore {
            required: job.min_language_score,
            actual: candidate.language_score,
        });
    }

    if !candidate.documents_verified {
        gaps.push(RequirementGap::DocumentsUnverified);
    }

    gaps
}

/// True iff experience, language score, and document verification all meet the job's bar.
pub fn determine_eligibility(candidate: &CandidateProfile, job: &JobRequirement) -> bool {
    candidate.experience >= job.min_experience
        && candidate.language_score >= job.min_language_score
        && candidate.documents_verified
}
