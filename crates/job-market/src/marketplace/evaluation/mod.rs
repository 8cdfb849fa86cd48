mod policy;
mod rules;

pub use policy::{determine_eligibility, unmet_requirements, RequirementGap};
pub use rules::calculate_eligibility_score;

use super::domain::{ApplicationStatus, CandidateProfile, JobRequirement};
use serde::{Deserialize, Serialize};

/// Score, initial status, and the requirements that caused a rejection (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub eligibility_score: f64,
    pub status: ApplicationStatus,
    pub gaps: Vec<RequirementGap>,
}

impl EvaluationOutcome {
    pub fn summary(&self) -> String {
        if self.gaps.is_empty() {
            format!("eligible with score {:.1}", self.eligibility_score)
        } else {
            let reasons: Vec<String> = self.gaps.iter().map(ToString::to_string).collect();
            format!("rejected: {}", reasons.join("; "))
        }
    }
}

/// Score the candidate and classify the application against the job.
pub fn evaluate(candidate: &CandidateProfile, job: &JobRequirement) -> EvaluationOutcome {
    let eligibility_score = calculate_eligibility_score(
        candidate.experience,
        candidate.language_score,
        candidate.documents_verified,
    );
    let eligible = determine_eligibility(candidate, job);

    EvaluationOutcome {
        eligibility_score,
        status: ApplicationStatus::from_eligibility(eligible),
        gaps: unmet_requirements(candidate, job),
    }
}
