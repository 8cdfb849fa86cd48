use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationStatus};

/// One-based page selection. Callers validate that both values are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }
}

/// Pagination metadata returned alongside list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    /// Matches after filtering, before slicing.
    pub total: usize,
    pub total_pages: usize,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total: usize) -> Self {
        let total_pages = if request.limit == 0 {
            0
        } else {
            total.div_ceil(request.limit as usize)
        };

        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
        }
    }
}

/// A single page of ranked applications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPage {
    pub applications: Vec<Application>,
    pub meta: PaginationMeta,
}

fn status_priority(status: ApplicationStatus) -> u8 {
    u8::from(status.is_eligible_tier())
}

/// Descending by status tier, then eligibility score, then candidate experience.
pub(crate) fn compare_for_ranking(a: &Application, b: &Application) -> Ordering {
    status_priority(b.status)
        .cmp(&status_priority(a.status))
        .then_with(|| b.eligibility_score.total_cmp(&a.eligibility_score))
        .then_with(|| b.candidate.experience.cmp(&a.candidate.experience))
}

/// Filter by exact status, rank, and cut out the requested page.
///
/// The sort is stable: applications tying on every key keep their input order, so repeated
/// calls over the same input yield the same page.
pub fn rank_applications(
    applications: Vec<Application>,
    filter: Option<ApplicationStatus>,
    page: PageRequest,
) -> RankedPage {
    let mut ranked: Vec<Application> = match filter {
        Some(status) => applications
            .into_iter()
            .filter(|application| application.status == status)
            .collect(),
        None => applications,
    };

    ranked.sort_by(compare_for_ranking);

    let total = ranked.len();
    let applications = ranked
        .into_iter()
        .skip(page.offset())
        .take(page.limit as usize)
        .collect();

    RankedPage {
        applications,
        meta: PaginationMeta::new(page, total),
    }
}
