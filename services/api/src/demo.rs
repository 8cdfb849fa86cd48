use crate::infra::InMemoryStore;
use clap::Args;
use job_market::error::AppError;
use job_market::marketplace::{
    ApiResponse, ApplicationStatus, CreateCandidateRequest, CreateJobRequest, MarketplaceError,
    MarketplaceServices, PageRequest,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Page size used when printing the ranked applications
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: u32,
    /// Only print applications in this status (ELIGIBLE, REJECTED, SHORTLISTED)
    #[arg(long)]
    pub(crate) status: Option<ApplicationStatus>,
    /// Skip shortlisting the top-ranked applicant
    #[arg(long)]
    pub(crate) skip_shortlist: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            limit: 10,
            status: None,
            skip_shortlist: false,
        }
    }
}

struct SampleCandidate {
    name: &'static str,
    skill: &'static str,
    experience: i64,
    language_score: i64,
    documents_verified: bool,
}

const SAMPLE_CANDIDATES: [SampleCandidate; 4] = [
    SampleCandidate {
        name: "Priya Nair",
        skill: "Nursing",
        experience: 3,
        language_score: 70,
        documents_verified: true,
    },
    SampleCandidate {
        name: "Daniel Osei",
        skill: "Nursing",
        experience: 1,
        language_score: 55,
        documents_verified: false,
    },
    SampleCandidate {
        name: "Marta Silva",
        skill: "Nursing",
        experience: 6,
        language_score: 82,
        documents_verified: true,
    },
    SampleCandidate {
        name: "Kenji Ito",
        skill: "Nursing",
        experience: 8,
        language_score: 90,
        documents_verified: false,
    },
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryStore::default());
    let services = MarketplaceServices::new(store.clone(), store.clone(), store);

    let job = services.jobs.create(
        CreateJobRequest {
            title: Some("Registered Nurse".to_string()),
            country: Some("Germany".to_string()),
            min_experience: Some(2),
            min_language_score: Some(60),
        }
        .validate()
        .map_err(MarketplaceError::from)?,
    )?;
    println!("Posted job #{}: {} ({})", job.id, job.title, job.country);

    for sample in &SAMPLE_CANDIDATES {
        let candidate = services.candidates.create(
            CreateCandidateRequest {
                name: Some(sample.name.to_string()),
                skill: Some(sample.skill.to_string()),
                experience: Some(sample.experience),
                language_score: Some(sample.language_score),
                documents_verified: sample.documents_verified,
            }
            .validate()
            .map_err(MarketplaceError::from)?,
        )?;
        let application = services.applications.apply(candidate.id, job.id)?;
        println!(
            "  {:<12} score {:>5.1}  {}",
            candidate.name, application.eligibility_score, application.status
        );
    }

    if !args.skip_shortlist {
        let top = services.applications.list_for_job(
            job.id,
            Some(ApplicationStatus::Eligible),
            PageRequest::new(1, 1),
        )?;
        if let Some(best) = top.applications.first() {
            let shortlisted = services.applications.shortlist(best.id)?;
            println!(
                "Shortlisted application #{} ({})",
                shortlisted.id, shortlisted.candidate.name
            );
        }
    }

    let ranked = services.applications.list_for_job(
        job.id,
        args.status,
        PageRequest::new(1, args.limit.max(1)),
    )?;
    let envelope = ApiResponse::paginated(ranked.applications, ranked.meta);
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}
