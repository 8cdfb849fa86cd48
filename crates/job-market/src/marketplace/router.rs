use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::{get, patch},
    Json, Router,
};

use super::domain::{ApplicationId, CandidateId, JobId};
use super::repository::{ApplicationRepository, CandidateRepository, JobRepository};
use super::response::{respond, ApiResponse};
use super::service::{MarketplaceError, MarketplaceServices};
use super::validation::{
    parse_path_id, ApplyRequest, CreateCandidateRequest, CreateJobRequest, ListApplicationsQuery,
    ValidationError,
};

type Services<C, J, A> = State<Arc<MarketplaceServices<C, J, A>>>;
type HandlerResult = Result<Response, MarketplaceError>;

/// Router builder exposing candidate, job, and application endpoints.
pub fn marketplace_router<C, J, A>(services: Arc<MarketplaceServices<C, J, A>>) -> Router
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/candidates",
            get(list_candidates_handler::<C, J, A>).post(create_candidate_handler::<C, J, A>),
        )
        .route("/candidates/:id", get(get_candidate_handler::<C, J, A>))
        .route(
            "/jobs",
            get(list_jobs_handler::<C, J, A>).post(create_job_handler::<C, J, A>),
        )
        .route("/jobs/:id", get(get_job_handler::<C, J, A>))
        .route(
            "/applications",
            get(list_applications_handler::<C, J, A>).post(apply_handler::<C, J, A>),
        )
        .route(
            "/applications/:id/shortlist",
            patch(shortlist_handler::<C, J, A>),
        )
        .with_state(services)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ValidationError::malformed(rejection.body_text()))
}

pub(crate) async fn create_candidate_handler<C, J, A>(
    State(services): Services<C, J, A>,
    payload: Result<Json<CreateCandidateRequest>, JsonRejection>,
) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let candidate = body(payload)?.validate()?;
    let stored = services.candidates.create(candidate)?;
    Ok(respond(StatusCode::CREATED, ApiResponse::ok(stored)))
}

pub(crate) async fn list_candidates_handler<C, J, A>(
    State(services): Services<C, J, A>,
) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let candidates = services.candidates.list()?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(candidates)))
}

pub(crate) async fn get_candidate_handler<C, J, A>(
    State(services): Services<C, J, A>,
    Path(raw_id): Path<String>,
) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let id = CandidateId(parse_path_id(&raw_id, "id")?);
    let candidate = services.candidates.get(id)?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(candidate)))
}

pub(crate) async fn create_job_handler<C, J, A>(
    State(services): Services<C, J, A>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let job = body(payload)?.validate()?;
    let stored = services.jobs.create(job)?;
    Ok(respond(StatusCode::CREATED, ApiResponse::ok(stored)))
}

pub(crate) async fn list_jobs_handler<C, J, A>(State(services): Services<C, J, A>) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let jobs = services.jobs.list()?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(jobs)))
}

pub(crate) async fn get_job_handler<C, J, A>(
    State(services): Services<C, J, A>,
    Path(raw_id): Path<String>,
) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let id = JobId(parse_path_id(&raw_id, "id")?);
    let job = services.jobs.get(id)?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(job)))
}

pub(crate) async fn apply_handler<C, J, A>(
    State(services): Services<C, J, A>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let (candidate_id, job_id) = body(payload)?.validate()?;
    let application = services.applications.apply(candidate_id, job_id)?;
    Ok(respond(StatusCode::CREATED, ApiResponse::ok(application)))
}

pub(crate) async fn list_applications_handler<C, J, A>(
    State(services): Services<C, J, A>,
    query: Result<Query<ListApplicationsQuery>, QueryRejection>,
) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let Query(query) =
        query.map_err(|rejection| ValidationError::field("query", rejection.body_text()))?;
    let request = query.validate(&services.listing)?;

    let ranked = services
        .applications
        .list_for_job(request.job_id, request.status, request.page)?;
    Ok(respond(
        StatusCode::OK,
        ApiResponse::paginated(ranked.applications, ranked.meta),
    ))
}

pub(crate) async fn shortlist_handler<C, J, A>(
    State(services): Services<C, J, A>,
    Path(raw_id): Path<String>,
) -> HandlerResult
where
    C: CandidateRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let id = ApplicationId(parse_path_id(&raw_id, "id")?);
    let application = services.applications.shortlist(id)?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(application)))
}
