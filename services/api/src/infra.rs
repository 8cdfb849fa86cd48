use chrono::Utc;
use job_market::marketplace::{
    Application, ApplicationId, ApplicationRepository, ApplicationStatus, CandidateId,
    CandidateProfile, CandidateRepository, JobId, JobRepository, JobRequirement, NewApplication,
    NewCandidate, NewJob, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stored application row; the candidate is joined on read.
#[derive(Debug, Clone)]
struct ApplicationRow {
    candidate_id: CandidateId,
    job_id: JobId,
    eligibility_score: f64,
    status: ApplicationStatus,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    candidates: BTreeMap<CandidateId, CandidateProfile>,
    jobs: BTreeMap<JobId, JobRequirement>,
    applications: BTreeMap<ApplicationId, ApplicationRow>,
}

impl Tables {
    fn next_key<K, V>(map: &BTreeMap<K, V>, key: impl Fn(&K) -> u64) -> u64 {
        map.keys().next_back().map(key).unwrap_or(0) + 1
    }

    fn join(&self, id: ApplicationId, row: &ApplicationRow) -> Result<Application, RepositoryError> {
        let candidate = self
            .candidates
            .get(&row.candidate_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::MissingReference(format!("candidate {}", row.candidate_id))
            })?;

        Ok(Application {
            id,
            candidate_id: row.candidate_id,
            job_id: row.job_id,
            eligibility_score: row.eligibility_score,
            status: row.status,
            created_at: row.created_at,
            candidate,
        })
    }
}

/// Process-local persistence backing every repository trait.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl CandidateRepository for InMemoryStore {
    fn create(&self, candidate: NewCandidate) -> Result<CandidateProfile, RepositoryError> {
        let mut tables = self.lock()?;
        let id = CandidateId(Tables::next_key(&tables.candidates, |key| key.0));
        let profile = CandidateProfile {
            id,
            name: candidate.name,
            skill: candidate.skill,
            experience: candidate.experience,
            language_score: candidate.language_score,
            documents_verified: candidate.documents_verified,
            created_at: Utc::now(),
        };
        tables.candidates.insert(id, profile.clone());
        Ok(profile)
    }

    fn fetch(&self, id: CandidateId) -> Result<Option<CandidateProfile>, RepositoryError> {
        Ok(self.lock()?.candidates.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<CandidateProfile>, RepositoryError> {
        Ok(self.lock()?.candidates.values().rev().cloned().collect())
    }
}

impl JobRepository for InMemoryStore {
    fn create(&self, job: NewJob) -> Result<JobRequirement, RepositoryError> {
        let mut tables = self.lock()?;
        let id = JobId(Tables::next_key(&tables.jobs, |key| key.0));
        let requirement = JobRequirement {
            id,
            title: job.title,
            country: job.country,
            min_experience: job.min_experience,
            min_language_score: job.min_language_score,
            created_at: Utc::now(),
        };
        tables.jobs.insert(id, requirement.clone());
        Ok(requirement)
    }

    fn fetch(&self, id: JobId) -> Result<Option<JobRequirement>, RepositoryError> {
        Ok(self.lock()?.jobs.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<JobRequirement>, RepositoryError> {
        Ok(self.lock()?.jobs.values().rev().cloned().collect())
    }
}

impl ApplicationRepository for InMemoryStore {
    fn create(&self, application: NewApplication) -> Result<Application, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.jobs.contains_key(&application.job_id) {
            return Err(RepositoryError::MissingReference(format!(
                "job {}",
                application.job_id
            )));
        }

        let id = ApplicationId(Tables::next_key(&tables.applications, |key| key.0));
        let row = ApplicationRow {
            candidate_id: application.candidate_id,
            job_id: application.job_id,
            eligibility_score: application.eligibility_score,
            status: application.status,
            created_at: Utc::now(),
        };
        let joined = tables.join(id, &row)?;
        tables.applications.insert(id, row);
        Ok(joined)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let tables = self.lock()?;
        tables
            .applications
            .get(&id)
            .map(|row| tables.join(id, row))
            .transpose()
    }

    fn for_job(&self, job_id: JobId) -> Result<Vec<Application>, RepositoryError> {
        let tables = self.lock()?;
        tables
            .applications
            .iter()
            .filter(|(_, row)| row.job_id == job_id)
            .map(|(id, row)| tables.join(*id, row))
            .collect()
    }

    fn update_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, RepositoryError> {
        let mut tables = self.lock()?;
        let row = tables
            .applications
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        if row.status != expected {
            return Err(RepositoryError::StatusConflict {
                expected,
                found: row.status,
            });
        }
        row.status = next;
        let row = row.clone();
        tables.join(id, &row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::default();
        CandidateRepository::create(
            &store,
            NewCandidate {
                name: "Ada".to_string(),
                skill: "Masonry".to_string(),
                experience: 4,
                language_score: 65,
                documents_verified: true,
            },
        )
        .expect("candidate");
        JobRepository::create(
            &store,
            NewJob {
                title: "Mason".to_string(),
                country: "Austria".to_string(),
                min_experience: 2,
                min_language_score: 50,
            },
        )
        .expect("job");
        store
    }

    fn eligible_row() -> NewApplication {
        NewApplication {
            candidate_id: CandidateId(1),
            job_id: JobId(1),
            eligibility_score: 24.5,
            status: ApplicationStatus::Eligible,
        }
    }

    #[test]
    fn create_joins_candidate_and_assigns_sequential_ids() {
        let store = seeded();

        let first = ApplicationRepository::create(&store, eligible_row()).expect("first");
        let second = ApplicationRepository::create(&store, eligible_row()).expect("second");

        assert_eq!(first.id, ApplicationId(1));
        assert_eq!(second.id, ApplicationId(2));
        assert_eq!(first.candidate.name, "Ada");
        assert_eq!(store.for_job(JobId(1)).expect("listing").len(), 2);
        assert!(store.for_job(JobId(2)).expect("listing").is_empty());
    }

    #[test]
    fn create_requires_existing_references() {
        let store = seeded();
        let mut row = eligible_row();
        row.job_id = JobId(9);

        assert!(matches!(
            ApplicationRepository::create(&store, row),
            Err(RepositoryError::MissingReference(_))
        ));
    }

    #[test]
    fn update_status_is_conditional_on_expected_status() {
        let store = seeded();
        let created = ApplicationRepository::create(&store, eligible_row()).expect("created");

        let updated = store
            .update_status(
                created.id,
                ApplicationStatus::Eligible,
                ApplicationStatus::Shortlisted,
            )
            .expect("first write wins");
        assert_eq!(updated.status, ApplicationStatus::Shortlisted);

        match store.update_status(
            created.id,
            ApplicationStatus::Eligible,
            ApplicationStatus::Shortlisted,
        ) {
            Err(RepositoryError::StatusConflict { found, .. }) => {
                assert_eq!(found, ApplicationStatus::Shortlisted)
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        assert!(matches!(
            store.update_status(
                ApplicationId(40),
                ApplicationStatus::Eligible,
                ApplicationStatus::Shortlisted
            ),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn listings_are_newest_first() {
        let store = seeded();
        CandidateRepository::create(
            &store,
            NewCandidate {
                name: "Bo".to_string(),
                skill: "Masonry".to_string(),
                experience: 1,
                language_score: 40,
                documents_verified: false,
            },
        )
        .expect("second candidate");

        let names: Vec<String> = CandidateRepository::list(&store)
            .expect("list")
            .into_iter()
            .map(|candidate| candidate.name)
            .collect();
        assert_eq!(names, vec!["Bo".to_string(), "Ada".to_string()]);
    }
}
