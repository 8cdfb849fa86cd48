use super::domain::ApplicationStatus;

/// Outcome of a permitted shortlist request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortlistTransition {
    /// `ELIGIBLE -> SHORTLISTED`; the new status must be written.
    Promote,
    /// Already shortlisted; nothing to write.
    AlreadyShortlisted,
}

/// Business-rule violation raised by a forbidden status change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Cannot shortlist a {from} candidate")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
}

/// Decide what a shortlist request does to an application in `current` status.
///
/// Must be evaluated against a freshly read status.
pub fn shortlist_transition(
    current: ApplicationStatus,
) -> Result<ShortlistTransition, LifecycleError> {
    match current {
        ApplicationStatus::Eligible => Ok(ShortlistTransition::Promote),
        ApplicationStatus::Shortlisted => Ok(ShortlistTransition::AlreadyShortlisted),
        ApplicationStatus::Rejected => Err(LifecycleError::InvalidTransition {
            from: current,
            to: ApplicationStatus::Shortlisted,
        }),
    }
}
