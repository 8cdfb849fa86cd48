//! Job marketplace backend: candidates apply to jobs, applications are scored and classified,
//! and recruiters list ranked applications and shortlist eligible ones.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
