//! Enrollee and dependent registry: domain records, payload validation,
//! store abstractions, the enrollment service, and its HTTP router.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Dependent, DependentDraft, DependentFields, DependentId, Enrollee, EnrolleeDraft,
    EnrolleeFields, EnrolleeId,
};
pub use router::enrollment_router;
pub use service::{EnrollmentError, EnrollmentService};
pub use store::{DependentStore, EnrolleeStore, StoreError};
pub use validation::{validate_dependent, validate_enrollee, FieldViolations};
