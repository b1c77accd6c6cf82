use std::sync::Arc;

use tracing::debug;

use super::domain::{Dependent, DependentDraft, DependentId, Enrollee, EnrolleeDraft, EnrolleeId};
use super::store::{DependentStore, EnrolleeStore, StoreError};
use super::validation::{validate_dependent, validate_enrollee, FieldViolations};

/// Service composing payload validation with the enrollee and dependent
/// stores. Holds no per-request state; handlers share one instance.
pub struct EnrollmentService<E, D> {
    enrollees: Arc<E>,
    dependents: Arc<D>,
}

impl<E, D> EnrollmentService<E, D>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    pub fn new(enrollees: Arc<E>, dependents: Arc<D>) -> Self {
        Self {
            enrollees,
            dependents,
        }
    }

    pub fn list_enrollees(&self) -> Result<Vec<Enrollee>, EnrollmentError> {
        Ok(self.enrollees.list()?)
    }

    pub fn fetch_enrollee(&self, id: EnrolleeId) -> Result<Enrollee, EnrollmentError> {
        self.enrollee_or_not_found(id)
    }

    /// Validate and persist a new enrollee. The store assigns the id.
    pub fn create_enrollee(&self, draft: EnrolleeDraft) -> Result<Enrollee, EnrollmentError> {
        let fields = validate_enrollee(&draft).map_err(EnrollmentError::Validation)?;
        let enrollee = self.enrollees.insert(fields)?;
        debug!(id = %enrollee.id, "enrollee created");
        Ok(enrollee)
    }

    /// Replace the fields of an existing enrollee. The id is untouched.
    pub fn update_enrollee(
        &self,
        id: EnrolleeId,
        draft: EnrolleeDraft,
    ) -> Result<(), EnrollmentError> {
        let fields = validate_enrollee(&draft).map_err(EnrollmentError::Validation)?;
        self.enrollee_or_not_found(id)?;
        self.enrollees.update(id, fields).map_err(|err| match err {
            StoreError::NotFound => EnrollmentError::EnrolleeNotFound(id),
            other => EnrollmentError::Store(other),
        })
    }

    pub fn delete_enrollee(&self, id: EnrolleeId) -> Result<(), EnrollmentError> {
        self.enrollee_or_not_found(id)?;
        let removed = self.enrollees.remove(id).map_err(|err| match err {
            StoreError::NotFound => EnrollmentError::EnrolleeNotFound(id),
            other => EnrollmentError::Store(other),
        });
        if removed.is_ok() {
            debug!(id = %id, "enrollee deleted");
        }
        removed
    }

    /// List the dependents covered under an enrollee. The parent must
    /// resolve before the dependent store is consulted.
    pub fn list_dependents(&self, owner: EnrolleeId) -> Result<Vec<Dependent>, EnrollmentError> {
        self.enrollee_or_not_found(owner)?;
        Ok(self.dependents.list_for(owner)?)
    }

    pub fn fetch_dependent(
        &self,
        owner: EnrolleeId,
        id: DependentId,
    ) -> Result<Dependent, EnrollmentError> {
        self.enrollee_or_not_found(owner)?;
        self.dependents
            .fetch(id)?
            .ok_or(EnrollmentError::DependentNotFound(id))
    }

    /// Validate and persist a new dependent under `owner`. Any owner
    /// reference in the payload is ignored; the resolved path id wins.
    pub fn create_dependent(
        &self,
        owner: EnrolleeId,
        draft: DependentDraft,
    ) -> Result<Dependent, EnrollmentError> {
        let fields = validate_dependent(&draft).map_err(EnrollmentError::Validation)?;
        self.enrollee_or_not_found(owner)?;
        let dependent = self.dependents.insert(owner, fields)?;
        debug!(id = %dependent.id, enrollee = %owner, "dependent created");
        Ok(dependent)
    }

    pub fn update_dependent(
        &self,
        owner: EnrolleeId,
        id: DependentId,
        draft: DependentDraft,
    ) -> Result<(), EnrollmentError> {
        let fields = validate_dependent(&draft).map_err(EnrollmentError::Validation)?;
        self.enrollee_or_not_found(owner)?;
        self.dependents
            .fetch(id)?
            .ok_or(EnrollmentError::DependentNotFound(id))?;
        self.dependents
            .update(id, owner, fields)
            .map_err(|err| match err {
                StoreError::NotFound => EnrollmentError::DependentNotFound(id),
                other => EnrollmentError::Store(other),
            })
    }

    pub fn delete_dependent(
        &self,
        owner: EnrolleeId,
        id: DependentId,
    ) -> Result<(), EnrollmentError> {
        self.enrollee_or_not_found(owner)?;
        self.dependents
            .fetch(id)?
            .ok_or(EnrollmentError::DependentNotFound(id))?;
        self.dependents.remove(id).map_err(|err| match err {
            StoreError::NotFound => EnrollmentError::DependentNotFound(id),
            other => EnrollmentError::Store(other),
        })
    }

    fn enrollee_or_not_found(&self, id: EnrolleeId) -> Result<Enrollee, EnrollmentError> {
        self.enrollees
            .fetch(id)?
            .ok_or(EnrollmentError::EnrolleeNotFound(id))
    }
}

/// Error raised by enrollment operations. The `Display` text of the
/// not-found variants is the exact 404 response body.
#[derive(Debug, thiserror::Error)]
pub enum EnrollmentError {
    #[error("Enrollee not found with ID {0}")]
    EnrolleeNotFound(EnrolleeId),
    #[error("Dependent not found with ID {0}")]
    DependentNotFound(DependentId),
    #[error("payload failed field validation")]
    Validation(FieldViolations),
    #[error(transparent)]
    Store(#[from] StoreError),
}
