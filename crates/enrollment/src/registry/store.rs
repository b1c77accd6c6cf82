use super::domain::{
    Dependent, DependentFields, DependentId, Enrollee, EnrolleeFields, EnrolleeId,
};

/// Storage abstraction for enrollees so the service and router can be
/// exercised against swappable adapters.
///
/// `insert` assigns the identifier; `update` replaces every mutable field of
/// the addressed record. Atomicity per call is the adapter's responsibility.
pub trait EnrolleeStore: Send + Sync {
    fn insert(&self, fields: EnrolleeFields) -> Result<Enrollee, StoreError>;
    fn fetch(&self, id: EnrolleeId) -> Result<Option<Enrollee>, StoreError>;
    fn list(&self) -> Result<Vec<Enrollee>, StoreError>;
    fn update(&self, id: EnrolleeId, fields: EnrolleeFields) -> Result<(), StoreError>;
    fn remove(&self, id: EnrolleeId) -> Result<(), StoreError>;
}

/// Storage abstraction for dependents, scoped by the owning enrollee.
pub trait DependentStore: Send + Sync {
    fn insert(&self, owner: EnrolleeId, fields: DependentFields)
        -> Result<Dependent, StoreError>;
    fn fetch(&self, id: DependentId) -> Result<Option<Dependent>, StoreError>;
    fn list_for(&self, owner: EnrolleeId) -> Result<Vec<Dependent>, StoreError>;
    fn update(
        &self,
        id: DependentId,
        owner: EnrolleeId,
        fields: DependentFields,
    ) -> Result<(), StoreError>;
    fn remove(&self, id: DependentId) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
