use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::registry::domain::{
    Dependent, DependentDraft, DependentFields, DependentId, Enrollee, EnrolleeDraft,
    EnrolleeFields, EnrolleeId,
};
use crate::registry::router::enrollment_router;
use crate::registry::service::EnrollmentService;
use crate::registry::store::{DependentStore, EnrolleeStore, StoreError};

pub(super) fn enrollee_draft() -> EnrolleeDraft {
    EnrolleeDraft {
        name: Some("Alice Johnson".to_string()),
        activation_status: Some(true),
        birth_date: Some("1985-04-12".to_string()),
        phone_number: Some("+15155550134".to_string()),
    }
}

pub(super) fn dependent_draft() -> DependentDraft {
    DependentDraft {
        name: Some("Ben Johnson".to_string()),
        birth_date: Some("2012-09-30".to_string()),
    }
}

pub(super) fn build_service() -> (
    EnrollmentService<MemoryEnrollees, MemoryDependents>,
    Arc<MemoryEnrollees>,
    Arc<MemoryDependents>,
) {
    let enrollees = Arc::new(MemoryEnrollees::default());
    let dependents = Arc::new(MemoryDependents::default());
    let service = EnrollmentService::new(enrollees.clone(), dependents.clone());
    (service, enrollees, dependents)
}

pub(super) fn router_with_service(
    service: EnrollmentService<MemoryEnrollees, MemoryDependents>,
) -> axum::Router {
    enrollment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) struct MemoryEnrollees {
    records: Mutex<BTreeMap<EnrolleeId, Enrollee>>,
    sequence: AtomicU64,
}

impl Default for MemoryEnrollees {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            sequence: AtomicU64::new(1),
        }
    }
}

impl MemoryEnrollees {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("enrollee mutex poisoned").len()
    }
}

impl EnrolleeStore for MemoryEnrollees {
    fn insert(&self, fields: EnrolleeFields) -> Result<Enrollee, StoreError> {
        let id = EnrolleeId(self.sequence.fetch_add(1, Ordering::Relaxed));
        let enrollee = fields.into_enrollee(id);
        self.records
            .lock()
            .expect("enrollee mutex poisoned")
            .insert(id, enrollee.clone());
        Ok(enrollee)
    }

    fn fetch(&self, id: EnrolleeId) -> Result<Option<Enrollee>, StoreError> {
        let guard = self.records.lock().expect("enrollee mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Enrollee>, StoreError> {
        let guard = self.records.lock().expect("enrollee mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn update(&self, id: EnrolleeId, fields: EnrolleeFields) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("enrollee mutex poisoned");
        match guard.get_mut(&id) {
            Some(existing) => {
                *existing = fields.into_enrollee(id);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn remove(&self, id: EnrolleeId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("enrollee mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

pub(super) struct MemoryDependents {
    records: Mutex<BTreeMap<DependentId, Dependent>>,
    sequence: AtomicU64,
}

impl Default for MemoryDependents {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            sequence: AtomicU64::new(1),
        }
    }
}

impl MemoryDependents {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("dependent mutex poisoned").len()
    }
}

impl DependentStore for MemoryDependents {
    fn insert(
        &self,
        owner: EnrolleeId,
        fields: DependentFields,
    ) -> Result<Dependent, StoreError> {
        let id = DependentId(self.sequence.fetch_add(1, Ordering::Relaxed));
        let dependent = fields.into_dependent(id, owner);
        self.records
            .lock()
            .expect("dependent mutex poisoned")
            .insert(id, dependent.clone());
        Ok(dependent)
    }

    fn fetch(&self, id: DependentId) -> Result<Option<Dependent>, StoreError> {
        let guard = self.records.lock().expect("dependent mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list_for(&self, owner: EnrolleeId) -> Result<Vec<Dependent>, StoreError> {
        let guard = self.records.lock().expect("dependent mutex poisoned");
        Ok(guard
            .values()
            .filter(|dependent| dependent.enrollee_id == owner)
            .cloned()
            .collect())
    }

    fn update(
        &self,
        id: DependentId,
        owner: EnrolleeId,
        fields: DependentFields,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("dependent mutex poisoned");
        match guard.get_mut(&id) {
            Some(existing) => {
                *existing = fields.into_dependent(id, owner);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn remove(&self, id: DependentId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("dependent mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

/// Double asserting that the dependent store is never consulted. Every call
/// panics, so a parent-first check that leaks through fails loudly.
pub(super) struct UntouchableDependents;

impl DependentStore for UntouchableDependents {
    fn insert(
        &self,
        _owner: EnrolleeId,
        _fields: DependentFields,
    ) -> Result<Dependent, StoreError> {
        panic!("dependent store must not be reached");
    }

    fn fetch(&self, _id: DependentId) -> Result<Option<Dependent>, StoreError> {
        panic!("dependent store must not be reached");
    }

    fn list_for(&self, _owner: EnrolleeId) -> Result<Vec<Dependent>, StoreError> {
        panic!("dependent store must not be reached");
    }

    fn update(
        &self,
        _id: DependentId,
        _owner: EnrolleeId,
        _fields: DependentFields,
    ) -> Result<(), StoreError> {
        panic!("dependent store must not be reached");
    }

    fn remove(&self, _id: DependentId) -> Result<(), StoreError> {
        panic!("dependent store must not be reached");
    }
}

pub(super) struct UnavailableEnrollees;

impl EnrolleeStore for UnavailableEnrollees {
    fn insert(&self, _fields: EnrolleeFields) -> Result<Enrollee, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: EnrolleeId) -> Result<Option<Enrollee>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Enrollee>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _id: EnrolleeId, _fields: EnrolleeFields) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: EnrolleeId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}
