use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use enrollment::registry::{
    Dependent, DependentFields, DependentId, DependentStore, Enrollee, EnrolleeFields, EnrolleeId,
    EnrolleeStore, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-process enrollee store. Records are kept in id order so collection
/// reads are stable; identifiers are assigned from a monotonic sequence.
pub(crate) struct InMemoryEnrolleeStore {
    records: Mutex<BTreeMap<EnrolleeId, Enrollee>>,
    sequence: AtomicU64,
}

impl Default for InMemoryEnrolleeStore {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            sequence: AtomicU64::new(1),
        }
    }
}

impl EnrolleeStore for InMemoryEnrolleeStore {
    fn insert(&self, fields: EnrolleeFields) -> Result<Enrollee, StoreError> {
        let mut guard = self.records.lock().expect("enrollee store mutex poisoned");
        let id = EnrolleeId(self.sequence.fetch_add(1, Ordering::Relaxed));
        let enrollee = fields.into_enrollee(id);
        guard.insert(id, enrollee.clone());
        Ok(enrollee)
    }

    fn fetch(&self, id: EnrolleeId) -> Result<Option<Enrollee>, StoreError> {
        let guard = self.records.lock().expect("enrollee store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Enrollee>, StoreError> {
        let guard = self.records.lock().expect("enrollee store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn update(&self, id: EnrolleeId, fields: EnrolleeFields) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("enrollee store mutex poisoned");
        match guard.get_mut(&id) {
            Some(existing) => {
                *existing = fields.into_enrollee(id);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn remove(&self, id: EnrolleeId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("enrollee store mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

/// In-process dependent store mirroring the enrollee adapter.
pub(crate) struct InMemoryDependentStore {
    records: Mutex<BTreeMap<DependentId, Dependent>>,
    sequence: AtomicU64,
}

impl Default for InMemoryDependentStore {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            sequence: AtomicU64::new(1),
        }
    }
}

impl DependentStore for InMemoryDependentStore {
    fn insert(&self, owner: EnrolleeId, fields: DependentFields) -> Result<Dependent, StoreError> {
        let mut guard = self.records.lock().expect("dependent store mutex poisoned");
        let id = DependentId(self.sequence.fetch_add(1, Ordering::Relaxed));
        let dependent = fields.into_dependent(id, owner);
        guard.insert(id, dependent.clone());
        Ok(dependent)
    }

    fn fetch(&self, id: DependentId) -> Result<Option<Dependent>, StoreError> {
        let guard = self.records.lock().expect("dependent store mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list_for(&self, owner: EnrolleeId) -> Result<Vec<Dependent>, StoreError> {
        let guard = self.records.lock().expect("dependent store mutex poisoned");
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
        let mut guard = self.records.lock().expect("dependent store mutex poisoned");
        match guard.get_mut(&id) {
            Some(existing) => {
                *existing = fields.into_dependent(id, owner);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn remove(&self, id: DependentId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("dependent store mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
