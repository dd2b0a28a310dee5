//! In-memory infrastructure
//!
//! Port implementations backed by `DashMap`, used by tests and local runs.
//! Real deployments put the document database and file storage behind the
//! same ports.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::aggregates::{DocumentRef, Patient};
use crate::ports::{FileStore, PatientRepository, RepositoryError, StorageError, UploadPayload};
use care_common::EntityId;

/// In-memory patient store.
#[derive(Default)]
pub struct InMemoryPatientRepository {
    patients: DashMap<String, Patient>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn create(&self, patient: &Patient) -> Result<EntityId, RepositoryError> {
        let id = patient.id().clone();
        self.patients.insert(id.to_string(), patient.clone());
        Ok(id)
    }

    async fn find_by_user(&self, user_id: &EntityId) -> Result<Option<Patient>, RepositoryError> {
        Ok(self
            .patients
            .iter()
            .find(|entry| entry.value().user_id() == user_id)
            .map(|entry| entry.value().clone()))
    }
}

/// In-memory file store; remembers every upload so tests can assert on the
/// outgoing payloads.
#[derive(Default)]
pub struct InMemoryFileStore {
    uploads: DashMap<String, UploadPayload>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.len()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn upload(&self, payload: UploadPayload) -> Result<DocumentRef, StorageError> {
        let id = EntityId::new();
        let document = DocumentRef {
            url: format!("memory://files/{id}"),
            file_name: payload.file_name.clone(),
            id: id.clone(),
        };
        self.uploads.insert(id.to_string(), payload);
        Ok(document)
    }
}
