//! Outbound ports
//!
//! Interfaces for the intake collaborators: the patient record store and
//! the file-storage backend. Infrastructure provides the implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{DocumentRef, Patient};
use care_common::EntityId;

/// Patient record store.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Persist a newly registered patient and return the created record id.
    ///
    /// Idempotency is NOT guaranteed: retrying a failed call may create a
    /// duplicate record. Callers must not retry blindly.
    async fn create(&self, patient: &Patient) -> Result<EntityId, RepositoryError>;

    /// Find the patient registered by a given user.
    async fn find_by_user(&self, user_id: &EntityId) -> Result<Option<Patient>, RepositoryError>;
}

/// File-storage backend for identification documents.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(&self, payload: UploadPayload) -> Result<DocumentRef, StorageError>;
}

/// Multipart upload payload for a scanned identification document.
///
/// Wire part names are `blobFile` and `fileName`; a registration without a
/// document never constructs this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadPayload {
    #[serde(rename = "blobFile")]
    pub blob_file: Vec<u8>,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("duplicate record: {0}")]
    Duplicate(String),
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
}
