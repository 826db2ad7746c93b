// exegate-core/src/runtime/store.rs
// ============================================================================
// Module: Exegate In-Memory Store
// Description: Simple in-memory execution record store for tests and demos.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of
//! [`ExecutionStore`] for tests and local demos. It is not intended for
//! production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::identifiers::EnvelopeId;
use crate::core::identifiers::TenantId;
use crate::core::record::ExecutionRecord;
use crate::interfaces::ExecutionStore;
use crate::interfaces::InsertOutcome;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory execution record store for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct InMemoryExecutionStore {
    /// Record map protected by a mutex.
    records: Arc<Mutex<BTreeMap<String, ExecutionRecord>>>,
}

impl InMemoryExecutionStore {
    /// Creates a new in-memory execution store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self
            .records
            .lock()
            .map_err(|_| StoreError::Store("execution store mutex poisoned".to_string()))?
            .len())
    }

    /// Returns true when no records are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ExecutionStore for InMemoryExecutionStore {
    fn insert(&self, record: &ExecutionRecord) -> Result<InsertOutcome, StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Store("execution store mutex poisoned".to_string()))?;
        let key = record_key(&record.tenant_id, &record.envelope_id);
        if guard.contains_key(&key) {
            return Ok(InsertOutcome::Duplicate);
        }
        guard.insert(key, record.clone());
        Ok(InsertOutcome::Inserted)
    }

    fn get(
        &self,
        tenant_id: &TenantId,
        envelope_id: &EnvelopeId,
    ) -> Result<Option<ExecutionRecord>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Store("execution store mutex poisoned".to_string()))?;
        Ok(guard.get(&record_key(tenant_id, envelope_id)).cloned())
    }
}

/// Builds a unique record key for the in-memory store.
fn record_key(tenant_id: &TenantId, envelope_id: &EnvelopeId) -> String {
    format!("{tenant_id}/{envelope_id}")
}
