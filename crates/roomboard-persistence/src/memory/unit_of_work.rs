//! In-memory unit of work
//!
//! The memory backend applies repository writes immediately, so the unit of
//! work's job here is the serialization protocol: in `Serializable` mode an
//! exclusive gate is held from `begin` until `save_changes` or `rollback`,
//! which makes a competing writer's overlap check wait until the first
//! transaction is done. Units of work sharing one gate serialize against
//! each other.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

use roomboard_domain::{
    errors::DomainResult,
    repositories::{IsolationLevel, UnitOfWork},
};

use crate::error::PersistenceError;

/// Gate shared between units of work that must serialize with each other
pub type WriteGate = Arc<AsyncMutex<()>>;

/// Create a gate to share across units of work
pub fn write_gate() -> WriteGate {
    Arc::new(AsyncMutex::new(()))
}

struct ActiveTransaction {
    isolation: IsolationLevel,
    // Dropping the guard releases the gate.
    _guard: Option<OwnedMutexGuard<()>>,
}

/// In-memory implementation of the UnitOfWork contract
pub struct InMemoryUnitOfWork {
    gate: WriteGate,
    active: Mutex<Option<ActiveTransaction>>,
}

impl InMemoryUnitOfWork {
    /// Create a unit of work with its own private gate
    pub fn new() -> Self {
        Self::with_gate(write_gate())
    }

    /// Create a unit of work serializing on a shared gate
    pub fn with_gate(gate: WriteGate) -> Self {
        Self {
            gate,
            active: Mutex::new(None),
        }
    }

    /// Whether a transaction is currently open (for testing)
    pub fn in_transaction(&self) -> bool {
        self.active.lock().is_some()
    }
}

impl Default for InMemoryUnitOfWork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn begin(&self, isolation: IsolationLevel) -> DomainResult<()> {
        let guard = if isolation == IsolationLevel::Serializable {
            // Waits until any other serializable transaction on this gate
            // commits or rolls back.
            Some(self.gate.clone().lock_owned().await)
        } else {
            None
        };

        let mut active = self.active.lock();
        if active.is_some() {
            return Err(PersistenceError::Transaction(
                "transaction already active".into(),
            )
            .into());
        }
        debug!(?isolation, "transaction started");
        *active = Some(ActiveTransaction {
            isolation,
            _guard: guard,
        });
        Ok(())
    }

    async fn save_changes(&self) -> DomainResult<()> {
        let txn = self.active.lock().take();
        match txn {
            Some(txn) => {
                debug!(isolation = ?txn.isolation, "transaction committed");
                Ok(())
            }
            None => {
                Err(PersistenceError::Transaction("no active transaction".into()).into())
            }
        }
    }

    async fn rollback(&self) -> DomainResult<()> {
        let txn = self.active.lock().take();
        match txn {
            Some(txn) => {
                debug!(isolation = ?txn.isolation, "transaction rolled back");
                Ok(())
            }
            None => {
                Err(PersistenceError::Transaction("no active transaction".into()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_begin_commit_cycle() {
        let uow = InMemoryUnitOfWork::new();
        assert!(!uow.in_transaction());

        uow.begin(IsolationLevel::Serializable).await.unwrap();
        assert!(uow.in_transaction());

        uow.save_changes().await.unwrap();
        assert!(!uow.in_transaction());
    }

    #[tokio::test]
    async fn test_commit_without_begin_fails() {
        let uow = InMemoryUnitOfWork::new();
        assert!(uow.save_changes().await.is_err());
        assert!(uow.rollback().await.is_err());
    }

    #[tokio::test]
    async fn test_rollback_releases_gate() {
        let gate = write_gate();
        let a = InMemoryUnitOfWork::with_gate(gate.clone());
        let b = InMemoryUnitOfWork::with_gate(gate);

        a.begin(IsolationLevel::Serializable).await.unwrap();
        a.rollback().await.unwrap();

        // Gate is free again; this begin must not hang.
        b.begin(IsolationLevel::Serializable).await.unwrap();
        b.save_changes().await.unwrap();
    }

    #[tokio::test]
    async fn test_serializable_transactions_exclude_each_other() {
        let gate = write_gate();
        let first = Arc::new(InMemoryUnitOfWork::with_gate(gate.clone()));
        let second = Arc::new(InMemoryUnitOfWork::with_gate(gate));

        first.begin(IsolationLevel::Serializable).await.unwrap();

        let second_clone = Arc::clone(&second);
        let waiter = tokio::spawn(async move {
            second_clone.begin(IsolationLevel::Serializable).await.unwrap();
            second_clone.save_changes().await.unwrap();
        });

        // The second transaction cannot start while the first is open.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        first.save_changes().await.unwrap();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_read_committed_does_not_take_gate() {
        let gate = write_gate();
        let a = InMemoryUnitOfWork::with_gate(gate.clone());
        let b = InMemoryUnitOfWork::with_gate(gate);

        a.begin(IsolationLevel::Serializable).await.unwrap();
        // Non-serializable reader proceeds without waiting on the gate.
        b.begin(IsolationLevel::ReadCommitted).await.unwrap();
        b.save_changes().await.unwrap();
        a.save_changes().await.unwrap();
    }
}
