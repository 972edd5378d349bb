//! Application layer ports
//!
//! The transactional boundary is defined by the domain's `UnitOfWork`
//! contract; this module re-exports it together with a no-op
//! implementation for unit tests that do not exercise concurrency.

use async_trait::async_trait;

use roomboard_domain::errors::DomainResult;

pub use roomboard_domain::repositories::{IsolationLevel, UnitOfWork};

/// Unit of work that accepts every protocol call without side effects
pub struct NoOpUnitOfWork;

#[async_trait]
impl UnitOfWork for NoOpUnitOfWork {
    async fn begin(&self, _isolation: IsolationLevel) -> DomainResult<()> {
        Ok(())
    }

    async fn save_changes(&self) -> DomainResult<()> {
        Ok(())
    }

    async fn rollback(&self) -> DomainResult<()> {
        Ok(())
    }
}
