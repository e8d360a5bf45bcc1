//! Punch Ledger use cases.

use async_trait::async_trait;
use chrono::FixedOffset;
use std::sync::Arc;

use super::clock::Clock;
use crate::domain::access::require_employee;
use crate::domain::punch::day_bounds;
use crate::domain::{Principal, PunchRecord};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait PunchService: Send + Sync {
    /// Stamp a punch for the calling employee at the current server time.
    /// Every call inserts a new row; there is no pairing or dedup.
    async fn register(&self, principal: &Principal) -> AppResult<PunchRecord>;

    /// The caller's punches in the current local day, oldest first
    async fn list_today(&self, principal: &Principal) -> AppResult<Vec<PunchRecord>>;
}

pub struct PunchLedger<U: UnitOfWork> {
    uow: Arc<U>,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl<U: UnitOfWork> PunchLedger<U> {
    pub fn new(uow: Arc<U>, clock: Arc<dyn Clock>, offset: FixedOffset) -> Self {
        Self { uow, clock, offset }
    }
}

#[async_trait]
impl<U: UnitOfWork> PunchService for PunchLedger<U> {
    async fn register(&self, principal: &Principal) -> AppResult<PunchRecord> {
        require_employee(principal)?;

        let punch = self
            .uow
            .punches()
            .create(principal.id, self.clock.now())
            .await?;

        tracing::info!(user_id = %principal.id, punch_id = %punch.id, "Punch registered");
        Ok(punch)
    }

    async fn list_today(&self, principal: &Principal) -> AppResult<Vec<PunchRecord>> {
        require_employee(principal)?;

        let (start, end) = day_bounds(self.clock.now(), self.offset)?;
        self.uow.punches().list_between(principal.id, start, end).await
    }
}
