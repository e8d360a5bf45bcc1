//! Report Aggregator use cases: joined punch report, paged variant and
//! summary statistics, all under the same scope and date range.

use async_trait::async_trait;
use chrono::FixedOffset;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::clock::Clock;
use crate::domain::access::require_admin;
use crate::domain::report::assemble;
use crate::domain::{
    DateRange, Principal, PunchWithEmployee, ReportFilter, ReportRow, ReportStatistics,
    VisibilityScope,
};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait ReportService: Send + Sync {
    /// Every punch in scope and range, most recent first
    async fn build_report(
        &self,
        principal: &Principal,
        range: DateRange,
    ) -> AppResult<Vec<ReportRow>>;

    async fn build_report_page(
        &self,
        principal: &Principal,
        range: DateRange,
        pagination: PaginationParams,
    ) -> AppResult<Paginated<ReportRow>>;

    async fn statistics(
        &self,
        principal: &Principal,
        range: DateRange,
    ) -> AppResult<ReportStatistics>;
}

pub struct ReportAggregator<U: UnitOfWork> {
    uow: Arc<U>,
    clock: Arc<dyn Clock>,
    scope: VisibilityScope,
    offset: FixedOffset,
}

impl<U: UnitOfWork> ReportAggregator<U> {
    pub fn new(
        uow: Arc<U>,
        clock: Arc<dyn Clock>,
        scope: VisibilityScope,
        offset: FixedOffset,
    ) -> Self {
        Self {
            uow,
            clock,
            scope,
            offset,
        }
    }

    fn filter(&self, principal: &Principal, range: DateRange) -> AppResult<ReportFilter> {
        require_admin(principal)?;
        Ok(ReportFilter {
            scope: self.scope.resolve(principal),
            bounds: range.to_utc_bounds(self.offset)?,
        })
    }

    /// Resolve managers and build rows for already-loaded punches.
    async fn rows(&self, sources: Vec<PunchWithEmployee>) -> AppResult<Vec<ReportRow>> {
        let manager_ids: BTreeSet<_> = sources
            .iter()
            .filter_map(|s| s.employee.admin_id)
            .collect();
        let managers = self
            .uow
            .reports()
            .manager_names(manager_ids.into_iter().collect())
            .await?;

        let today = self.clock.now().with_timezone(&self.offset).date_naive();
        Ok(assemble(sources, &managers, today, self.offset))
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportAggregator<U> {
    async fn build_report(
        &self,
        principal: &Principal,
        range: DateRange,
    ) -> AppResult<Vec<ReportRow>> {
        let filter = self.filter(principal, range)?;
        let sources = self.uow.reports().punches(filter).await?;

        tracing::debug!(admin_id = %principal.id, rows = sources.len(), "Punch report built");
        self.rows(sources).await
    }

    async fn build_report_page(
        &self,
        principal: &Principal,
        range: DateRange,
        pagination: PaginationParams,
    ) -> AppResult<Paginated<ReportRow>> {
        let filter = self.filter(principal, range)?;
        let (sources, total) = self
            .uow
            .reports()
            .punches_page(filter, pagination.offset(), pagination.limit())
            .await?;

        let rows = self.rows(sources).await?;
        Ok(Paginated::new(rows, pagination.page(), pagination.limit(), total))
    }

    async fn statistics(
        &self,
        principal: &Principal,
        range: DateRange,
    ) -> AppResult<ReportStatistics> {
        let filter = self.filter(principal, range)?;
        self.uow.reports().statistics(filter).await
    }
}
