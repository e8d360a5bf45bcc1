//! Report Aggregator core.
//!
//! Storage hands over punches already joined with their owning employee;
//! everything that turns those into report rows lives here: date filter
//! parsing, age math, manager resolution and display formatting.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::access::RecordScope;
use super::punch::{local_midnight, PunchRecord};
use super::user::User;
use crate::config::{ISO_DATE_FORMAT, MANAGER_NAME_FALLBACK, REPORT_TIMESTAMP_FORMAT};
use crate::errors::{AppResult, FieldErrorsBuilder};

const INVALID_DATE: &str = "Formato de data inválido. Use AAAA-MM-DD";
const DATE_OUT_OF_RANGE: &str = "Data fora do intervalo suportado";

/// Raw date filter as it arrives on the query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DateFilterQuery {
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[param(example = "2024-01-01")]
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    #[param(example = "2024-01-31")]
    pub end_date: Option<String>,
}

/// Parsed, optional calendar-date range. Both ends inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Parse both ends. Blank strings mean "no bound"; anything else that
    /// is not `YYYY-MM-DD` fails the whole call.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> AppResult<Self> {
        let mut errors = FieldErrorsBuilder::new();
        let start = parse_bound(start, "start_date", &mut errors);
        let end = parse_bound(end, "end_date", &mut errors);
        errors.finish()?;
        Ok(Self { start, end })
    }

    /// Convert to UTC instants: `start` becomes `>= start 00:00 local`,
    /// `end` becomes `< (end + 1 day) 00:00 local`.
    ///
    /// A date whose bound cannot be represented fails on its own field.
    pub fn to_utc_bounds(&self, offset: FixedOffset) -> AppResult<TimeBounds> {
        let mut errors = FieldErrorsBuilder::new();
        let from = self.start.and_then(|d| {
            representable(local_midnight(d, offset), "start_date", &mut errors)
        });
        let until = self.end.and_then(|d| {
            let next = d.succ_opt().and_then(|next| local_midnight(next, offset));
            representable(next, "end_date", &mut errors)
        });
        errors.finish()?;

        Ok(TimeBounds { from, until })
    }
}

impl TryFrom<&DateFilterQuery> for DateRange {
    type Error = crate::errors::AppError;

    fn try_from(query: &DateFilterQuery) -> Result<Self, Self::Error> {
        DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())
    }
}

fn parse_bound(
    raw: Option<&str>,
    field: &str,
    errors: &mut FieldErrorsBuilder,
) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, INVALID_DATE);
            None
        }
    }
}

fn representable(
    instant: Option<DateTime<Utc>>,
    field: &str,
    errors: &mut FieldErrorsBuilder,
) -> Option<DateTime<Utc>> {
    if instant.is_none() {
        errors.add(field, DATE_OUT_OF_RANGE);
    }
    instant
}

/// Half-open UTC window over `punch_records.created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBounds {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

/// Everything the storage layer needs to select report rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFilter {
    pub scope: RecordScope,
    pub bounds: TimeBounds,
}

/// Full years between `birth` and `today`, floored.
///
/// Someone who turns 30 tomorrow is 29 today. Returns 0 for birth dates in
/// the future.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// A punch joined with the employee that owns it.
#[derive(Debug, Clone)]
pub struct PunchWithEmployee {
    pub punch: PunchRecord,
    pub employee: User,
}

/// One denormalized report line.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportRow {
    pub punch_id: Uuid,
    #[schema(example = "João Silva")]
    pub employee_name: String,
    #[schema(example = "Analista")]
    pub job_title: Option<String>,
    #[schema(example = 34)]
    pub age_in_years: Option<u32>,
    #[schema(example = "Maria Souza")]
    pub manager_name: String,
    /// Local time, `dd/mm/yyyy HH:MM:SS`
    #[schema(example = "15/01/2024 08:02:13")]
    pub formatted_timestamp: String,
    pub raw_timestamp: DateTime<Utc>,
}

/// Turn joined punches into report rows, most recent first.
///
/// `managers` maps admin ids to names; employees whose manager is missing
/// get the `N/A` sentinel. Produces exactly one row per input punch.
pub fn assemble(
    mut sources: Vec<PunchWithEmployee>,
    managers: &HashMap<Uuid, String>,
    today: NaiveDate,
    offset: FixedOffset,
) -> Vec<ReportRow> {
    sources.sort_by(|a, b| b.punch.created_at.cmp(&a.punch.created_at));

    sources
        .into_iter()
        .map(|PunchWithEmployee { punch, employee }| {
            let manager_name = employee
                .admin_id
                .and_then(|id| managers.get(&id).cloned())
                .unwrap_or_else(|| MANAGER_NAME_FALLBACK.to_string());

            ReportRow {
                punch_id: punch.id,
                employee_name: employee.name,
                job_title: employee.cargo,
                age_in_years: employee.data_nascimento.map(|b| age_in_years(b, today)),
                manager_name,
                formatted_timestamp: punch
                    .created_at
                    .with_timezone(&offset)
                    .format(REPORT_TIMESTAMP_FORMAT)
                    .to_string(),
                raw_timestamp: punch.created_at,
            }
        })
        .collect()
}

/// Aggregate numbers over the same scope and range as the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReportStatistics {
    pub total_punches: u64,
    pub distinct_employees: u64,
    pub first_punch: Option<DateTime<Utc>>,
    pub last_punch: Option<DateTime<Utc>>,
}
