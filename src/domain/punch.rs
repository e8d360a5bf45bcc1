//! Punch Ledger entities and local-day arithmetic.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{PUNCH_DATE_FORMAT, PUNCH_LABEL_FORMAT, PUNCH_TIME_FORMAT};
use crate::errors::{AppError, AppResult};

/// A single time-clock event. Append-only: never updated once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// UTC instant of local midnight at the start of `date`.
///
/// `None` when that instant is outside the range chrono can represent,
/// which only happens at the extreme ends of the calendar.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    date.and_time(NaiveTime::MIN)
        .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
        .map(|utc| Utc.from_utc_datetime(&utc))
}

/// Half-open `[start, end)` bounds of the local calendar day containing `now`.
pub fn day_bounds(
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let today = now.with_timezone(&offset).date_naive();
    let start = local_midnight(today, offset);
    let end = today.succ_opt().and_then(|next| local_midnight(next, offset));

    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(AppError::internal(format!("no local day bounds for {}", now))),
    }
}

/// Confirmation returned after registering a punch.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PunchRegistered {
    pub id: Uuid,
    /// Local time, `HH:MM:SS`
    #[schema(example = "08:02:13")]
    pub time: String,
    /// Local date, `dd/mm/yyyy`
    #[schema(example = "15/01/2024")]
    pub date: String,
}

impl PunchRegistered {
    pub fn new(punch: &PunchRecord, offset: FixedOffset) -> Self {
        let local = punch.created_at.with_timezone(&offset);
        Self {
            id: punch.id,
            time: local.format(PUNCH_TIME_FORMAT).to_string(),
            date: local.format(PUNCH_DATE_FORMAT).to_string(),
        }
    }
}

/// One entry of the employee's punches for today.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TodayPunch {
    pub id: Uuid,
    /// ISO-8601 UTC timestamp
    #[schema(example = "2024-01-15T11:02:13.000Z")]
    pub timestamp: String,
    /// Local `HH:MM`
    #[schema(example = "08:02")]
    pub label: String,
}

impl TodayPunch {
    pub fn new(punch: &PunchRecord, offset: FixedOffset) -> Self {
        Self {
            id: punch.id,
            timestamp: punch.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            label: punch
                .created_at
                .with_timezone(&offset)
                .format(PUNCH_LABEL_FORMAT)
                .to_string(),
        }
    }
}
