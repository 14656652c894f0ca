use chrono::NaiveDate;

use crate::user::UserId;

pub type RecordId = i64;

/// One logged egg count for a user on a date. A user may have several
/// records for the same date; the day's total is the sum over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EggRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub count: i64,
    pub notes: String,
}

/// A single day's aggregated total for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: i64,
}
