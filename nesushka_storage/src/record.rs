use async_trait::async_trait;
use chrono::NaiveDate;

use nesushka_models::{
    record::{DayTotal, EggRecord, RecordId},
    user::UserId,
};

pub struct NewEggRecord {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub count: i64,
    pub notes: String,
}

/// Partial-field update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct EggRecordPatch {
    pub count: Option<i64>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[async_trait]
pub trait EggRecordStorage: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn insert(&self, record: NewEggRecord) -> Result<EggRecord, Self::Error>;
    async fn get(&self, id: RecordId) -> Result<Option<EggRecord>, Self::Error>;
    /// Returns the updated record, or `None` when the id is absent (no-op).
    async fn update(
        &self,
        id: RecordId,
        patch: EggRecordPatch,
    ) -> Result<Option<EggRecord>, Self::Error>;
    /// Returns `false` when the id is absent (no-op).
    async fn delete(&self, id: RecordId) -> Result<bool, Self::Error>;
    async fn records_between(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EggRecord>, Self::Error>;
    /// Per-day totals over the user's entire history, chronological.
    async fn daily_totals(&self, user_id: UserId) -> Result<Vec<DayTotal>, Self::Error>;
    /// Non-empty notes with the date they were logged for, chronological.
    async fn dated_notes(&self, user_id: UserId)
    -> Result<Vec<(NaiveDate, String)>, Self::Error>;
    async fn has_record_on(&self, user_id: UserId, date: NaiveDate)
    -> Result<bool, Self::Error>;
}
