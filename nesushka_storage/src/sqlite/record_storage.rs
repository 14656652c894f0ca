mod model;

use async_trait::async_trait;
use chrono::NaiveDate;
use model::{DayTotalRow, EggRecordRow};
use thiserror::Error;

use nesushka_models::{
    record::{DayTotal, EggRecord, RecordId},
    user::UserId,
};

use crate::record::{EggRecordPatch, EggRecordStorage, NewEggRecord};

#[derive(Debug, Error)]
pub enum SqliteRecordError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub struct SqliteEggRecordStorage {
    pool: sqlx::SqlitePool,
}

impl SqliteEggRecordStorage {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EggRecordStorage for SqliteEggRecordStorage {
    type Error = SqliteRecordError;

    async fn insert(&self, record: NewEggRecord) -> Result<EggRecord, Self::Error> {
        let NewEggRecord {
            user_id,
            date,
            count,
            notes,
        } = record;

        let created = sqlx::query_as::<_, EggRecordRow>(
            "INSERT INTO eggs (user_id, date, count, notes)
             VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(user_id)
        .bind(date)
        .bind(count)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(created.into())
    }

    async fn get(&self, id: RecordId) -> Result<Option<EggRecord>, Self::Error> {
        let record = sqlx::query_as::<_, EggRecordRow>("SELECT * FROM eggs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Into::into))
    }

    async fn update(
        &self,
        id: RecordId,
        patch: EggRecordPatch,
    ) -> Result<Option<EggRecord>, Self::Error> {
        let updated = sqlx::query_as::<_, EggRecordRow>(
            "UPDATE eggs
             SET count = COALESCE(?, count),
                 date = COALESCE(?, date),
                 notes = COALESCE(?, notes)
             WHERE id = ?
             RETURNING *",
        )
        .bind(patch.count)
        .bind(patch.date)
        .bind(patch.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated.map(Into::into))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, Self::Error> {
        let result = sqlx::query("DELETE FROM eggs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn records_between(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EggRecord>, Self::Error> {
        let records = sqlx::query_as::<_, EggRecordRow>(
            "SELECT * FROM eggs
             WHERE user_id = ? AND date >= ? AND date <= ?
             ORDER BY date, id",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn daily_totals(&self, user_id: UserId) -> Result<Vec<DayTotal>, Self::Error> {
        let totals = sqlx::query_as::<_, DayTotalRow>(
            "SELECT date, SUM(count) AS total FROM eggs
             WHERE user_id = ?
             GROUP BY date
             ORDER BY date",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals.into_iter().map(Into::into).collect())
    }

    async fn dated_notes(
        &self,
        user_id: UserId,
    ) -> Result<Vec<(NaiveDate, String)>, Self::Error> {
        let notes = sqlx::query_as::<_, (NaiveDate, String)>(
            "SELECT date, notes FROM eggs
             WHERE user_id = ? AND notes <> ''
             ORDER BY date, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn has_record_on(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<bool, Self::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM eggs WHERE user_id = ? AND date = ?")
                .bind(user_id)
                .bind(date)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }
}
