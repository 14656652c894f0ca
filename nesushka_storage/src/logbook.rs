use chrono::NaiveDate;

use nesushka_models::{
    record::{EggRecord, RecordId},
    user::UserId,
};

use crate::record::{EggRecordPatch, EggRecordStorage, NewEggRecord};

/// Outcome of an ownership-checked edit. A rejected edit leaves the
/// record untouched; repeating it never mutates state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(EggRecord),
    NotFound,
    NotOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
    NotOwner,
}

/// Record operations on behalf of an acting user. The storage itself is
/// ownership-blind; this is the single place the user_id check lives.
pub struct Logbook<R> {
    records: R,
}

impl<R: EggRecordStorage> Logbook<R> {
    pub fn new(records: R) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    pub async fn add(
        &self,
        user_id: UserId,
        date: NaiveDate,
        count: i64,
        notes: String,
    ) -> Result<EggRecord, R::Error> {
        self.records
            .insert(NewEggRecord {
                user_id,
                date,
                count,
                notes,
            })
            .await
    }

    pub async fn edit(
        &self,
        acting_user: UserId,
        id: RecordId,
        patch: EggRecordPatch,
    ) -> Result<EditOutcome, R::Error> {
        match self.records.get(id).await? {
            None => Ok(EditOutcome::NotFound),
            Some(record) if record.user_id != acting_user => Ok(EditOutcome::NotOwner),
            Some(_) => match self.records.update(id, patch).await? {
                Some(updated) => Ok(EditOutcome::Updated(updated)),
                // deleted between the check and the write; last write wins
                None => Ok(EditOutcome::NotFound),
            },
        }
    }

    pub async fn remove(
        &self,
        acting_user: UserId,
        id: RecordId,
    ) -> Result<RemoveOutcome, R::Error> {
        match self.records.get(id).await? {
            None => Ok(RemoveOutcome::NotFound),
            Some(record) if record.user_id != acting_user => Ok(RemoveOutcome::NotOwner),
            Some(_) => {
                if self.records.delete(id).await? {
                    Ok(RemoveOutcome::Removed)
                } else {
                    Ok(RemoveOutcome::NotFound)
                }
            }
        }
    }
}
