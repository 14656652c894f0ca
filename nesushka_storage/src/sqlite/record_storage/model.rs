use nesushka_models::record::{DayTotal, EggRecord};

#[derive(sqlx::FromRow)]
pub struct EggRecordRow {
    pub id: i64,
    pub user_id: i64,
    pub date: chrono::NaiveDate,
    pub count: i64,
    pub notes: String,
}

impl From<EggRecordRow> for EggRecord {
    fn from(value: EggRecordRow) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            date: value.date,
            count: value.count,
            notes: value.notes,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct DayTotalRow {
    pub date: chrono::NaiveDate,
    pub total: i64,
}

impl From<DayTotalRow> for DayTotal {
    fn from(value: DayTotalRow) -> Self {
        Self {
            date: value.date,
            total: value.total,
        }
    }
}
