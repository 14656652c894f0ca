pub mod record_storage;
pub mod settings_storage;

pub use sqlx;

/// Idempotent schema setup, run once at startup (and by tests).
pub async fn init_schema(pool: &sqlx::SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS eggs (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             user_id INTEGER NOT NULL,
             date TEXT NOT NULL,
             count INTEGER NOT NULL,
             notes TEXT NOT NULL DEFAULT ''
         )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_eggs_user_date ON eggs (user_id, date)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_settings (
             user_id INTEGER PRIMARY KEY,
             enabled INTEGER NOT NULL DEFAULT 0,
             remind_at TEXT NOT NULL DEFAULT '20:00',
             utc_offset INTEGER NOT NULL DEFAULT 180
         )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
