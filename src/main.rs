mod appsettings;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use teloxide::Bot;
use tokio_util::sync::CancellationToken;

use nesushka_scheduler::ReminderPoller;
use nesushka_storage::{
    Logbook,
    sqlite::{
        self, record_storage::SqliteEggRecordStorage,
        settings_storage::SqliteReminderSettingsStorage,
    },
};
use nesushka_telegram::{TelegramInteractionInterface, TelegramNotificationChannel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = appsettings::get();

    let options = SqliteConnectOptions::from_str(&settings.database.url)
        .context("parsing database url")?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .context("opening database")?;
    sqlite::init_schema(&pool).await.context("initializing schema")?;

    let bot = Bot::new(settings.telegram.token.clone());

    // The poller gets its own storage handles over the shared pool, so a
    // slow notification never holds anything the command handlers need.
    let poller = ReminderPoller::new(
        SqliteEggRecordStorage::new(pool.clone()),
        SqliteReminderSettingsStorage::new(pool.clone()),
        TelegramNotificationChannel::new(bot.clone()),
    );
    let cancellation_token = CancellationToken::new();
    let poller_task = tokio::spawn(poller.run(cancellation_token.clone()));

    let logbook = Arc::new(Logbook::new(SqliteEggRecordStorage::new(pool.clone())));
    let reminder_settings = Arc::new(SqliteReminderSettingsStorage::new(pool));

    TelegramInteractionInterface::start(bot, logbook, reminder_settings).await;

    log::info!("Dispatcher stopped, shutting down the reminder poller");
    cancellation_token.cancel();
    poller_task.await?;

    Ok(())
}
