mod delivery_channel;
mod records;
mod reminders;
mod stats;

pub use delivery_channel::TelegramNotificationChannel;
pub use teloxide;

use std::sync::Arc;

use teloxide::dptree::{self, case};
use teloxide::{
    dispatching::UpdateHandler,
    macros::BotCommands,
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};

use nesushka_storage::{
    Logbook,
    sqlite::{
        record_storage::SqliteEggRecordStorage,
        settings_storage::SqliteReminderSettingsStorage,
    },
};

type HandlerResult = anyhow::Result<()>;
pub type SharedLogbook = Arc<Logbook<SqliteEggRecordStorage>>;
pub type SharedSettings = Arc<SqliteReminderSettingsStorage>;

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
enum Command {
    #[command(description = "command overview")]
    Start,
    #[command(description = "full command reference")]
    Help,
    #[command(description = "how to log a day's count")]
    Add,
    #[command(description = "edit a record: /edit <id> <count> [date] [note]")]
    Edit(String),
    #[command(description = "delete a record: /delete <id>")]
    Delete(String),
    #[command(description = "per-day totals: /stats [days]")]
    Stats(String),
    #[command(description = "trends and note keywords: /analytics [days]")]
    Analytics(String),
    #[command(description = "daily reminder settings")]
    Reminders(String),
    #[command(description = "show your chat id")]
    MyId,
}

pub struct TelegramInteractionInterface;

impl TelegramInteractionInterface {
    pub async fn start(bot: Bot, logbook: SharedLogbook, settings: SharedSettings) {
        log::info!("Starting Telegram interaction interface");

        Dispatcher::builder(bot, schema())
            .dependencies(dptree::deps![logbook, settings])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await
    }
}

fn schema() -> UpdateHandler<anyhow::Error> {
    let commands = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(send_overview))
        .branch(case![Command::Help].endpoint(send_help))
        .branch(case![Command::Add].endpoint(records::send_add_hint))
        .branch(case![Command::Edit(args)].endpoint(records::edit))
        .branch(case![Command::Delete(args)].endpoint(records::delete))
        .branch(case![Command::Stats(args)].endpoint(stats::show_stats))
        .branch(case![Command::Analytics(args)].endpoint(stats::show_analytics))
        .branch(case![Command::Reminders(args)].endpoint(reminders::manage))
        .branch(case![Command::MyId].endpoint(send_my_id));

    Update::filter_message()
        .branch(commands)
        .branch(dptree::endpoint(records::quick_add))
}

fn command_keyboard() -> KeyboardMarkup {
    let rows = [
        ["/add", "/edit", "/delete"],
        ["/stats", "/analytics", "/reminders"],
        ["/myid", "/help", "/start"],
    ];

    KeyboardMarkup::new(
        rows.map(|row| row.map(KeyboardButton::new).to_vec()),
    )
    .resize_keyboard()
}

async fn send_overview(bot: Bot, msg: Message) -> HandlerResult {
    let text = "🐔 Egg-laying logbook.\n\n\
        Log a day by sending a plain message:\n\
        <count> [YYYY-MM-DD|today] [note]\n\n\
        ▪ /stats [days] — per-day totals\n\
        ▪ /analytics [days] — trends and note keywords\n\
        ▪ /edit, /delete — manage records by id\n\
        ▪ /reminders — daily reminder settings\n\
        ▪ /help — full reference\n\n\
        Use the buttons below or type a command.";

    bot.send_message(msg.chat.id, text)
        .reply_markup(command_keyboard())
        .await?;
    Ok(())
}

async fn send_help(bot: Bot, msg: Message) -> HandlerResult {
    use teloxide::utils::command::BotCommands as _;

    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

async fn send_my_id(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, format!("🆔 Your chat id: {}", msg.chat.id))
        .await?;
    Ok(())
}
