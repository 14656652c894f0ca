use async_trait::async_trait;
use teloxide::prelude::*;

use nesushka_models::user::UserId;
use nesushka_scheduler::NotificationChannel;

const REMINDER_TEXT: &str = "⏰ Reminder! You have not logged today's egg count yet.\n\
    Send a number, e.g. 12, or see /add.";

pub struct TelegramNotificationChannel {
    bot: Bot,
}

impl TelegramNotificationChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl NotificationChannel for TelegramNotificationChannel {
    async fn send_reminder(&self, user: UserId) -> anyhow::Result<()> {
        self.bot.send_message(ChatId(user), REMINDER_TEXT).await?;
        Ok(())
    }
}
