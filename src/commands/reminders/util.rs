use crate::database::{Reminder, ReminderStore};
use crate::util::Reply;
use crate::{messages, Context};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Who ran the command and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    pub user_id: String,
    /// `None` in DMs
    pub channel_id: Option<String>,
}

impl Invoker {
    pub fn from_ctx(ctx: Context<'_>) -> Self {
        let channel_id = ctx.guild_id().map(|_| ctx.channel_id().to_string());
        Invoker { user_id: ctx.author().id.to_string(), channel_id }
    }

    pub fn is_private(&self) -> bool {
        self.channel_id.is_none()
    }
}

/// The invoker's reminders, or the reply to send instead when there are none to show
pub async fn load_user_reminders(
    store: &ReminderStore, invoker: &Invoker,
) -> Result<Vec<Reminder>, Reply> {
    match store.get_reminders_by_user_id(&invoker.user_id).await {
        Ok(reminders) if reminders.is_empty() => Err(Reply::text(messages::NO_REMINDERS)),
        Ok(reminders) => Ok(reminders),
        Err(e) => {
            warn!("failed to load reminders for {}: {e}", invoker.user_id);
            Err(Reply::text(messages::REMINDERS_LOAD_ERROR))
        }
    }
}

/// Full date and time, shown in each reader's own timezone by the client
pub fn timestamp_tag(timestamp: DateTime<Utc>) -> String {
    format!("<t:{}:F>", timestamp.timestamp())
}

pub fn channel_mention(channel_id: &str) -> String {
    format!("<#{channel_id}>")
}

pub fn reminder_line(index: usize, reminder: &Reminder) -> String {
    let line = format!("{index}. {} - {}", timestamp_tag(reminder.timestamp), reminder.description);
    match &reminder.channel_id {
        Some(channel_id) => format!("{line} [{}]", channel_mention(channel_id)),
        None => line,
    }
}

pub fn reminders_list(reminders: &[Reminder]) -> String {
    reminders
        .iter()
        .enumerate()
        .map(|(i, r)| reminder_line(i, r))
        .collect::<Vec<_>>()
        .join("\n")
}
