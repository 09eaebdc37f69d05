use super::util::{timestamp_tag, Invoker};
use super::{run, ReminderAction};
use crate::database::NewReminder;
use crate::util::{MentionPolicy, Reply};
use crate::{messages, Context, Data, Error};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Направите подсетник
///
/// p!reminder create "<опис>" <кад>
#[poise::command(slash_command, prefix_command)]
pub async fn create(
    ctx: Context<'_>, #[description = "Опис"] description: String,
    #[description = "Датум и/или време"]
    #[rest]
    when: String,
) -> Result<(), Error> {
    run(ctx, ReminderAction::Create { description, when }).await
}

pub async fn handle(
    data: &Data, invoker: &Invoker, description: &str, when: &str, now: DateTime<Utc>,
) -> Reply {
    if description.trim().is_empty() {
        return Reply::text(messages::EMPTY_DESCRIPTION);
    }
    let Some(timestamp) = data.dates.parse(when, now) else {
        return Reply::text(messages::INVALID_DATE_TIME);
    };

    let reminder = NewReminder {
        channel_id: invoker.channel_id.clone(),
        description: description.to_string(),
        private_message: invoker.is_private(),
        timestamp,
        user_id: invoker.user_id.clone(),
    };
    match data.store.create_reminder(reminder).await {
        Ok(reminder) => {
            info!(
                "reminder {} created by {} for {}",
                reminder.id, reminder.user_id, reminder.timestamp
            );
            Reply::Text {
                content: messages::reminder_created(&timestamp_tag(timestamp), description),
                mentions: MentionPolicy::Suppressed,
            }
        }
        Err(e) => {
            warn!("failed to create reminder for {}: {e}", invoker.user_id);
            Reply::text(messages::REMINDER_CREATE_ERROR)
        }
    }
}
