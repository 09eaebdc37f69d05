use super::util::{load_user_reminders, reminders_list, Invoker};
use super::{run, ReminderAction};
use crate::database::ReminderStore;
use crate::util::{MentionPolicy, Reply};
use crate::{Context, Error};

/// Прикажите своје подсетнике
#[poise::command(slash_command, prefix_command, discard_spare_arguments)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    run(ctx, ReminderAction::List).await
}

pub async fn handle(store: &ReminderStore, invoker: &Invoker) -> Reply {
    match load_user_reminders(store, invoker).await {
        Ok(reminders) => Reply::Text {
            content: reminders_list(&reminders),
            mentions: MentionPolicy::NoUsers,
        },
        Err(reply) => reply,
    }
}
