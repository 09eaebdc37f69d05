use super::{run, ReminderAction};
use crate::database::ReminderStore;
use crate::util::Reply;
use crate::{messages, Context, Error};
use tracing::{info, warn};

pub const DUMP_FILE_NAME: &str = "reminders.json";

/// Преузмите све подсетнике
///
/// Everyone's reminders, not just the invoker's.
#[poise::command(slash_command, prefix_command, discard_spare_arguments)]
pub async fn dump(ctx: Context<'_>) -> Result<(), Error> {
    run(ctx, ReminderAction::Dump).await
}

pub async fn handle(store: &ReminderStore) -> Reply {
    let reminders = match store.get_reminders().await {
        Ok(reminders) => reminders,
        Err(e) => {
            warn!("failed to load reminders for dump: {e}");
            return Reply::text(messages::REMINDERS_LOAD_ERROR);
        }
    };
    match serde_json::to_vec_pretty(&reminders) {
        Ok(data) => {
            info!("dumping {} reminders", reminders.len());
            Reply::Attachment { name: DUMP_FILE_NAME.to_string(), data }
        }
        Err(e) => {
            warn!("failed to serialize reminders: {e}");
            Reply::text(messages::REMINDERS_LOAD_ERROR)
        }
    }
}
