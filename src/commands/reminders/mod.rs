use self::create::create;
use self::delete::delete;
use self::dump::dump;
use self::list::list;
use self::util::Invoker;
use crate::util::{send_reply, Reply};
use crate::{Context, Data, Error};
use chrono::{DateTime, Utc};
use tracing::debug;

mod create;
mod delete;
mod dump;
mod list;
pub mod util;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderAction {
    Create { description: String, when: String },
    List,
    Delete,
    Dump,
}

/// Подсетници
///
/// p!reminder <create|list|delete|dump>
#[poise::command(
    slash_command,
    prefix_command,
    subcommands("create", "list", "delete", "dump"),
    discard_spare_arguments
)]
pub async fn reminder(ctx: Context<'_>) -> Result<(), Error> {
    // only reached for names that aren't subcommands, those get no answer
    debug!("ignoring unknown reminder subcommand from {}", ctx.author().id);
    Ok(())
}

pub fn commands() -> [crate::Command; 1] {
    [reminder()]
}

/// Runs the handler for `action`, every failure it knows about ends up in the reply
pub async fn execute(
    data: &Data, invoker: &Invoker, action: ReminderAction, now: DateTime<Utc>,
) -> Reply {
    match action {
        ReminderAction::Create { description, when } => {
            create::handle(data, invoker, &description, &when, now).await
        }
        ReminderAction::List => list::handle(&data.store, invoker).await,
        ReminderAction::Delete => delete::handle(data, invoker).await,
        ReminderAction::Dump => dump::handle(&data.store).await,
    }
}

async fn run(ctx: Context<'_>, action: ReminderAction) -> Result<(), Error> {
    ctx.defer().await?;
    let invoker = Invoker::from_ctx(ctx);
    debug!("{:?} by {:?}", action, invoker);
    let reply = execute(ctx.data(), &invoker, action, Utc::now()).await;
    send_reply(ctx, reply).await
}
