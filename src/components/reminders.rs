use crate::database::{Reminder, ReminderStore};
use crate::{messages, Data, Error};
use chrono::FixedOffset;
use poise::serenity_prelude::{
    self as serenity, ComponentInteraction, ComponentInteractionDataKind, CreateActionRow,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateSelectMenu,
    CreateSelectMenuKind, CreateSelectMenuOption,
};
use tracing::{info, warn};

pub const DELETE_PREFIX: &str = "reminder_delete";
/// Discord caps a select menu at 25 options and a message at 5 rows
const OPTIONS_PER_MENU: usize = 25;
const MAX_ROWS: usize = 5;
const LABEL_LIMIT: usize = 100;

/// One select menu per 25 reminders, the custom id carries the owner so nobody else can use it.
/// Anything past 125 reminders is left out.
pub fn reminders_components(
    owner: &str, reminders: &[Reminder], offset: FixedOffset,
) -> Vec<CreateActionRow> {
    reminders
        .chunks(OPTIONS_PER_MENU)
        .take(MAX_ROWS)
        .enumerate()
        .map(|(row, chunk)| {
            let options: Vec<_> = chunk
                .iter()
                .enumerate()
                .map(|(i, reminder)| {
                    let index = row * OPTIONS_PER_MENU + i;
                    let label = format!("{index}. {}", reminder.description);
                    let label = truncate(&label, LABEL_LIMIT);
                    let when = reminder.timestamp.with_timezone(&offset);
                    CreateSelectMenuOption::new(label, reminder.id.to_string())
                        .description(when.format("%d.%m.%Y. %H:%M").to_string())
                })
                .collect();
            let max_values = options.len() as u8;
            CreateActionRow::SelectMenu(
                CreateSelectMenu::new(
                    format!("{DELETE_PREFIX}:{owner}:{row}"),
                    CreateSelectMenuKind::String { options },
                )
                .placeholder(messages::CHOOSE_REMINDERS_PLACEHOLDER)
                .min_values(1)
                .max_values(max_values),
            )
        })
        .collect()
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit - 1).collect();
    truncated.push('…');
    truncated
}

/// Owner of the menu a custom id belongs to, `None` if it isn't one of ours
pub fn menu_owner(custom_id: &str) -> Option<&str> {
    let rest = custom_id.strip_prefix(DELETE_PREFIX)?.strip_prefix(':')?;
    let (owner, _row) = rest.split_once(':')?;
    Some(owner)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    NotOwner,
    Deleted(u64),
    Failed,
}

impl SelectionOutcome {
    fn into_response(self) -> CreateInteractionResponse {
        match self {
            SelectionOutcome::NotOwner => ephemeral(messages::NOT_YOUR_REMINDERS),
            SelectionOutcome::Failed => ephemeral(messages::REMINDER_DELETE_ERROR),
            SelectionOutcome::Deleted(count) => CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(messages::reminders_deleted(count))
                    .components(vec![]),
            ),
        }
    }
}

fn ephemeral(content: &str) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new().content(content).ephemeral(true),
    )
}

pub async fn delete_selection(
    store: &ReminderStore, owner: &str, presser: &str, values: &[String],
) -> SelectionOutcome {
    if owner != presser {
        return SelectionOutcome::NotOwner;
    }
    let ids: Vec<i64> = values.iter().filter_map(|value| value.parse().ok()).collect();
    match store.delete_reminders(owner, &ids).await {
        Ok(count) => {
            info!("user {owner} deleted {count} reminder(s)");
            SelectionOutcome::Deleted(count)
        }
        Err(e) => {
            warn!("failed to delete reminders {ids:?} for {owner}: {e}");
            SelectionOutcome::Failed
        }
    }
}

/// Picks up selections made in the menus built by [`reminders_components`]
pub async fn handle_delete_selection(
    ctx: &serenity::Context, data: &Data, interaction: &ComponentInteraction,
) -> Result<(), Error> {
    let Some(owner) = menu_owner(&interaction.data.custom_id) else {
        return Ok(());
    };
    let ComponentInteractionDataKind::StringSelect { values } = &interaction.data.kind else {
        return Ok(());
    };
    let presser = interaction.user.id.to_string();
    let outcome = delete_selection(&data.store, owner, &presser, values).await;
    interaction.create_response(&ctx.http, outcome.into_response()).await?;
    Ok(())
}
