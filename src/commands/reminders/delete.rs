use super::util::{load_user_reminders, Invoker};
use super::{run, ReminderAction};
use crate::components::reminders::reminders_components;
use crate::util::Reply;
use crate::{messages, Context, Data, Error};

/// Обришите своје подсетнике
#[poise::command(slash_command, prefix_command, discard_spare_arguments)]
pub async fn delete(ctx: Context<'_>) -> Result<(), Error> {
    run(ctx, ReminderAction::Delete).await
}

/// Only puts the menus up, deleting happens once something gets picked
pub async fn handle(data: &Data, invoker: &Invoker) -> Reply {
    match load_user_reminders(&data.store, invoker).await {
        Ok(reminders) => Reply::Components {
            content: messages::CHOOSE_REMINDERS_TO_DELETE.to_string(),
            components: reminders_components(&invoker.user_id, &reminders, data.dates.offset()),
        },
        Err(reply) => reply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{in_guild, new_reminder, test_data};

    #[tokio::test]
    async fn offers_a_menu_without_deleting() {
        let data = test_data().await;
        let created =
            data.store.create_reminder(new_reminder("1", None, "dentist", 10)).await.unwrap();

        let Reply::Components { content, components } = handle(&data, &in_guild("1")).await else {
            panic!("expected components");
        };
        assert_eq!(content, messages::CHOOSE_REMINDERS_TO_DELETE);
        assert_eq!(components.len(), 1);
        let json = serde_json::to_string(&components).unwrap();
        assert!(json.contains(&format!("\"value\":\"{}\"", created.id)));
        assert!(json.contains("reminder_delete:1:0"));

        assert_eq!(data.store.get_reminders().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn nothing_to_delete() {
        let data = test_data().await;
        data.store.create_reminder(new_reminder("2", None, "not mine", 10)).await.unwrap();
        let reply = handle(&data, &in_guild("1")).await;
        assert!(matches!(reply, Reply::Text { content, .. } if content == messages::NO_REMINDERS));
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let data = test_data().await;
        data.store.close().await;
        let reply = handle(&data, &in_guild("1")).await;
        assert!(matches!(
            reply,
            Reply::Text { content, .. } if content == messages::REMINDERS_LOAD_ERROR
        ));
    }
}
