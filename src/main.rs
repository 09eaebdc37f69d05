mod commands;
mod components;
mod config;
mod database;
mod dates;
mod messages;
mod util;

#[cfg(test)]
mod test_utils;

use crate::config::Config;
use crate::database::ReminderStore;
use crate::dates::DateParser;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub struct Data {
    dates: DateParser,
    store: ReminderStore,
} // User data, which is stored and accessible in all command invocations
type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Arc<Data>, Error>;
pub type FrameworkContext<'a> = poise::FrameworkContext<'a, Arc<Data>, Error>;
pub type Command = poise::Command<Arc<Data>, Error>;

async fn event_handler(
    ctx: &serenity::Context, event: &serenity::FullEvent, _framework: FrameworkContext<'_>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("logged in as {}", data_about_bot.user.name);
        }
        serenity::FullEvent::InteractionCreate {
            interaction: serenity::Interaction::Component(component),
        } => {
            components::reminders::handle_delete_selection(ctx, data, component).await?;
        }
        _ => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // a missing .env is fine, the variables may come from the environment itself
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let store = ReminderStore::connect(&config.database_url).await?;
    let data = Arc::new(Data { dates: DateParser::new(config.utc_offset)?, store });
    let guild_id = config.guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                ..Default::default()
            },
            commands: commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup({
            let data = data.clone();
            move |ctx, _ready, framework| {
                Box::pin(async move {
                    let commands = &framework.options().commands;
                    match guild_id {
                        Some(guild_id) => {
                            poise::builtins::register_in_guild(ctx, commands, guild_id).await?
                        }
                        None => poise::builtins::register_globally(ctx, commands).await?,
                    }
                    Ok(data)
                })
            }
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;
    let result = client.start().await;
    data.store.close().await;
    result?;
    Ok(())
}
