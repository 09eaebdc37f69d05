use crate::Error;
use chrono::FixedOffset;
use poise::serenity_prelude::GuildId;

const DEFAULT_PREFIX: &str = "p!";

/// Settings read from the environment (and `.env`) at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub prefix: String,
    /// Register commands in this guild only, handy while developing
    pub guild_id: Option<GuildId>,
    /// Offset used to read and render local dates and times
    pub utc_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let required = |key: &str| -> Result<String, Error> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| format!("missing {key}").into())
        };

        let guild_id = match lookup("DISCORD_GUILD_ID") {
            Some(raw) if !raw.trim().is_empty() => {
                let id = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| format!("invalid DISCORD_GUILD_ID: {raw}"))?;
                if id == 0 {
                    return Err("invalid DISCORD_GUILD_ID: 0".into());
                }
                Some(GuildId::new(id))
            }
            _ => None,
        };

        let utc_offset = match lookup("REMINDER_UTC_OFFSET") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<FixedOffset>()
                .map_err(|_| format!("invalid REMINDER_UTC_OFFSET: {raw}, expected e.g. +02:00"))?,
            _ => FixedOffset::east_opt(0).ok_or("UTC offset out of range")?,
        };

        Ok(Config {
            discord_token: required("DISCORD_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            prefix: lookup("BOT_PREFIX")
                .filter(|prefix| !prefix.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PREFIX.into()),
            guild_id,
            utc_offset,
        })
    }
}
