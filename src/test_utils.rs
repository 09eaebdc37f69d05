use crate::commands::reminders::util::Invoker;
use crate::database::{NewReminder, Reminder, ReminderStore};
use crate::dates::DateParser;
use crate::Data;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap()
}

/// A single connection, otherwise every connection would get its own empty database
pub async fn memory_store() -> ReminderStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ReminderStore::from_pool(pool).await.unwrap()
}

pub async fn test_data() -> Data {
    Data {
        dates: DateParser::new(FixedOffset::east_opt(0).unwrap()).unwrap(),
        store: memory_store().await,
    }
}

pub fn in_guild(user_id: &str) -> Invoker {
    Invoker { user_id: user_id.to_string(), channel_id: Some("10".to_string()) }
}

pub fn in_dm(user_id: &str) -> Invoker {
    Invoker { user_id: user_id.to_string(), channel_id: None }
}

pub fn new_reminder(
    user_id: &str, channel_id: Option<&str>, description: &str, minutes_from_now: i64,
) -> NewReminder {
    NewReminder {
        channel_id: channel_id.map(str::to_string),
        description: description.to_string(),
        private_message: channel_id.is_none(),
        timestamp: now() + Duration::minutes(minutes_from_now),
        user_id: user_id.to_string(),
    }
}

pub fn reminder(id: i64, user_id: &str, channel_id: Option<&str>, description: &str) -> Reminder {
    Reminder {
        id,
        user_id: user_id.to_string(),
        channel_id: channel_id.map(str::to_string),
        description: description.to_string(),
        private_message: channel_id.is_none(),
        timestamp: now() + Duration::minutes(id),
        created_at: now(),
    }
}
