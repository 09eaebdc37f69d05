use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{query, query_as, QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;

const SCHEMA: [&str; 2] = [
    r"CREATE TABLE IF NOT EXISTS reminders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        channel_id TEXT,
        description TEXT NOT NULL,
        private_message INTEGER NOT NULL,
        timestamp TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS reminders_user_id ON reminders (user_id)",
];

const COLUMNS: &str =
    "id, user_id, channel_id, description, private_message, timestamp, created_at";
/// Timestamps are stored as RFC 3339 text, which only sorts right for four digit years
const LAST_SORTABLE_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: i64,
    pub user_id: String,
    /// `None` when the reminder was made in DMs
    pub channel_id: Option<String>,
    pub description: String,
    pub private_message: bool,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub channel_id: Option<String>,
    pub description: String,
    pub private_message: bool,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
}

/// Every reminder query goes through here
#[derive(Debug, Clone)]
pub struct ReminderStore {
    pool: SqlitePool,
}

impl ReminderStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        for statement in SCHEMA {
            query(statement).execute(&pool).await?;
        }
        Ok(ReminderStore { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn create_reminder(&self, reminder: NewReminder) -> Result<Reminder, sqlx::Error> {
        if !(0..=LAST_SORTABLE_YEAR).contains(&reminder.timestamp.year()) {
            return Err(sqlx::Error::Encode(
                format!("reminder timestamp {} is out of range", reminder.timestamp).into(),
            ));
        }
        query_as::<_, Reminder>(&format!(
            "INSERT INTO reminders
            (user_id, channel_id, description, private_message, timestamp, created_at)
            VALUES (?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(reminder.user_id)
        .bind(reminder.channel_id)
        .bind(reminder.description)
        .bind(reminder.private_message)
        .bind(reminder.timestamp)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_reminders_by_user_id(
        &self, user_id: &str,
    ) -> Result<Vec<Reminder>, sqlx::Error> {
        query_as::<_, Reminder>(&format!(
            "SELECT {COLUMNS} FROM reminders WHERE user_id = ? ORDER BY timestamp ASC, id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_reminders(&self) -> Result<Vec<Reminder>, sqlx::Error> {
        query_as::<_, Reminder>(&format!(
            "SELECT {COLUMNS} FROM reminders ORDER BY timestamp ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Deletes the given reminders if they belong to `user_id`, returns how many went away
    pub async fn delete_reminders(&self, user_id: &str, ids: &[i64]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM reminders WHERE user_id = ");
        builder.push_bind(user_id);
        builder.push(" AND id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{memory_store, new_reminder};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn create_then_read_back() {
        let store = memory_store().await;
        let created = store
            .create_reminder(new_reminder("1", Some("10"), "water the plants", 60))
            .await
            .unwrap();

        assert_eq!(created.user_id, "1");
        assert_eq!(created.channel_id.as_deref(), Some("10"));
        assert!(!created.private_message);

        let by_user = store.get_reminders_by_user_id("1").await.unwrap();
        assert_eq!(by_user, vec![created]);
    }

    #[tokio::test]
    async fn user_listing_is_scoped_and_sorted() {
        let store = memory_store().await;
        store.create_reminder(new_reminder("1", None, "later", 120)).await.unwrap();
        store.create_reminder(new_reminder("2", Some("10"), "someone else", 30)).await.unwrap();
        store.create_reminder(new_reminder("1", Some("10"), "sooner", 60)).await.unwrap();

        let descriptions: Vec<_> = store
            .get_reminders_by_user_id("1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.description)
            .collect();
        assert_eq!(descriptions, ["sooner", "later"]);

        assert_eq!(store.get_reminders().await.unwrap().len(), 3);
        assert!(store.get_reminders_by_user_id("3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn far_future_reminders_still_sort_last() {
        let store = memory_store().await;
        let mut far = new_reminder("1", None, "far", 0);
        far.timestamp = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        store.create_reminder(far).await.unwrap();
        store.create_reminder(new_reminder("1", None, "soon", 10)).await.unwrap();

        let descriptions: Vec<_> = store
            .get_reminders_by_user_id("1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.description)
            .collect();
        assert_eq!(descriptions, ["soon", "far"]);

        let mut too_far = new_reminder("1", None, "too far", 0);
        too_far.timestamp = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(store.create_reminder(too_far).await.is_err());
        assert_eq!(store.get_reminders().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_only_touches_own_reminders() {
        let store = memory_store().await;
        let mine = store.create_reminder(new_reminder("1", None, "mine", 60)).await.unwrap();
        let theirs = store.create_reminder(new_reminder("2", None, "theirs", 60)).await.unwrap();

        assert_eq!(store.delete_reminders("1", &[mine.id, theirs.id]).await.unwrap(), 1);
        assert_eq!(store.delete_reminders("1", &[]).await.unwrap(), 0);
        assert_eq!(store.get_reminders().await.unwrap(), vec![theirs]);
    }

    #[tokio::test]
    async fn closed_pool_reports_errors() {
        let store = memory_store().await;
        store.close().await;

        assert!(store.get_reminders().await.is_err());
        assert!(store.get_reminders_by_user_id("1").await.is_err());
        assert!(store.create_reminder(new_reminder("1", None, "x", 60)).await.is_err());
    }
}
