pub mod reminder;

pub use reminder::{NewReminder, Reminder, ReminderStore};
