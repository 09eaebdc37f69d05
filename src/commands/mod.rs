pub mod reminders;

pub fn commands() -> Vec<crate::Command> {
    reminders::commands().into_iter().collect()
}
