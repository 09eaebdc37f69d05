// Everything users get to read, in Serbian

pub const INVALID_DATE_TIME: &str = "Невалидан датум и/или време.";
pub const EMPTY_DESCRIPTION: &str = "Опис подсетника не може бити празан.";
pub const REMINDER_CREATE_ERROR: &str = "Дошло је до грешке при прављењу подсетника.";
pub const REMINDERS_LOAD_ERROR: &str = "Дошло је до грешке при учитавању подсетника.";
pub const REMINDER_DELETE_ERROR: &str = "Дошло је до грешке при брисању подсетника.";
pub const NOT_YOUR_REMINDERS: &str = "Ово нису Ваши подсетници.";

pub const NO_REMINDERS: &str = "Немате ниједан подсетник.";
pub const CHOOSE_REMINDERS_TO_DELETE: &str = "Изаберите подсетнике за брисање.";
pub const CHOOSE_REMINDERS_PLACEHOLDER: &str = "Подсетници";

pub fn reminder_created(time: &str, description: &str) -> String {
    format!("Подсетник направљен за {time}: {description}")
}

pub fn reminders_deleted(count: u64) -> String {
    format!("Обрисано подсетника: {count}.")
}
