use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::{Captures, Regex};

/// year, month, week, day, hour, minute, second
const SECOND_CONVERSIONS: [i64; 7] = [31557600, 2629800, 604800, 86400, 3600, 60, 1];
/// 400 days, anything further out is refused
const MAX_RELATIVE_SECONDS: i64 = 34560000;
/// Time used when only a date is given
const DEFAULT_HOUR: u32 = 12;

/// Turns what people type after `when` into a point in time.
///
/// Local dates and clock times are read in a fixed UTC offset, there is no
/// zone database behind this.
pub struct DateParser {
    offset: FixedOffset,
    /// n years, n Months, n weeks, n days, n hours, n minutes, n seconds.
    /// A bare `M` or anything starting with `mo` is months, `min...` is minutes
    relative_time: Regex,
    /// today / tomorrow, optionally with a clock time
    day_keyword: Regex,
    /// 2026-12-25 14:30
    iso_date: Regex,
    /// 25.12.2026. 14:30
    dotted_date: Regex,
    /// 14:30, 2pm, at 9:15am
    time_of_day: Regex,
}

impl DateParser {
    pub fn new(offset: FixedOffset) -> Result<Self, regex::Error> {
        Ok(DateParser {
            offset,
            relative_time: Regex::new(r"^(?:(\d+)(?:y|Y)(?:[a-zA-Z]+)?)?(?:(\d+)(?:[Mm][Oo][a-zA-Z]*|M))?(?:(\d+)(?:w|W)(?:[a-zA-Z]+)?)?(?:(\d+)(?:d|D)(?:[a-zA-Z]+)?)?(?:(\d+)(?:h|H)(?:[a-zA-Z]+)?)?(?:(\d+)(?:[Mm][Ii][Nn][a-zA-Z]*|m[a-zA-Z]*))?(?:(\d+)(?:s|S)(?:[a-zA-Z]+)?)?$")?,
            day_keyword: Regex::new(r"(?i)^(today|tomorrow|danas|sutra|prekosutra|данас|сутра|прекосутра)(?:\s+(?:at\s+|u\s+|у\s+)?(\d{1,2})(?::(\d{2}))?\s*(am|pm)?)?$")?,
            iso_date: Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{2}))?$")?,
            dotted_date: Regex::new(r"^(\d{1,2})\.(\d{1,2})(?:\.(\d{4}))?\.?(?:\s+(\d{1,2}):(\d{2}))?$")?,
            time_of_day: Regex::new(r"(?i)^(?:at\s+)?(\d{1,2})(?::(\d{2}))?\s*(am|pm)?$")?,
        })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns `None` for anything it can't make sense of
    pub fn parse(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
            return Some(timestamp.with_timezone(&Utc));
        }

        self.parse_relative(text, now)
            .or_else(|| self.parse_day_keyword(text, now))
            .or_else(|| self.parse_iso_date(text))
            .or_else(|| self.parse_dotted_date(text, now))
            .or_else(|| self.parse_time_of_day(text, now))
    }

    fn parse_relative(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let text = match text.get(..3) {
            Some(head) if head.eq_ignore_ascii_case("in ") => &text[3..],
            _ => text,
        };
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let captures = self.relative_time.captures(&compact)?;
        let seconds = relative_matches_to_seconds(&captures)?;
        now.checked_add_signed(Duration::try_seconds(seconds)?)
    }

    fn parse_day_keyword(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let captures = self.day_keyword.captures(text)?;
        let days_ahead = match captures[1].to_lowercase().as_str() {
            "today" | "danas" | "данас" => 0,
            "tomorrow" | "sutra" | "сутра" => 1,
            _ => 2,
        };
        let date = self.local_today(now).checked_add_days(chrono::Days::new(days_ahead))?;
        let time = match captures.get(2) {
            Some(hour) => clock(
                hour.as_str(),
                captures.get(3).map(|m| m.as_str()),
                captures.get(4).map(|m| m.as_str()),
            )?,
            None => NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0)?,
        };
        self.to_utc(date.and_time(time))
    }

    fn parse_iso_date(&self, text: &str) -> Option<DateTime<Utc>> {
        let captures = self.iso_date.captures(text)?;
        let date = NaiveDate::from_ymd_opt(
            captures[1].parse().ok()?,
            captures[2].parse().ok()?,
            captures[3].parse().ok()?,
        )?;
        self.to_utc(date.and_time(optional_clock(&captures, 4, 5)?))
    }

    fn parse_dotted_date(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let captures = self.dotted_date.captures(text)?;
        let year = match captures.get(3) {
            Some(year) => year.as_str().parse().ok()?,
            None => chrono::Datelike::year(&self.local_today(now)),
        };
        let date =
            NaiveDate::from_ymd_opt(year, captures[2].parse().ok()?, captures[1].parse().ok()?)?;
        self.to_utc(date.and_time(optional_clock(&captures, 4, 5)?))
    }

    fn parse_time_of_day(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let captures = self.time_of_day.captures(text)?;
        let minute = captures.get(2).map(|m| m.as_str());
        let meridiem = captures.get(3).map(|m| m.as_str());
        // a bare number is too ambiguous to be a time
        if minute.is_none() && meridiem.is_none() {
            return None;
        }
        let time = clock(&captures[1], minute, meridiem)?;
        self.to_utc(self.local_today(now).and_time(time))
    }

    fn local_today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    fn to_utc(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&local)
            .single()
            .map(|timestamp| timestamp.with_timezone(&Utc))
    }
}

fn relative_matches_to_seconds(captures: &Captures) -> Option<i64> {
    let mut seconds: i64 = 0;
    let mut matched = false;
    for (i, c) in captures.iter().skip(1).enumerate() {
        let Some(c) = c else {
            continue;
        };
        let parsed_length = c.as_str().parse::<i64>().ok()?;
        seconds = seconds.checked_add(parsed_length.checked_mul(SECOND_CONVERSIONS[i])?)?;
        matched = true;
    }
    if seconds > MAX_RELATIVE_SECONDS {
        return None;
    }
    matched.then_some(seconds)
}

fn clock(hour: &str, minute: Option<&str>, meridiem: Option<&str>) -> Option<NaiveTime> {
    let mut hour: u32 = hour.parse().ok()?;
    let minute: u32 = match minute {
        Some(minute) => minute.parse().ok()?,
        None => 0,
    };
    if let Some(meridiem) = meridiem {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = meridiem.eq_ignore_ascii_case("pm");
        hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (hour, true) => hour + 12,
            (hour, false) => hour,
        };
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn optional_clock(captures: &Captures, hour: usize, minute: usize) -> Option<NaiveTime> {
    match captures.get(hour) {
        Some(h) => clock(h.as_str(), captures.get(minute).map(|m| m.as_str()), None),
        None => NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0),
    }
}
