use chrono::{DateTime, Local, TimeZone, Utc};

pub fn local_date_yyyy_mm_dd() -> String {
    let now: DateTime<Local> = Local::now();
    now.format("%Y-%m-%d").to_string()
}

/// Milliseconds since the Unix epoch, used as the cache-busting value.
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Day-first date and time, the way a French browser prints `toLocaleString()`.
pub fn format_local_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%d/%m/%Y %H:%M:%S").to_string()
}
