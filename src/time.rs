use chrono::{Local, TimeZone, Utc};

/// Checks whether a unix timestamp (seconds) falls on the current calendar
/// date of `tz`. Out of range timestamps are never today.
///
/// Both dates are taken in `tz`. The current date is not read from the
/// process local clock, so for a `tz` other than [`Local`] the result can
/// differ from comparing against the local date around midnight. Use
/// [`is_today_local`] for the local calendar.
///
/// # Examples
/// ```
/// use chrono::{Utc, FixedOffset};
/// use utilkit::time::is_today;
///
/// let tz = FixedOffset::east_opt(3 * 3600).unwrap();
/// assert!(is_today(Utc::now().timestamp(), &tz));
/// assert!(!is_today(0, &tz));
/// ```
pub fn is_today<Tz>(timestamp: i64, tz: &Tz) -> bool
where
    Tz: TimeZone,
{
    let date = match tz.timestamp_opt(timestamp, 0).single() {
        Some(date) => date.date_naive(),
        None => return false,
    };
    let today = Utc::now().with_timezone(tz).date_naive();
    date == today
}

/// [`is_today`] in the system local timezone.
#[inline]
pub fn is_today_local(timestamp: i64) -> bool {
    is_today(timestamp, &Local)
}
