// Calendar formatting for date, time and timestamp values (UTC).
// Each formatter returns `None` outside chrono's representable range and
// the caller falls back to the raw number.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

const DATE_EPOCH: i64 = 1 << 31;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// `yyyy-mm-dd` for a `date` payload (days since epoch, offset by 2^31).
pub(crate) fn format_date(raw: u32) -> Option<String> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    let days = i64::from(raw) - DATE_EPOCH;
    let date = if days >= 0 {
        epoch.checked_add_days(Days::new(days.unsigned_abs()))?
    } else {
        epoch.checked_sub_days(Days::new(days.unsigned_abs()))?
    };
    Some(date.format("%Y-%m-%d").to_string())
}

/// `hh:mm:ss.nnnnnnnnn` for nanoseconds since midnight.
pub(crate) fn format_time(nanos: i64) -> Option<String> {
    if nanos < 0 {
        return None;
    }
    let secs = u32::try_from(nanos / NANOS_PER_SECOND).ok()?;
    let frac = u32::try_from(nanos % NANOS_PER_SECOND).ok()?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, frac)?;
    Some(time.format("%H:%M:%S%.9f").to_string())
}

/// `yyyy-mm-dd hh:mm:ss.mmmZ` for milliseconds since the Unix epoch.
pub(crate) fn format_timestamp(millis: i64) -> Option<String> {
    let ts = DateTime::<Utc>::from_timestamp_millis(millis)?;
    Some(ts.format("%Y-%m-%d %H:%M:%S%.3fZ").to_string())
}
