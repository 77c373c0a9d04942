use time::{macros::format_description, OffsetDateTime};

/// Source of ISO-8601 timestamps for record bookkeeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<String, time::error::Format>;
}

/// Wall clock in UTC with millisecond precision, e.g. `2024-05-01T09:30:00.123Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn format(at: OffsetDateTime) -> Result<String, time::error::Format> {
        let format = format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        );
        at.to_offset(time::UtcOffset::UTC).format(&format)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Result<String, time::error::Format> {
        Self::format(OffsetDateTime::now_utc())
    }
}
