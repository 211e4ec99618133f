//! Timestamp decoding for export date titles.
//!
//! Every message body carries a `.date` element whose `title` attribute holds
//! the local send time as `DD.MM.YYYY HH:MM:SS`. The export does not say which
//! zone that local time is in, so the caller supplies one zone name for the
//! whole run.
//!
//! [`TimeResolver`] memoizes the most recently loaded zone. Workers share one
//! resolver by reference; the cache sits behind a single mutex and each lookup
//! is one critical section.

use std::sync::{LazyLock, Mutex, PoisonError};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, TgroomError};

/// `DD.MM.YYYY HH:MM:SS` at the start of the title. Newer exports append
/// ` UTC+07:00`, which is ignored.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4}) ([0-9]{2}):([0-9]{2}):([0-9]{2})")
        .expect("date pattern is a valid regex")
});

const EXPECTED_FORMAT: &str = "expected DD.MM.YYYY HH:MM:SS";

#[derive(Debug)]
struct CachedZone {
    name: String,
    zone: Tz,
}

/// Converts export date strings into absolute instants.
///
/// # Example
///
/// ```rust
/// use tgroom::time::TimeResolver;
///
/// let resolver = TimeResolver::new();
/// let sent = resolver.resolve("29.12.2019 14:05:30", "Asia/Jakarta")?;
/// assert_eq!(sent.to_rfc3339(), "2019-12-29T07:05:30+00:00");
/// # Ok::<(), tgroom::TgroomError>(())
/// ```
#[derive(Debug, Default)]
pub struct TimeResolver {
    cache: Mutex<Option<CachedZone>>,
}

impl TimeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `date` as a local time in `zone_name`.
    ///
    /// # Errors
    ///
    /// - [`TgroomError::MalformedTimestamp`] if `date` does not match the
    ///   pattern, names an impossible calendar date, or falls in a DST gap
    /// - [`TgroomError::UnresolvableTimeZone`] if `zone_name` is unknown
    ///
    /// An ambiguous local time (DST fall-back) resolves to the earlier instant.
    pub fn resolve(&self, date: &str, zone_name: &str) -> Result<DateTime<Utc>> {
        let local = parse_local(date)?;
        let zone = self.zone(zone_name)?;

        zone.from_local_datetime(&local)
            .earliest()
            .map(|instant| instant.with_timezone(&Utc))
            .ok_or_else(|| {
                TgroomError::malformed_timestamp(
                    date,
                    format!("local time does not exist in {zone_name}"),
                )
            })
    }

    /// Returns the zone for `name`, loading it on a cache miss.
    ///
    /// The check and the replacement happen under one lock acquisition.
    pub fn zone(&self, name: &str) -> Result<Tz> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = cache.as_ref() {
            if cached.name == name {
                return Ok(cached.zone);
            }
        }

        let zone: Tz = name
            .parse()
            .map_err(|_| TgroomError::unresolvable_time_zone(name))?;
        debug!(zone = name, "loaded time zone");

        *cache = Some(CachedZone {
            name: name.to_string(),
            zone,
        });
        Ok(zone)
    }
}

/// Parses the date title into a naive local date-time.
pub fn parse_local(date: &str) -> Result<NaiveDateTime> {
    let caps = DATE_PATTERN
        .captures(date.trim())
        .ok_or_else(|| TgroomError::malformed_timestamp(date, EXPECTED_FORMAT))?;

    let field = |index: usize| -> Result<u32> {
        caps[index]
            .parse()
            .map_err(|_| TgroomError::malformed_timestamp(date, EXPECTED_FORMAT))
    };

    let (day, month, hour, minute, second) = (field(1)?, field(2)?, field(4)?, field(5)?, field(6)?);
    let year = i32::try_from(field(3)?)
        .map_err(|_| TgroomError::malformed_timestamp(date, "year out of range"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(|| TgroomError::malformed_timestamp(date, "no such calendar date or time"))
}
