//! Timestamp parsing, formatting and serde adapters.
//!
//! Every timestamp the system stores or emits is UTC with millisecond
//! precision, e.g. `2024-05-01T10:00:00.000Z`. The format is fixed-width, so
//! lexicographic order of the encoded strings matches chronological order.

use std::ops::RangeInclusive;

use chrono::{
  Datelike, DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta, TimeZone,
  Utc,
};
use serde::{Deserialize, Deserializer, Serializer, de};

/// `strftime` pattern used for storage and JSON output.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// The current instant, truncated to milliseconds so that it survives an
/// encode/decode cycle unchanged.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }

pub fn format(dt: DateTime<Utc>) -> String { dt.format(FORMAT).to_string() }

/// Years that [`FORMAT`] writes as exactly four digits.
const YEARS: RangeInclusive<i32> = 0..=9999;

/// Whether `dt` encodes at the fixed width (and so decodes again).
pub fn representable(dt: DateTime<Utc>) -> bool { YEARS.contains(&dt.year()) }

/// Parse a client-supplied date or date-time.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with an offset (`2024-05-01T10:00:00Z`, `…+05:30`)
/// - a date-time without an offset, taken as UTC (`2024-05-01T10:00:00`,
///   `2024-05-01T10:00`)
/// - a bare calendar date, taken as midnight UTC (`2024-05-01`)
///
/// Instants outside years 0000..=9999 (in UTC) are rejected.
pub fn parse(input: &str) -> Option<DateTime<Utc>> {
  parse_any(input.trim()).filter(|dt| representable(*dt))
}

fn parse_any(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc).trunc_subsecs(3));
  }

  for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
      return Some(naive.and_utc().trunc_subsecs(3));
    }
  }

  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Parse a calendar date from a path segment. A full date-time is accepted
/// and truncated to its date as observed in `tz`.
pub fn parse_calendar_date<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<NaiveDate> {
  let date = match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
    Ok(date) => date,
    Err(_) => parse(input)?.with_timezone(tz).date_naive(),
  };
  YEARS.contains(&date.year()).then_some(date)
}

// ─── Day window ──────────────────────────────────────────────────────────────

/// The inclusive span `[00:00:00.000, 23:59:59.999]` of one calendar day in
/// some time zone, expressed in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
  pub start: DateTime<Utc>,
  pub end:   DateTime<Utc>,
}

impl DayWindow {
  /// Compute the window for `date` as observed in `tz`. `None` if either
  /// bound falls outside the [`representable`] range.
  pub fn of<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<Self> {
    let first = date.and_time(NaiveTime::MIN);
    let last = first
      .checked_add_signed(TimeDelta::days(1))?
      .checked_sub_signed(TimeDelta::milliseconds(1))?;
    let window = DayWindow {
      start: resolve_local(tz, first, true),
      end:   resolve_local(tz, last, false),
    };
    (representable(window.start) && representable(window.end)).then_some(window)
  }

  pub fn contains(&self, instant: DateTime<Utc>) -> bool {
    self.start <= instant && instant <= self.end
  }
}

/// Map a wall-clock time in `tz` to UTC. Ambiguous times (DST fall-back)
/// resolve to the earliest or latest candidate; non-existent times (DST
/// spring-forward gap) fall back to reading the wall clock as UTC.
fn resolve_local<Tz: TimeZone>(
  tz:       &Tz,
  naive:    NaiveDateTime,
  earliest: bool,
) -> DateTime<Utc> {
  let local = tz.from_local_datetime(&naive);
  let picked = if earliest { local.earliest() } else { local.latest() };
  picked
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|| naive.and_utc())
}

// ─── Serde adapters ──────────────────────────────────────────────────────────

fn deserialize_str<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(deserializer)?;
  parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw:?}")))
}

/// `#[serde(with = "timestamp::millis")]` for `DateTime<Utc>`.
pub mod millis {
  use super::*;

  pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format(*dt))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    deserialize_str(d)
  }
}

/// `#[serde(with = "timestamp::option")]` for `Option<DateTime<Utc>>`.
pub mod option {
  use super::*;

  pub fn serialize<S: Serializer>(
    dt: &Option<DateTime<Utc>>,
    s:  S,
  ) -> Result<S::Ok, S::Error> {
    match dt {
      Some(dt) => s.serialize_some(&format(*dt)),
      None => s.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    d: D,
  ) -> Result<Option<DateTime<Utc>>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "deserialize_str")] DateTime<Utc>);

    Ok(Option::<Wrapped>::deserialize(d)?.map(|Wrapped(dt)| dt))
  }
}

/// Deserializer for patch fields: absent → `None` (with `#[serde(default)]`),
/// `null` → `Some(None)`, a date → `Some(Some(_))`.
pub mod patch {
  use super::*;

  pub fn deserialize<'de, D: Deserializer<'de>>(
    d: D,
  ) -> Result<Option<Option<DateTime<Utc>>>, D::Error> {
    option::deserialize(d).map(Some)
  }
}
