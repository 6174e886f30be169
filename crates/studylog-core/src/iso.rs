//! Lenient ISO-8601 parsing for event timestamps and query bounds.
//!
//! Accepts a bare date (`2025-12-01`, read as midnight), local date-times with
//! `T` or a space separator and optional seconds and fractions, and RFC 3339
//! timestamps with an offset. Offset-bearing values are normalised to UTC so
//! that everything compares as a naive date-time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const LOCAL_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
];

/// Parse `s` as an ISO-8601 date or date-time. Returns `None` if it is not one.
pub fn parse(s: &str) -> Option<NaiveDateTime> {
  let s = s.trim();
  if s.is_empty() {
    return None;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.naive_utc());
  }

  LOCAL_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .or_else(|| {
      NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, NaiveDateTime};

  use super::parse;

  fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .unwrap()
      .and_hms_opt(h, min, s)
      .unwrap()
  }

  #[test]
  fn accepts_common_shapes() {
    assert_eq!(parse("2025-12-01T15:00:00"), Some(at(2025, 12, 1, 15, 0, 0)));
    assert_eq!(parse("2025-12-01T15:00"), Some(at(2025, 12, 1, 15, 0, 0)));
    assert_eq!(parse("2025-12-01 08:30:15"), Some(at(2025, 12, 1, 8, 30, 15)));
    assert_eq!(parse("2025-12-01"), Some(at(2025, 12, 1, 0, 0, 0)));
    assert_eq!(parse(" 2025-12-01 "), Some(at(2025, 12, 1, 0, 0, 0)));
  }

  #[test]
  fn fractional_seconds_are_accepted() {
    let dt = parse("2025-12-01T15:00:00.250").unwrap();
    assert_eq!(dt.and_utc().timestamp_subsec_millis(), 250);
  }

  #[test]
  fn offsets_are_normalised_to_utc() {
    assert_eq!(parse("2025-12-01T15:00:00Z"), Some(at(2025, 12, 1, 15, 0, 0)));
    assert_eq!(
      parse("2025-12-01T15:00:00+02:00"),
      Some(at(2025, 12, 1, 13, 0, 0))
    );
  }

  #[test]
  fn rejects_non_dates() {
    for s in ["", "not-a-date", "2025-13-01", "01.12.2025", "2025-12-01T25:00"] {
      assert_eq!(parse(s), None, "input {s:?}");
    }
  }
}
