use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parse an ISO-8601 timestamp into a naive UTC date-time.
///
/// Timestamps carrying an offset are converted to UTC. Naive timestamps are
/// taken as already being UTC. A bare date means midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_utc());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_naive_iso_forms() {
        assert_eq!(
            parse_timestamp("2024-05-01T14:30:00"),
            Some(expected(2024, 5, 1, 14, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-05-01 14:30:00"),
            Some(expected(2024, 5, 1, 14, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-05-01T14:30"),
            Some(expected(2024, 5, 1, 14, 30, 0))
        );
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_timestamp("2024-05-01T14:30:00.250").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_offsets_convert_to_utc() {
        assert_eq!(
            parse_timestamp("2024-05-01T23:30:00-02:00"),
            Some(expected(2024, 5, 2, 1, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-05-01T10:00:00Z"),
            Some(expected(2024, 5, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-05-01 10:00:00+01:00"),
            Some(expected(2024, 5, 1, 9, 0, 0))
        );
    }

    #[test]
    fn test_bare_date_is_midnight() {
        assert_eq!(
            parse_timestamp("2024-05-01"),
            Some(expected(2024, 5, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01T00:00:00"), None);
        assert_eq!(parse_timestamp("1714573800"), None);
    }
}
