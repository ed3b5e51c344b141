use crate::{errors::CardError, models::alertmanager::Timestamp};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Offset of the displayed wall clock from UTC, in seconds.
const DISPLAY_OFFSET_SECS: i32 = 8 * 3600;
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S CST";

/// Renders an instant on the UTC+8 wall clock as `YYYY-MM-DD HH:mm:ss CST`.
///
/// "CST" is a fixed label. No timezone database is consulted.
pub fn format_time(timestamp: &Timestamp) -> Result<String, CardError> {
    let instant = to_instant(timestamp)?;
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECS)
        .ok_or_else(|| CardError::InvalidTimestamp(timestamp.to_string()))?;
    Ok(instant
        .with_timezone(&offset)
        .format(DISPLAY_FORMAT)
        .to_string())
}

fn to_instant(timestamp: &Timestamp) -> Result<DateTime<Utc>, CardError> {
    match timestamp {
        Timestamp::Text(text) => parse_text(text),
        Timestamp::EpochMillis(millis) => millis
            .as_i64()
            .or_else(|| millis.as_f64().map(|m| m.floor() as i64))
            .and_then(|m| Utc.timestamp_millis_opt(m).single())
            .ok_or_else(|| CardError::InvalidTimestamp(millis.to_string())),
    }
}

fn parse_text(text: &str) -> Result<DateTime<Utc>, CardError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // No offset given, read it as UTC.
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| {
            log::debug!("Failed to parse timestamp '{text}': {e}");
            CardError::InvalidTimestamp(text.to_string())
        })
}

#[cfg(test)]
mod test {
    use super::*;

    fn text(value: &str) -> Timestamp {
        Timestamp::Text(value.to_string())
    }

    #[test]
    fn utc_is_shifted_eight_hours() {
        let formatted = format_time(&text("2024-01-01T00:00:00Z")).expect("Failed to format");
        assert_eq!(formatted, "2024-01-01 08:00:00 CST");
    }

    #[test]
    fn crosses_the_date_line() {
        let formatted = format_time(&text("2023-12-31T20:30:15Z")).expect("Failed to format");
        assert_eq!(formatted, "2024-01-01 04:30:15 CST");
    }

    #[test]
    fn honours_source_offset_and_fraction() {
        let formatted =
            format_time(&text("2024-06-01T10:00:00.123456789+02:00")).expect("Failed to format");
        assert_eq!(formatted, "2024-06-01 16:00:00 CST");
    }

    #[test]
    fn naive_datetime_is_utc() {
        let formatted = format_time(&text("2024-01-01T00:00:00")).expect("Failed to format");
        assert_eq!(formatted, "2024-01-01 08:00:00 CST");
    }

    fn epoch(json: &str) -> Timestamp {
        serde_json::from_str(json).expect("Failed to load timestamp")
    }

    #[test]
    fn epoch_millis() {
        let formatted = format_time(&epoch("1704067200000")).expect("Failed to format");
        assert_eq!(formatted, "2024-01-01 08:00:00 CST");
    }

    #[test]
    fn fractional_epoch_millis() {
        for json in ["1704067200000.0", "1704067200999.9", "1.7040672e12"] {
            let formatted = format_time(&epoch(json)).expect("Failed to format");
            assert_eq!(formatted, "2024-01-01 08:00:00 CST", "for {json}");
        }
    }

    #[test]
    fn out_of_range_epoch_is_invalid() {
        assert!(matches!(
            format_time(&epoch("1e300")),
            Err(CardError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        let result = format_time(&text("yesterday-ish"));
        assert!(matches!(result, Err(CardError::InvalidTimestamp(t)) if t == "yesterday-ish"));
    }

    #[test]
    fn empty_is_invalid() {
        assert!(matches!(
            format_time(&text("")),
            Err(CardError::InvalidTimestamp(_))
        ));
    }
}
