use anyhow::{anyhow, Error};
use chrono::{NaiveDate, NaiveDateTime};

/// Converts the value of a date input (`YYYY-MM-DD`) into the epoch
/// millisecond timestamp the remote service stores, taken at midnight UTC.
pub fn date_input_to_timestamp(input: &str) -> Result<i64, Error> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid completion date {:?}: {}", input, e))?;

    Ok(date.and_hms(0, 0, 0).timestamp_millis())
}

pub fn format_timestamp(timestamp: i64) -> String {
    match NaiveDateTime::from_timestamp_opt(timestamp.div_euclid(1000), 0) {
        Some(datetime) => datetime.format("%Y-%m-%d").to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_input_converts_to_epoch_milliseconds() {
        assert_eq!(date_input_to_timestamp("2025-06-01").unwrap(), 1748736000000);
    }

    #[test]
    fn epoch_date_converts_to_zero() {
        assert_eq!(date_input_to_timestamp("1970-01-01").unwrap(), 0);
    }

    #[test]
    fn malformed_date_input_is_an_error() {
        assert!(date_input_to_timestamp("").is_err());
        assert!(date_input_to_timestamp("01/06/2025").is_err());
        assert!(date_input_to_timestamp("2025-13-40").is_err());
    }

    #[test]
    fn timestamp_formats_as_calendar_date() {
        assert_eq!(format_timestamp(1748736000000), "2025-06-01");
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_raw_value() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
