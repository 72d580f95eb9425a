use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Long, human-readable local time, e.g.
/// `Sunday, October 18, 2026 at 3:04:05 pm MDT`.
#[must_use]
pub fn format_long(now: DateTime<Utc>, time_zone: Tz) -> String {
    now.with_timezone(&time_zone)
        .format("%A, %B %-d, %Y at %-I:%M:%S %P %Z")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_long_in_edmonton() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 21, 4, 5).unwrap();
        assert_eq!(
            format_long(now, chrono_tz::America::Edmonton),
            "Sunday, October 18, 2026 at 3:04:05 pm MDT"
        );
    }

    #[test]
    fn test_format_long_in_winter() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 17, 0, 0).unwrap();
        assert_eq!(
            format_long(now, chrono_tz::America::Edmonton),
            "Monday, January 5, 2026 at 10:00:00 am MST"
        );
    }
}
