//! Clock-style formatting of episode durations.

use thiserror::Error;

/// Error returned when a clock-style time string cannot be read back into seconds.
#[derive(Debug, Error, PartialEq)]
pub enum ParseDurationError {
    #[error("expected at most three colon-separated components, found {0}")]
    TooManyComponents(usize),
    #[error("time component is not a number")]
    InvalidComponent(#[from] std::num::ParseIntError),
    #[error("time value does not fit in a second count")]
    Overflow,
}

/// Format a duration in seconds as `HH:MM:SS` with every component zero-padded to
/// two digits. Durations of one hundred hours or more widen the hour field instead
/// of truncating.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Read a `HH:MM:SS`, `MM:SS` or bare `SS` string back into a number of seconds.
/// The inverse of [format_duration] for any value it produces; components whose
/// total exceeds `u64::MAX` seconds are rejected.
pub fn parse_duration(time: &str) -> Result<u64, ParseDurationError> {
    let parts: Vec<&str> = time.split(':').collect();

    match parts.len() {
        3 => {
            let hours: u64 = parts[0].parse()?;
            let minutes: u64 = parts[1].parse()?;
            let seconds: u64 = parts[2].parse()?;
            total_seconds(hours, minutes, seconds)
        }
        2 => {
            let minutes: u64 = parts[0].parse()?;
            let seconds: u64 = parts[1].parse()?;
            total_seconds(0, minutes, seconds)
        }
        1 => {
            let seconds: u64 = parts[0].parse()?;
            Ok(seconds)
        }
        n => Err(ParseDurationError::TooManyComponents(n)),
    }
}

fn total_seconds(hours: u64, minutes: u64, seconds: u64) -> Result<u64, ParseDurationError> {
    hours
        .checked_mul(3600)
        .zip(minutes.checked_mul(60))
        .and_then(|(hours, minutes)| hours.checked_add(minutes))
        .and_then(|total| total.checked_add(seconds))
        .ok_or(ParseDurationError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_zero_pads_every_component() {
        assert_eq!("00:00:00", format_duration(0));
        assert_eq!("00:00:59", format_duration(59));
        assert_eq!("00:01:00", format_duration(60));
        assert_eq!("01:01:01", format_duration(3661));
    }

    #[test]
    fn format_duration_widens_hours_past_two_digits() {
        // Arrange
        let input = 100 * 3600 + 42;

        // Act
        let actual = format_duration(input);

        // Assert
        assert_eq!("100:00:42", actual);
    }

    #[test]
    fn parse_duration_round_trips_formatted_values() {
        // Arrange
        let inputs = [0u64, 1, 59, 60, 61, 3599, 3600, 3661, 86_399, 86_400, 123_456_789];

        for input in inputs {
            // Act
            let actual = parse_duration(&format_duration(input));

            // Assert
            assert_eq!(Ok(input), actual);
        }
    }

    #[test]
    fn parse_duration_accepts_shortened_forms() {
        assert_eq!(Ok(90), parse_duration("1:30"));
        assert_eq!(Ok(42), parse_duration("42"));
    }

    #[test]
    fn parse_duration_rejects_too_many_components() {
        // Arrange
        let input = "1:02:03:04";

        // Act
        let actual = parse_duration(input);

        // Assert
        assert_eq!(Err(ParseDurationError::TooManyComponents(4)), actual);
    }

    #[test]
    fn parse_duration_rejects_non_numeric_components() {
        // Act
        let actual = parse_duration("01:xx:00");

        // Assert
        assert!(matches!(
            actual,
            Err(ParseDurationError::InvalidComponent(_))
        ));
    }

    #[test]
    fn parse_duration_rejects_totals_past_the_representable_range() {
        // Arrange
        let inputs = ["18446744073709551615:59:59", "0:18446744073709551615:59"];

        for input in inputs {
            // Act
            let actual = parse_duration(input);

            // Assert
            assert_eq!(Err(ParseDurationError::Overflow), actual);
        }
    }
}
