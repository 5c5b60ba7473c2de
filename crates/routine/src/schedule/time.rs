//! Minute-of-day arithmetic over "HH:MM" strings.
//!
//! All comparisons in the slot and occupancy code happen on parsed minute
//! offsets, never on the raw strings.

use super::error::ScheduleError;

/// Parses a zero-padded 24-hour "HH:MM" string into minutes since midnight.
///
/// # Returns
/// * `Ok(minutes)` - value in `0..=1439`
/// * `Err(ScheduleError::InvalidTimeFormat)` - missing colon, non-numeric
///   parts, or an out-of-range hour/minute
pub fn parse_hhmm(input: &str) -> Result<u16, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeFormat {
        input: input.to_string(),
    };

    let (hh, mm) = input.split_once(':').ok_or_else(invalid)?;
    if hh.len() != 2 || mm.len() != 2 {
        return Err(invalid());
    }
    // u16::parse alone would admit signs ("+9")
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hour: u16 = hh.parse().map_err(|_| invalid())?;
    let minute: u16 = mm.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(hour * 60 + minute)
}

/// Renders a minute-of-day offset back to canonical "HH:MM".
pub fn format_hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        assert_eq!(parse_hhmm("00:00"), Ok(0));
        assert_eq!(parse_hhmm("09:00"), Ok(540));
        assert_eq!(parse_hhmm("13:10"), Ok(790));
        assert_eq!(parse_hhmm("23:59"), Ok(1439));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for bad in ["", "9:00", "0900", "09-00", "24:00", "09:60", "ab:cd", "09:5", "009:00", "+9:00"] {
            assert!(
                matches!(parse_hhmm(bad), Err(ScheduleError::InvalidTimeFormat { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_parsed_values_compare_as_integers() {
        let start = parse_hhmm("09:00").unwrap();
        let end = parse_hhmm("10:20").unwrap();
        assert!(start < end);
    }

    #[test]
    fn test_format_round_trips() {
        assert_eq!(format_hhmm(540), "09:00");
        assert_eq!(format_hhmm(790), "13:10");
        assert_eq!(parse_hhmm(&format_hhmm(1439)), Ok(1439));
    }
}
