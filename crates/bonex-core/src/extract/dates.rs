//! Receipt date normalization.

use chrono::NaiveDate;

use super::Result;
use crate::error::ExtractError;

/// Date format the engine is instructed to emit.
pub const RECEIPT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse an engine-reported date strictly as DD-MM-YYYY.
///
/// No defaulting happens here. A date that does not parse, including an
/// impossible calendar date, aborts the attempt so the failure stays
/// observable; the engine instruction is where a missing date may be
/// substituted with the current day.
pub fn normalize_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), RECEIPT_DATE_FORMAT)
        .map_err(|_| ExtractError::UnparseableDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_day_month_year() {
        let date = normalize_date("05-09-2025").expect("date parses");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 5).unwrap());
    }

    #[test]
    fn test_tolerates_surrounding_whitespace() {
        let date = normalize_date(" 09-08-2025 ").expect("date parses");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 8, 9).unwrap());
    }

    #[test]
    fn test_impossible_calendar_date_fails() {
        let err = normalize_date("32-13-2025").unwrap_err();
        assert!(matches!(err, ExtractError::UnparseableDate(ref raw) if raw == "32-13-2025"));
    }

    #[test]
    fn test_wrong_field_order_fails() {
        assert!(matches!(
            normalize_date("2025-09-05"),
            Err(ExtractError::UnparseableDate(_))
        ));
    }

    #[test]
    fn test_trailing_garbage_fails() {
        assert!(matches!(
            normalize_date("05-09-2025 or so"),
            Err(ExtractError::UnparseableDate(_))
        ));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            normalize_date(""),
            Err(ExtractError::UnparseableDate(_))
        ));
    }
}
