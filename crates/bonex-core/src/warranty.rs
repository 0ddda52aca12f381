//! Warranty expiry arithmetic for purchased products.

use chrono::{Duration, NaiveDate};

/// Days ahead of expiry at which the reminder window opens.
const REMINDER_WINDOW_START: i64 = 28;

/// Days ahead of expiry at which the reminder window closes.
const REMINDER_WINDOW_END: i64 = 30;

/// Compute the warranty expiry date for a purchase.
///
/// Warranty months count as 30 days each. Zero months means the product
/// has no warranty to track, so there is no expiry date.
pub fn expiry_date(purchase: NaiveDate, months: u32) -> Option<NaiveDate> {
    if months == 0 {
        return None;
    }
    purchase.checked_add_signed(Duration::days(i64::from(months) * 30))
}

/// Whether an expiry date falls inside the reminder window.
///
/// The window covers expiries 28 to 30 days from today, both ends
/// inclusive. Already-expired warranties are never due.
pub fn due_for_reminder(expiry: NaiveDate, today: NaiveDate) -> bool {
    let days_left = expiry.signed_duration_since(today).num_days();
    (REMINDER_WINDOW_START..=REMINDER_WINDOW_END).contains(&days_left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expiry_counts_thirty_days_per_month() {
        assert_eq!(
            expiry_date(date(2025, 1, 1), 12),
            Some(date(2025, 12, 27))
        );
        assert_eq!(expiry_date(date(2025, 8, 9), 1), Some(date(2025, 9, 8)));
    }

    #[test]
    fn test_zero_months_has_no_expiry() {
        assert_eq!(expiry_date(date(2025, 8, 9), 0), None);
    }

    #[test]
    fn test_reminder_window_is_inclusive() {
        let today = date(2025, 8, 22);

        assert!(!due_for_reminder(today + Duration::days(27), today));
        assert!(due_for_reminder(today + Duration::days(28), today));
        assert!(due_for_reminder(today + Duration::days(29), today));
        assert!(due_for_reminder(today + Duration::days(30), today));
        assert!(!due_for_reminder(today + Duration::days(31), today));
    }

    #[test]
    fn test_expired_warranty_is_never_due() {
        let today = date(2025, 8, 22);

        assert!(!due_for_reminder(today, today));
        assert!(!due_for_reminder(date(2025, 8, 1), today));
    }
}
