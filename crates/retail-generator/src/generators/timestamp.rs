//! Sale and payment timestamp generators.
//!
//! Timestamps are local wall-clock times rendered without a zone, followed by
//! the configured offset suffix verbatim.

use chrono::{Days, Months, NaiveDateTime};
use rand::Rng;

/// Rendering of every generated timestamp, before the offset suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Upper bound (inclusive) of the calendar months added to a payment.
pub const MAX_PAYMENT_MONTHS: u32 = 5;

/// Upper bound (inclusive) of the calendar days added to a payment.
pub const MAX_PAYMENT_DAYS: u64 = 59;

/// Render `now` as a sale timestamp.
pub fn sale_timestamp(now: NaiveDateTime, offset: &str) -> String {
    format!("{}{}", now.format(TIMESTAMP_FORMAT), offset)
}

/// Render a payment timestamp `0..=5` months and `0..=59` days after `now`.
///
/// Month addition clamps to the last day of a shorter month.
pub fn payment_timestamp<R: Rng>(rng: &mut R, now: NaiveDateTime, offset: &str) -> String {
    let months = rng.gen_range(0..=MAX_PAYMENT_MONTHS);
    let days = rng.gen_range(0..=MAX_PAYMENT_DAYS);
    let paid_at = add_calendar(now, months, days);
    format!("{}{}", paid_at.format(TIMESTAMP_FORMAT), offset)
}

/// Calendar addition, saturating to `now` if the result is unrepresentable.
fn add_calendar(now: NaiveDateTime, months: u32, days: u64) -> NaiveDateTime {
    now.checked_add_months(Months::new(months))
        .and_then(|dt| dt.checked_add_days(Days::new(days)))
        .unwrap_or(now)
}
