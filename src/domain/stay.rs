//! Whole-day stay arithmetic.
//!
//! Dates are calendar days without a time zone. A stay from the 10th to the
//! 12th is two nights.

use chrono::NaiveDate;

use crate::error::{Result, RoomifyError};

/// Returns the number of nights between two dates, never less than 1.
///
/// The clamp covers previews computed before the dates have been validated
/// (equal or reversed dates still price as one night).
#[must_use]
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = check_out.signed_duration_since(check_in).num_days();
    u32::try_from(days).unwrap_or(0).max(1)
}

/// Checks that `check_out` falls strictly after `check_in`.
///
/// # Errors
///
/// Returns [`RoomifyError::InvalidRequest`] if the dates are equal or
/// reversed.
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<()> {
    if check_out <= check_in {
        return Err(RoomifyError::InvalidRequest(format!(
            "check-out {check_out} must be after check-in {check_in}"
        )));
    }
    Ok(())
}
