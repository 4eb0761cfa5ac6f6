use crate::domain::model::{CalendarDate, SignalParameters};
use crate::utils::error::{Result, SpiralError};

/// Derives the signal triple from a date: `n = year × month`,
/// `modulus = day`, `arm = n mod modulus`.
///
/// The day component is re-checked here even though parsed dates cannot
/// carry day 0: `CalendarDate` is externally constructible and one upstream
/// data source was observed feeding a zero day. That input is rejected, not
/// coerced.
pub fn derive_signal_parameters(date: &CalendarDate) -> Result<SignalParameters> {
    let modulus = i64::from(date.day);
    if modulus == 0 {
        return Err(SpiralError::DegenerateModulus);
    }

    let n = i64::from(date.year) * i64::from(date.month);
    let arm = n.rem_euclid(modulus);

    Ok(SignalParameters { n, modulus, arm })
}

/// Parse-and-derive convenience for `YYYY-MM-DD` input strings.
pub fn derive_from_str(input: &str) -> Result<SignalParameters> {
    let date = CalendarDate::parse(input)?;
    derive_signal_parameters(&date)
}

/// Derive from raw components, e.g. a structured date-picker value.
pub fn derive_from_ymd(year: i32, month: u32, day: u32) -> Result<SignalParameters> {
    let date = CalendarDate::from_ymd(year, month, day)?;
    derive_signal_parameters(&date)
}
