use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calculator::{
    monthly_rate, round_to_decimal, sip_result_at, validate, SipInput, MONTHS_PER_YEAR,
};
use crate::types::{with_metadata, ComputationOutput, Money, Years};
use crate::SipCalcResult;

/// Position of the plan at one point along the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipScheduleEntry {
    pub year: Years,
    pub months: f64,
    pub total_invested: Money,
    pub future_value: Money,
    pub gains: Money,
}

/// A `SipScheduleEntry` with money fields rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundedScheduleEntry {
    pub year: Years,
    pub months: f64,
    pub total_invested: Option<Decimal>,
    pub future_value: Option<Decimal>,
    pub gains: Option<Decimal>,
}

impl SipScheduleEntry {
    pub fn rounded(&self, dp: u32) -> RoundedScheduleEntry {
        RoundedScheduleEntry {
            year: self.year,
            months: self.months,
            total_invested: round_to_decimal(self.total_invested, dp),
            future_value: round_to_decimal(self.future_value, dp),
            gains: round_to_decimal(self.gains, dp),
        }
    }
}

/// Year-by-year growth of a SIP.
///
/// Emits one entry at the end of each whole year strictly before the
/// horizon, then a final entry at the horizon itself, so a 2.5 year plan
/// yields entries at 1, 2 and 2.5 years. The final entry always matches
/// `calculate_sip` for the same input.
pub fn sip_schedule(input: &SipInput) -> SipCalcResult<ComputationOutput<Vec<SipScheduleEntry>>> {
    let start = Instant::now();

    validate(input.monthly_amount, input.annual_return_rate, input.years)?;

    let rate = monthly_rate(input.annual_return_rate);
    let whole_years = input.years.floor() as u32;

    let mut entries: Vec<SipScheduleEntry> = Vec::with_capacity(whole_years as usize + 1);
    let horizons = (1..=whole_years)
        .map(f64::from)
        .filter(|y| *y < input.years)
        .chain(std::iter::once(input.years));

    for year in horizons {
        let months = year * MONTHS_PER_YEAR;
        let point = sip_result_at(input.monthly_amount, rate, months);
        entries.push(SipScheduleEntry {
            year,
            months,
            total_invested: point.total_invested,
            future_value: point.future_value,
            gains: point.gains,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annuity-due future value evaluated at the end of each year of the horizon",
        input,
        Vec::new(),
        elapsed,
        entries,
    ))
}
