use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::SipCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::SipCalcResult;

pub const MAX_MONTHLY_AMOUNT: Money = 1e9;
pub const MAX_ANNUAL_RETURN_RATE: Percent = 100.0;
pub const MAX_YEARS: Years = 100.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

const METHODOLOGY: &str =
    "Future value of an annuity-due with monthly contributions at the start of each period";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a SIP projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipInput {
    /// Contribution made at the start of every month.
    pub monthly_amount: Money,
    /// Nominal annual growth rate in percent.
    pub annual_return_rate: Percent,
    /// Investment horizon; fractional years are allowed.
    pub years: Years,
}

/// Projected outcome of a SIP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub future_value: Money,
    pub total_invested: Money,
    pub gains: Money,
    pub returns_percent: Percent,
}

/// A `SipResult` rounded for display. Fields that cannot be represented as
/// a `Decimal` (non-finite or beyond about 7.9e28) are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedSipResult {
    pub future_value: Option<Decimal>,
    pub total_invested: Option<Decimal>,
    pub gains: Option<Decimal>,
    pub returns_percent: Option<Decimal>,
}

impl SipResult {
    pub fn rounded(&self, dp: u32) -> RoundedSipResult {
        RoundedSipResult {
            future_value: round_to_decimal(self.future_value, dp),
            total_invested: round_to_decimal(self.total_invested, dp),
            gains: round_to_decimal(self.gains, dp),
            returns_percent: round_to_decimal(self.returns_percent, dp),
        }
    }
}

pub(crate) fn round_to_decimal(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

/// Stateless entry point for callers that prefer a value-type API.
#[derive(Debug, Clone, Copy, Default)]
pub struct SipCalculator;

impl SipCalculator {
    pub fn compute(
        &self,
        monthly_amount: Money,
        annual_return_rate: Percent,
        years: Years,
    ) -> SipCalcResult<SipResult> {
        calculate_sip(monthly_amount, annual_return_rate, years)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject out-of-range inputs. Checks run in a fixed order and the first
/// failure is returned. Written as negated comparisons so NaN is rejected
/// by the lower-bound checks.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn validate(
    monthly_amount: Money,
    annual_return_rate: Percent,
    years: Years,
) -> SipCalcResult<()> {
    if !(monthly_amount > 0.0) {
        return Err(SipCalcError::InvalidAmount);
    }
    if monthly_amount > MAX_MONTHLY_AMOUNT {
        return Err(SipCalcError::UnrealisticAmount);
    }
    if !(annual_return_rate > 0.0) {
        return Err(SipCalcError::InvalidRate);
    }
    if annual_return_rate > MAX_ANNUAL_RETURN_RATE {
        return Err(SipCalcError::UnrealisticRate);
    }
    if !(years > 0.0) {
        return Err(SipCalcError::InvalidDuration);
    }
    if years > MAX_YEARS {
        return Err(SipCalcError::UnrealisticDuration);
    }
    Ok(())
}

/// Convert an annual percentage into a monthly fractional rate.
pub(crate) fn monthly_rate(annual_return_rate: Percent) -> f64 {
    annual_return_rate / (MONTHS_PER_YEAR * 100.0)
}

/// Annuity-due future value: FV = P * ((1 + r)^n - 1) / r * (1 + r).
///
/// `months` may be fractional. `rate` must be strictly positive.
pub(crate) fn annuity_due_value(monthly_amount: Money, rate: f64, months: f64) -> Money {
    let growth = 1.0 + rate;
    monthly_amount * ((growth.powf(months) - 1.0) / rate) * growth
}

/// Derive the full result record for an already-validated horizon.
pub(crate) fn sip_result_at(monthly_amount: Money, rate: f64, months: f64) -> SipResult {
    let future_value = annuity_due_value(monthly_amount, rate, months);
    let total_invested = monthly_amount * months;
    let gains = future_value - total_invested;
    let returns_percent = (gains / total_invested) * 100.0;

    SipResult {
        future_value,
        total_invested,
        gains,
        returns_percent,
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Project the value of a monthly SIP.
///
/// Contributions are made at the start of each month and compound at
/// `annual_return_rate / 12` percent per month over `years * 12` months.
/// Extreme but in-range inputs are not checked for overflow.
pub fn calculate_sip(
    monthly_amount: Money,
    annual_return_rate: Percent,
    years: Years,
) -> SipCalcResult<SipResult> {
    validate(monthly_amount, annual_return_rate, years)?;

    let rate = monthly_rate(annual_return_rate);
    let months = years * MONTHS_PER_YEAR;

    Ok(sip_result_at(monthly_amount, rate, months))
}

/// Run `calculate_sip` and wrap the result with methodology, assumptions,
/// warnings and timing metadata.
pub fn project_sip(input: &SipInput) -> SipCalcResult<ComputationOutput<SipResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_sip(input.monthly_amount, input.annual_return_rate, input.years)?;

    let months = input.years * MONTHS_PER_YEAR;
    if months.fract() != 0.0 {
        warnings.push(format!(
            "horizon of {months} months is not a whole number of contributions; \
             the final period compounds at a fractional exponent"
        ));
    }
    if Decimal::from_f64(result.future_value).is_none() {
        warnings.push(format!(
            "future value {:e} exceeds the decimal range; rounded figures will be null",
            result.future_value
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, input, warnings, elapsed, result))
}
