use thiserror::Error;

/// Rejection reasons for SIP inputs, in the order they are checked.
///
/// All variants are caller-correctable: retrying with the same input
/// always fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SipCalcError {
    #[error("monthly amount must be greater than 0")]
    InvalidAmount,

    #[error("monthly amount is unrealistically high")]
    UnrealisticAmount,

    #[error("annual return rate must be greater than 0")]
    InvalidRate,

    #[error("annual return rate must not exceed 100%")]
    UnrealisticRate,

    #[error("years must be greater than 0")]
    InvalidDuration,

    #[error("years must not exceed 100")]
    UnrealisticDuration,
}

impl SipCalcError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            SipCalcError::InvalidAmount | SipCalcError::UnrealisticAmount => "monthly_amount",
            SipCalcError::InvalidRate | SipCalcError::UnrealisticRate => "annual_return_rate",
            SipCalcError::InvalidDuration | SipCalcError::UnrealisticDuration => "years",
        }
    }
}
