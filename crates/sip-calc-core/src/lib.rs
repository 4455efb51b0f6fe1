pub mod calculator;
pub mod error;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

pub use calculator::{calculate_sip, project_sip, SipCalculator, SipInput, SipResult};
pub use error::SipCalcError;

#[cfg(feature = "schedule")]
pub use schedule::{sip_schedule, SipScheduleEntry};

pub type SipCalcResult<T> = Result<T, SipCalcError>;
