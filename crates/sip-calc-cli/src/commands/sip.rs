use clap::Args;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use sip_calc_core::calculator::{self, SipInput};
use sip_calc_core::schedule;
use sip_calc_core::types::ComputationOutput;

use crate::input;

/// Arguments shared by the projection and schedule commands
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Contribution made at the start of each month
    #[arg(long, allow_hyphen_values = true)]
    pub monthly_amount: Option<f64>,

    /// Nominal annual return in percent (e.g. 12 for 12%)
    #[arg(long, allow_hyphen_values = true)]
    pub annual_return_rate: Option<f64>,

    /// Investment horizon in years; fractions allowed
    #[arg(long, allow_hyphen_values = true)]
    pub years: Option<f64>,
}

impl SipArgs {
    fn has_all_flags(&self) -> bool {
        self.monthly_amount.is_some() && self.annual_return_rate.is_some() && self.years.is_some()
    }
}

/// File or stdin document. Any field may be left for a flag to supply.
#[derive(Debug, Default, Deserialize)]
struct PartialSipInput {
    monthly_amount: Option<f64>,
    annual_return_rate: Option<f64>,
    years: Option<f64>,
}

/// Combine flag values with a file/stdin document. Flags win field by field.
fn merge_input(
    args: &SipArgs,
    base: PartialSipInput,
) -> Result<SipInput, Box<dyn std::error::Error>> {
    let monthly_amount = args.monthly_amount.or(base.monthly_amount);
    let annual_return_rate = args.annual_return_rate.or(base.annual_return_rate);
    let years = args.years.or(base.years);

    match (monthly_amount, annual_return_rate, years) {
        (Some(monthly_amount), Some(annual_return_rate), Some(years)) => Ok(SipInput {
            monthly_amount,
            annual_return_rate,
            years,
        }),
        _ => Err("--monthly-amount, --annual-return-rate and --years, \
                  --input <file.json|file.yaml>, or stdin required"
            .into()),
    }
}

fn resolve_input(args: &SipArgs) -> Result<SipInput, Box<dyn std::error::Error>> {
    let base: PartialSipInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if args.has_all_flags() {
        PartialSipInput::default()
    } else {
        input::stdin::read_stdin()?.unwrap_or_default()
    };

    let sip_input = merge_input(args, base)?;
    debug!(
        monthly_amount = sip_input.monthly_amount,
        annual_return_rate = sip_input.annual_return_rate,
        years = sip_input.years,
        "resolved sip input"
    );
    Ok(sip_input)
}

fn log_envelope<T: serde::Serialize>(output: &ComputationOutput<T>) {
    for w in &output.warnings {
        warn!("{w}");
    }
    debug!(
        elapsed_us = output.metadata.computation_time_us,
        "computation finished"
    );
}

pub fn run_project(args: SipArgs, precision: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input = resolve_input(&args)?;
    let result = calculator::project_sip(&sip_input)?;
    log_envelope(&result);
    let rendered = result.map_result(|r| r.rounded(precision));
    Ok(serde_json::to_value(rendered)?)
}

pub fn run_schedule(args: SipArgs, precision: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input = resolve_input(&args)?;
    let result = schedule::sip_schedule(&sip_input)?;
    log_envelope(&result);
    let rendered = result.map_result(|entries| {
        entries
            .iter()
            .map(|e| e.rounded(precision))
            .collect::<Vec<_>>()
    });
    Ok(serde_json::to_value(rendered)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(
        monthly_amount: Option<f64>,
        annual_return_rate: Option<f64>,
        years: Option<f64>,
    ) -> SipArgs {
        SipArgs {
            input: None,
            monthly_amount,
            annual_return_rate,
            years,
        }
    }

    #[test]
    fn test_flags_alone_are_enough() {
        let merged =
            merge_input(&args(Some(1000.0), Some(12.0), Some(10.0)), PartialSipInput::default())
                .unwrap();
        assert_eq!(merged.monthly_amount, 1000.0);
        assert_eq!(merged.annual_return_rate, 12.0);
        assert_eq!(merged.years, 10.0);
    }

    #[test]
    fn test_flags_override_file_fields() {
        let base = PartialSipInput {
            monthly_amount: Some(500.0),
            annual_return_rate: Some(8.0),
            years: Some(5.0),
        };
        let merged = merge_input(&args(None, Some(10.0), None), base).unwrap();
        assert_eq!(merged.monthly_amount, 500.0);
        assert_eq!(merged.annual_return_rate, 10.0);
        assert_eq!(merged.years, 5.0);
    }

    #[test]
    fn test_flag_fills_field_missing_from_file() {
        let path = std::env::temp_dir().join(format!(
            "sip-cli-{}-two-fields.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"monthly_amount": 1000, "annual_return_rate": 12}"#).unwrap();

        let sip_args = SipArgs {
            input: Some(path.to_string_lossy().into_owned()),
            monthly_amount: None,
            annual_return_rate: None,
            years: Some(10.0),
        };
        let value = run_project(sip_args, 2).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(value["result"]["future_value"], "232339.08");
        assert_eq!(value["assumptions"]["years"], 10.0);
    }

    #[test]
    fn test_file_missing_field_without_flag_is_usage_error() {
        let base = PartialSipInput {
            monthly_amount: Some(1000.0),
            annual_return_rate: Some(12.0),
            years: None,
        };
        let err = merge_input(&args(None, None, None), base).unwrap_err();
        assert!(err.to_string().contains("--years"));
    }

    #[test]
    fn test_missing_field_is_usage_error() {
        let err = merge_input(&args(Some(1000.0), None, Some(10.0)), PartialSipInput::default())
            .unwrap_err();
        assert!(err.to_string().contains("--annual-return-rate"));
    }

    #[test]
    fn test_project_renders_rounded_strings() {
        let value = run_project(args(Some(1000.0), Some(12.0), Some(10.0)), 2).unwrap();
        assert_eq!(value["result"]["future_value"], "232339.08");
        assert_eq!(value["result"]["returns_percent"], "93.62");
    }

    #[test]
    fn test_project_surfaces_validation_message() {
        let err = run_project(args(Some(1000.0), Some(120.0), Some(10.0)), 2).unwrap_err();
        assert_eq!(err.to_string(), "annual return rate must not exceed 100%");
    }

    #[test]
    fn test_schedule_renders_one_row_per_year() {
        let value = run_schedule(args(Some(100.0), Some(6.0), Some(3.0)), 2).unwrap();
        assert_eq!(value["result"].as_array().map(|a| a.len()), Some(3));
    }
}
