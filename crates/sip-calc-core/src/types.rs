use serde::{Deserialize, Serialize};

/// Monetary amounts. Plain f64; rounding to a fixed scale happens only at
/// presentation time.
pub type Money = f64;

/// Rates expressed as percentages (12.0 = 12% per year).
pub type Percent = f64;

/// Year fractions or counts
pub type Years = f64;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

impl<T: Serialize> ComputationOutput<T> {
    /// Replace the result while keeping the envelope intact.
    pub fn map_result<U: Serialize>(self, f: impl FnOnce(T) -> U) -> ComputationOutput<U> {
        ComputationOutput {
            result: f(self.result),
            methodology: self.methodology,
            assumptions: self.assumptions,
            warnings: self.warnings,
            metadata: self.metadata,
        }
    }
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64_ieee754".to_string(),
        },
    }
}
