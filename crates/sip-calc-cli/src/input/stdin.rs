use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Parse piped JSON from stdin into `T`.
///
/// Returns None when stdin is a terminal or carries only whitespace, so
/// callers can fall back to flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(raw: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: T = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin: {}", e))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sip_calc_core::SipInput;

    #[test]
    fn test_blank_input_is_none() {
        let parsed: Option<SipInput> = parse_piped("  \n").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_piped_document_is_parsed() {
        let parsed: Option<SipInput> =
            parse_piped(r#"{"monthly_amount": 500, "annual_return_rate": 8, "years": 2.5}"#)
                .unwrap();
        assert_eq!(parsed.map(|p| p.years), Some(2.5));
    }

    #[test]
    fn test_malformed_document_names_stdin() {
        let err = parse_piped::<SipInput>("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse stdin"));
    }
}
