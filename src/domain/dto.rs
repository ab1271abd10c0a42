//! Data Transfer Objects for API responses.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use super::DigitSequence;

/// Result of checking one digit string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    /// Whether every prefix of length `k` is divisible by `k`.
    pub is_polydivisible: bool,

    /// The digit text exactly as supplied.
    pub digits: String,

    /// Base the text was parsed in.
    pub base: u32,

    /// Parsed digit values, most significant first.
    pub parsed_digits: DigitSequence,

    /// Decimal value of the number, or `None` if it exceeds 128 bits.
    ///
    /// Serialized as a string so JSON clients do not lose precision.
    pub decimal_value: Option<String>,
}

/// Result of enumerating polydivisible numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Formatted numbers in enumeration order.
    pub polydivisible_numbers: Vec<String>,

    /// Base enumerated.
    pub base: u32,

    /// Maximum length requested.
    pub max_length: usize,

    /// Number of entries in `polydivisible_numbers`.
    pub count: usize,

    /// True when the deadline or result cap cut the enumeration short.
    pub truncated: bool,
}

impl GenerateResponse {
    /// Create a response, deriving `count` from the numbers.
    #[must_use]
    pub fn new(
        polydivisible_numbers: Vec<String>,
        base: u32,
        max_length: usize,
        truncated: bool,
    ) -> Self {
        Self {
            count: polydivisible_numbers.len(),
            polydivisible_numbers,
            base,
            max_length,
            truncated,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"OK"` while the service is up.
    pub status: String,

    /// Current time, RFC 3339 / ISO 8601 in UTC.
    pub timestamp: String,
}

impl HealthResponse {
    /// Health response stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            status: "OK".to_string(),
            timestamp: chrono::Utc::now()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_check_response_shape() {
        let response = CheckResponse {
            is_polydivisible: true,
            digits: "1232".to_string(),
            base: 10,
            parsed_digits: vec![1, 2, 3, 2],
            decimal_value: Some("1232".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "isPolydivisible": true,
                "digits": "1232",
                "base": 10,
                "parsedDigits": [1, 2, 3, 2],
                "decimalValue": "1232"
            })
        );
    }

    #[test]
    fn test_generate_response_count() {
        let response = GenerateResponse::new(vec!["1".into(), "2".into()], 10, 1, false);
        assert_eq!(response.count, 2);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["polydivisibleNumbers"], json!(["1", "2"]));
        assert_eq!(value["maxLength"], json!(1));
        assert_eq!(value["truncated"], json!(false));
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::now();
        assert_eq!(health.status, "OK");
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
        assert!(health.timestamp.ends_with('Z'));
    }
}
