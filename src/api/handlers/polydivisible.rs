//! Polydivisible check and generation handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::config::EnumerationConfig;
use crate::domain::{CheckResponse, GenerateResponse, is_supported_base, is_supported_length};
use crate::error::{AppError, Result};
use crate::service::{self, Cancellation};

const BASE_RANGE_MESSAGE: &str = "Base must be an integer between 2 and 100";
const LENGTH_RANGE_MESSAGE: &str = "Max length must be an integer between 1 and 20";

/// Query parameters for `/check`.
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    /// Digit text in the requested base.
    pub digits: Option<String>,

    /// Base, as supplied.
    pub base: Option<String>,
}

impl CheckQuery {
    /// Validate the query parameters, returning the digit text and base.
    fn validate(self) -> Result<(String, u32)> {
        let (Some(digits), Some(base)) = (non_empty(self.digits), non_empty(self.base)) else {
            return Err(AppError::MissingParam("digits and base".to_string()));
        };
        Ok((digits, parse_base(&base)?))
    }
}

/// Query parameters for `/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuery {
    /// Base, as supplied.
    pub base: Option<String>,

    /// Maximum sequence length, as supplied.
    pub max_length: Option<String>,
}

impl GenerateQuery {
    /// Validate the query parameters, returning the base and maximum length.
    fn validate(self) -> Result<(u32, usize)> {
        let (Some(base), Some(max_length)) = (non_empty(self.base), non_empty(self.max_length))
        else {
            return Err(AppError::MissingParam("base and maxLength".to_string()));
        };

        let base = parse_base(&base)?;
        let max_length = max_length
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&len| is_supported_length(len))
            .ok_or_else(|| AppError::InvalidParam(LENGTH_RANGE_MESSAGE.to_string()))?;

        Ok((base, max_length))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_base(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|&base| is_supported_base(base))
        .ok_or_else(|| AppError::InvalidParam(BASE_RANGE_MESSAGE.to_string()))
}

/// Check whether a digit string is polydivisible.
///
/// # Errors
///
/// Returns an error if a parameter is missing, the base is out of range, or
/// the digits do not parse in that base.
pub async fn check(
    query: std::result::Result<Query<CheckQuery>, QueryRejection>,
) -> Result<Json<CheckResponse>> {
    let Query(query) = query?;
    let (digits, base) = query.validate()?;

    let parsed = service::parse(&digits, base)?;
    let is_polydivisible = service::is_polydivisible(&parsed, base);

    metrics::counter!(
        "polydivisible_checks_total",
        "result" => if is_polydivisible { "polydivisible" } else { "not_polydivisible" }
    )
    .increment(1);
    debug!(base, length = parsed.len(), is_polydivisible, "Checked digits");

    Ok(Json(CheckResponse {
        is_polydivisible,
        decimal_value: service::from_digits(&parsed, base).map(|value| value.to_string()),
        digits,
        base,
        parsed_digits: parsed,
    }))
}

/// Enumerate polydivisible numbers up to a maximum length.
///
/// The search runs on the blocking pool under the configured deadline and
/// result cap. If the client goes away, the search is cancelled at its next
/// check.
///
/// # Errors
///
/// Returns an error if a parameter is missing or out of range, or if the
/// enumeration task fails.
pub async fn generate(
    State(state): State<AppState>,
    query: std::result::Result<Query<GenerateQuery>, QueryRejection>,
) -> Result<Json<GenerateResponse>> {
    let Query(query) = query?;
    let (base, max_length) = query.validate()?;

    let limits = state.config.enumeration.clone();
    let guard = CancelOnDrop::default();
    let flag = Arc::clone(&guard.0);

    let response =
        tokio::task::spawn_blocking(move || enumerate(base, max_length, &limits, flag))
            .await
            .map_err(|e| AppError::Internal(format!("enumeration task failed: {e}")))?;
    drop(guard);

    let truncated = if response.truncated { "true" } else { "false" };
    metrics::counter!("polydivisible_generations_total", "truncated" => truncated).increment(1);
    #[allow(clippy::cast_precision_loss)]
    metrics::histogram!("polydivisible_generate_results").record(response.count as f64);

    if response.truncated {
        warn!(
            base,
            max_length,
            count = response.count,
            "Enumeration truncated by deadline or result cap"
        );
    } else {
        debug!(base, max_length, count = response.count, "Enumeration complete");
    }

    Ok(Json(response))
}

/// Run one enumeration to completion, cancellation, or the result cap.
fn enumerate(
    base: u32,
    max_length: usize,
    limits: &EnumerationConfig,
    flag: Arc<AtomicBool>,
) -> GenerateResponse {
    let enumeration = service::generate(base, max_length)
        .with_cancellation(Cancellation::after(limits.timeout()).with_flag(flag))
        .with_check_interval(limits.check_interval);

    let mut iter = enumeration.iter();
    let mut numbers = Vec::new();
    let mut capped = false;
    for digits in iter.by_ref() {
        if numbers.len() == limits.max_results {
            capped = true;
            break;
        }
        numbers.push(service::format(&digits, base));
    }

    GenerateResponse::new(numbers, base, max_length, capped || iter.interrupted())
}

/// Sets the shared flag when dropped, cancelling a detached search.
#[derive(Default)]
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
