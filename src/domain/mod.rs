//! Domain models.
//!
//! Digit and base types shared by the service layer, and the response
//! bodies of the HTTP API.

pub mod digits;
pub mod dto;

pub use digits::{
    ALPHANUMERIC_MAX_BASE, Digit, DigitSequence, MAX_BASE, MAX_LENGTH, MIN_BASE, MIN_LENGTH,
    is_supported_base, is_supported_length,
};
pub use dto::{CheckResponse, GenerateResponse, HealthResponse};
