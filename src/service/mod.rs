//! Service layer module.
//!
//! Pure polydivisibility logic: text codec, bounded prefix arithmetic,
//! validation, and enumeration. Nothing here holds state between calls.

pub mod arithmetic;
pub mod cancel;
pub mod codec;
pub mod enumerator;
pub mod validator;

pub use arithmetic::{PREFIX_MODULUS, PrefixState};
pub use cancel::Cancellation;
pub use codec::{format, from_digits, parse, to_digits};
pub use enumerator::{DEFAULT_CHECK_INTERVAL, Enumeration, EnumerationIter, generate};
pub use validator::is_polydivisible;
