//! Type definitions for datepivot

mod error;
mod pivot;

pub use error::*;
pub use pivot::*;
