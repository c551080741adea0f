//! Core invoice types, the GST calculation engine, and numbering.
//!
//! This module provides the line and invoice types, the pure
//! [`compute_line`] / [`compute_totals`] pair, coercion of raw form input,
//! advisory range checks, and display formatting.

mod builder;
mod calc;
mod error;
mod format;
mod numbering;
mod parse;
mod types;
mod validation;

pub use builder::*;
pub use calc::{CGST_RATE, IGST_RATE, SGST_RATE, compute_line, compute_totals};
pub use error::*;
pub use format::*;
pub use numbering::*;
pub use parse::*;
pub use types::*;
pub use validation::*;
