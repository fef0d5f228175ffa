//! Output generation.
//!
//! - [`json`]: the processed dataset and prediction as a JSON report

pub mod json;
