//! blobkit-test - Regression test support for blobkit
//!
//! Regression tests live in each crate's `tests/*_reg.rs` and drive a
//! [`RegParams`], which counts comparisons, records every failure and
//! reports them all at the end instead of stopping at the first one.
//!
//! All fixtures are synthetic; see the [`synth`] builders.
//!
//! # Usage
//!
//! ```ignore
//! use blobkit_test::RegParams;
//!
//! let mut rp = RegParams::new("label");
//! rp.compare_values(2.0, colors.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::RegParams;
