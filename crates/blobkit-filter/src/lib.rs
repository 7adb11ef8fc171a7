//! blobkit-filter - Blur and gradient estimation
//!
//! This crate provides the image filters that turn a color picture into an
//! edge mask:
//!
//! - Separable integer blur with a `(r + 1 - |d|)^2` kernel
//! - Finite-difference gradient estimation (magnitude and orientation)
//! - Vector-sum refinement of an existing gradient image
//! - Gradient pipelines parsed from sequence strings such as
//!   `"g + f + v15 + c + t10 + bb5"`
//!
//! All filters work in place on a [`blobkit_core::PixMut`].

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;
pub mod sequence;

pub use error::{FilterError, FilterResult};
pub use kernel::BlurKernel;

pub use convolve::gaussian_blur;
pub use edge::{finite_difference_gradient, grey_collapse, vector_sum_gradient};
pub use sequence::{DEFAULT_SEQUENCE, GradientPipeline, GradientStep, run_sequence};
