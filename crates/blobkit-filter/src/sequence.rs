//! Gradient pipelines described by sequence strings
//!
//! A pipeline is a list of steps separated by `+`. Whitespace is ignored
//! and step names are case-insensitive.
//!
//! - `g` - grayscale
//! - `f` - finite-difference gradient
//! - `v<n>` - `n` passes of the vector-sum refinement (`n > 0`)
//! - `c` - grey collapse (magnitude into all channels)
//! - `t<n>` / `ti<n>` - threshold at level `n`, plain or inverted
//! - `bw<n>` / `bb<n>` - paint a white / black border of thickness `n`
//! - `b<n>` - blur with radius `n` (`n > 0`)
//!
//! # Examples
//!
//! ```
//! use blobkit_filter::sequence::{GradientPipeline, GradientStep};
//!
//! let pipeline = GradientPipeline::parse("g + f + v3 + c").unwrap();
//! assert_eq!(pipeline.len(), 4);
//! assert_eq!(pipeline.steps()[2], GradientStep::VectorSum { passes: 3 });
//! ```

use std::fmt;

use crate::convolve::gaussian_blur;
use crate::edge::{finite_difference_gradient, grey_collapse, vector_sum_gradient};
use crate::kernel::MAX_BLUR_RADIUS;
use crate::{FilterError, FilterResult};
use blobkit_core::PixMut;

/// Sequence producing an edge mask from a color image.
///
/// Runs fifteen vector-sum passes. For the nine-pass form pass
/// `g + f + v9 + c + t10 + bb5` to [`GradientPipeline::parse`].
pub const DEFAULT_SEQUENCE: &str = "g + f + v15 + c + t10 + bb5";

/// A single parsed pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientStep {
    /// Average the color channels
    Grayscale,
    /// Central-difference gradient estimate
    FiniteDifference,
    /// Repeated vector-sum refinement
    VectorSum {
        /// Number of passes
        passes: u32,
    },
    /// Copy magnitude into all channels
    GreyCollapse,
    /// Binarize on the blue channel
    Threshold {
        /// Level at or above which a pixel is background
        level: u8,
        /// Swap object and background colors
        invert: bool,
    },
    /// Paint a frame around the image
    CropBorder {
        /// Frame thickness
        thickness: u32,
        /// White frame if true, black otherwise
        white: bool,
    },
    /// Integer blur
    Blur {
        /// Kernel radius
        radius: u32,
    },
}

impl GradientStep {
    /// Run this step on `pix`.
    pub fn apply(&self, pix: &mut PixMut) -> FilterResult<()> {
        match *self {
            GradientStep::Grayscale => pix.grayscale(),
            GradientStep::FiniteDifference => finite_difference_gradient(pix),
            GradientStep::VectorSum { passes } => {
                for _ in 0..passes {
                    vector_sum_gradient(pix);
                }
            }
            GradientStep::GreyCollapse => grey_collapse(pix),
            GradientStep::Threshold { level, invert } => pix.threshold(level, invert),
            GradientStep::CropBorder { thickness, white } => pix.crop_border(thickness, white),
            GradientStep::Blur { radius } => gaussian_blur(pix, radius)?,
        }
        Ok(())
    }
}

impl fmt::Display for GradientStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GradientStep::Grayscale => write!(f, "g"),
            GradientStep::FiniteDifference => write!(f, "f"),
            GradientStep::VectorSum { passes } => write!(f, "v{passes}"),
            GradientStep::GreyCollapse => write!(f, "c"),
            GradientStep::Threshold { level, invert } => {
                write!(f, "t{}{level}", if invert { "i" } else { "" })
            }
            GradientStep::CropBorder { thickness, white } => {
                write!(f, "b{}{thickness}", if white { "w" } else { "b" })
            }
            GradientStep::Blur { radius } => write!(f, "b{radius}"),
        }
    }
}

/// A parsed gradient pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientPipeline {
    steps: Vec<GradientStep>,
}

impl Default for GradientPipeline {
    fn default() -> Self {
        Self {
            steps: vec![
                GradientStep::Grayscale,
                GradientStep::FiniteDifference,
                GradientStep::VectorSum { passes: 15 },
                GradientStep::GreyCollapse,
                GradientStep::Threshold {
                    level: 10,
                    invert: false,
                },
                GradientStep::CropBorder {
                    thickness: 5,
                    white: false,
                },
            ],
        }
    }
}

impl GradientPipeline {
    /// Parse a sequence string.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidSequence`] for an empty string, an
    /// empty step, an unknown step name or a bad numeric argument.
    pub fn parse(sequence: &str) -> FilterResult<Self> {
        if sequence.trim().is_empty() {
            return Err(FilterError::InvalidSequence("empty sequence".to_string()));
        }

        let mut steps = Vec::new();
        for (i, part) in sequence.split('+').enumerate() {
            let step: String = part
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            if step.is_empty() {
                return Err(FilterError::InvalidSequence(format!(
                    "empty step at position {}",
                    i + 1
                )));
            }
            steps.push(Self::parse_step(&step)?);
        }
        Ok(Self { steps })
    }

    fn parse_step(step: &str) -> FilterResult<GradientStep> {
        match step {
            "g" => return Ok(GradientStep::Grayscale),
            "f" => return Ok(GradientStep::FiniteDifference),
            "c" => return Ok(GradientStep::GreyCollapse),
            _ => {}
        }

        if let Some(arg) = step.strip_prefix("ti") {
            let level = Self::parse_level(arg, step)?;
            Ok(GradientStep::Threshold {
                level,
                invert: true,
            })
        } else if let Some(arg) = step.strip_prefix('t') {
            let level = Self::parse_level(arg, step)?;
            Ok(GradientStep::Threshold {
                level,
                invert: false,
            })
        } else if let Some(arg) = step.strip_prefix("bw") {
            let thickness = Self::parse_number(arg, step)?;
            Ok(GradientStep::CropBorder {
                thickness,
                white: true,
            })
        } else if let Some(arg) = step.strip_prefix("bb") {
            let thickness = Self::parse_number(arg, step)?;
            Ok(GradientStep::CropBorder {
                thickness,
                white: false,
            })
        } else if let Some(arg) = step.strip_prefix('b') {
            let radius = Self::parse_positive(arg, step)?;
            if radius > MAX_BLUR_RADIUS {
                return Err(FilterError::InvalidSequence(format!(
                    "blur radius {radius} exceeds {MAX_BLUR_RADIUS} in '{step}'"
                )));
            }
            Ok(GradientStep::Blur { radius })
        } else if let Some(arg) = step.strip_prefix('v') {
            let passes = Self::parse_positive(arg, step)?;
            Ok(GradientStep::VectorSum { passes })
        } else {
            Err(FilterError::InvalidSequence(format!(
                "unknown step '{step}'"
            )))
        }
    }

    fn parse_number(arg: &str, step: &str) -> FilterResult<u32> {
        arg.parse().map_err(|_| {
            FilterError::InvalidSequence(format!("invalid number '{arg}' in '{step}'"))
        })
    }

    fn parse_positive(arg: &str, step: &str) -> FilterResult<u32> {
        let n = Self::parse_number(arg, step)?;
        if n == 0 {
            return Err(FilterError::InvalidSequence(format!(
                "argument must be > 0 in '{step}'"
            )));
        }
        Ok(n)
    }

    fn parse_level(arg: &str, step: &str) -> FilterResult<u8> {
        arg.parse().map_err(|_| {
            FilterError::InvalidSequence(format!(
                "threshold '{arg}' in '{step}' is not a level in 0..=255"
            ))
        })
    }

    /// The parsed steps, in order.
    pub fn steps(&self) -> &[GradientStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step on `pix` in order.
    pub fn apply(&self, pix: &mut PixMut) -> FilterResult<()> {
        for step in &self.steps {
            log::debug!("gradient pipeline step {step}");
            step.apply(pix)?;
        }
        Ok(())
    }
}

impl fmt::Display for GradientPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for GradientPipeline {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        Self::parse(s)
    }
}

/// Parse `sequence` and run it on `pix`.
pub fn run_sequence(pix: &mut PixMut, sequence: &str) -> FilterResult<()> {
    GradientPipeline::parse(sequence)?.apply(pix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobkit_core::{Color, Pix};

    #[test]
    fn test_nine_pass_variant() {
        let nine = GradientPipeline::parse("g + f + v9 + c + t10 + bb5").unwrap();
        let default = GradientPipeline::default();
        assert_eq!(nine.len(), default.len());
        assert_eq!(nine.steps()[2], GradientStep::VectorSum { passes: 9 });
        assert_eq!(default.steps()[2], GradientStep::VectorSum { passes: 15 });
        assert_eq!(nine.steps()[3..], default.steps()[3..]);
    }

    #[test]
    fn test_default_matches_string() {
        let parsed = GradientPipeline::parse(DEFAULT_SEQUENCE).unwrap();
        assert_eq!(parsed, GradientPipeline::default());
        assert_eq!(parsed.to_string(), DEFAULT_SEQUENCE);
    }

    #[test]
    fn test_parse_all_steps() {
        let p = GradientPipeline::parse("G+F+v2+C+t30+TI7+bw1+bb0+b4").unwrap();
        assert_eq!(
            p.steps(),
            &[
                GradientStep::Grayscale,
                GradientStep::FiniteDifference,
                GradientStep::VectorSum { passes: 2 },
                GradientStep::GreyCollapse,
                GradientStep::Threshold {
                    level: 30,
                    invert: false
                },
                GradientStep::Threshold {
                    level: 7,
                    invert: true
                },
                GradientStep::CropBorder {
                    thickness: 1,
                    white: true
                },
                GradientStep::CropBorder {
                    thickness: 0,
                    white: false
                },
                GradientStep::Blur { radius: 4 },
            ]
        );
    }

    #[test]
    fn test_parse_whitespace_handling() {
        let p = GradientPipeline::parse("  b b 3 +  v 1 ").unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.to_string(), "bb3 + v1");
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "g +", "x", "v", "v0", "b0", "t256", "ti-1", "bwx", "gg"] {
            assert!(
                matches!(
                    GradientPipeline::parse(bad),
                    Err(FilterError::InvalidSequence(_))
                ),
                "expected failure for {bad:?}"
            );
        }
    }

    #[test]
    fn test_from_str() {
        let p: GradientPipeline = "g + c".parse().unwrap();
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_run_threshold_and_border() {
        let mut pm = Pix::new_filled(6, 6, Color::gray(200)).unwrap().to_mut();
        run_sequence(&mut pm, "t100 + bb0").unwrap();
        // thickness 0 still paints the top row and left column
        assert_eq!(pm.get_rgb(0, 3), Some(Color::BLACK));
        assert_eq!(pm.get_rgb(3, 0), Some(Color::BLACK));
        assert_eq!(pm.get_rgb(5, 3), Some(Color::WHITE));
        assert_eq!(pm.get_rgb(3, 3), Some(Color::WHITE));
    }
}
