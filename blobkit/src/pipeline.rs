//! End-to-end blob analysis
//!
//! [`BlobAnalyzer`] turns a color picture into labeled regions and measures
//! each one:
//!
//! 1. optional preprocessing with a [`GradientPipeline`]
//! 2. grayscale and threshold into a black-on-white mask
//! 3. region labeling, dropping regions below `min_area`
//! 4. [`BlobMetrics`] per region color
//!
//! A failed measurement affects only its own region.

use std::path::Path;

use crate::io::{ImageDecoder, ImageEncoder, Keypoint, KeypointDetector, KeypointMatcher};
use crate::{AnalysisError, AnalysisResult};
use blobkit_core::{Color, Pix};
use blobkit_filter::GradientPipeline;
use blobkit_region::{
    BlobMetrics, LabelOptions, RegionResult, dominant_center_row_color, label_regions,
    largest_region, orient_by_mass, select_by_min_area,
};

/// Options for [`BlobAnalyzer`]
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Steps run before thresholding (default none)
    pub preprocess: Option<GradientPipeline>,
    /// Average the channels before thresholding (default true)
    pub grayscale: bool,
    /// Blue level at or above which a pixel is background (default 10)
    pub threshold: u8,
    /// Treat bright pixels as objects instead (default false)
    pub invert: bool,
    /// Regions with fewer pixels are ignored (default 1)
    pub min_area: usize,
    /// Region coloring
    pub labeling: LabelOptions,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            preprocess: None,
            grayscale: true,
            threshold: 10,
            invert: false,
            min_area: 1,
            labeling: LabelOptions::default(),
        }
    }
}

impl AnalyzerOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `pipeline` before thresholding
    pub fn with_preprocess(mut self, pipeline: GradientPipeline) -> Self {
        self.preprocess = Some(pipeline);
        self
    }

    /// Enable or disable the grayscale step
    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    /// Set the threshold level
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Swap object and background
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the minimum region area
    pub fn with_min_area(mut self, min_area: usize) -> Self {
        self.min_area = min_area;
        self
    }

    /// Set the labeling options
    pub fn with_labeling(mut self, labeling: LabelOptions) -> Self {
        self.labeling = labeling;
        self
    }
}

/// A segmented image: the labeled buffer and the colors of kept regions.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Labeled image; background is white
    pub labeled: Pix,
    /// Region colors in discovery order
    pub colors: Vec<Color>,
}

/// The blob crossing the middle row, isolated and oriented.
#[derive(Debug, Clone)]
pub struct CentralBlob {
    /// Region color of the blob
    pub color: Color,
    /// Labeled image with every other region blackened
    pub pix: Pix,
    /// True if the image was turned 180 degrees
    pub rotated: bool,
}

/// Per-image blob analysis driven by [`AnalyzerOptions`]
#[derive(Debug, Clone, Default)]
pub struct BlobAnalyzer {
    options: AnalyzerOptions,
}

impl BlobAnalyzer {
    /// Create an analyzer.
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    /// The analyzer's options.
    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Threshold and label `pix`.
    ///
    /// # Errors
    ///
    /// Fails if preprocessing or labeling fails.
    pub fn segment(&self, pix: &Pix) -> AnalysisResult<Segmentation> {
        let opts = &self.options;
        let mut pm = pix.to_mut();
        if let Some(pipeline) = &opts.preprocess {
            pipeline.apply(&mut pm)?;
        }
        if opts.grayscale {
            pm.grayscale();
        }
        pm.threshold(opts.threshold, opts.invert);
        let all = label_regions(&mut pm, &opts.labeling)?;
        let labeled: Pix = pm.into();
        let colors = select_by_min_area(&labeled, &all, opts.min_area);
        log::debug!(
            "segmented {}x{}: {} regions, {} kept",
            pix.width(),
            pix.height(),
            all.len(),
            colors.len()
        );
        Ok(Segmentation { labeled, colors })
    }

    /// Segment `pix` and measure every kept region.
    ///
    /// Each entry pairs a region color with its metrics or the reason they
    /// could not be computed.
    pub fn analyze(&self, pix: &Pix) -> AnalysisResult<Vec<(Color, RegionResult<BlobMetrics>)>> {
        let seg = self.segment(pix)?;
        Ok(seg
            .colors
            .iter()
            .map(|&c| (c, BlobMetrics::compute(&seg.labeled, c)))
            .collect())
    }

    /// Decode `path` with `decoder` and [`analyze`](Self::analyze) it.
    pub fn analyze_file<D: ImageDecoder + ?Sized>(
        &self,
        decoder: &D,
        path: &Path,
    ) -> AnalysisResult<Vec<(Color, RegionResult<BlobMetrics>)>> {
        let pix = decoder.decode(path)?;
        self.analyze(&pix)
    }

    /// Measure the region with the most pixels, if any.
    pub fn largest_blob(&self, pix: &Pix) -> AnalysisResult<Option<BlobMetrics>> {
        let seg = self.segment(pix)?;
        let Some(color) = largest_region(&seg.labeled, &seg.colors) else {
            return Ok(None);
        };
        Ok(Some(BlobMetrics::compute(&seg.labeled, color)?))
    }

    /// Isolate the most common region on the middle row.
    ///
    /// Other regions are blackened, and the image is turned 180 degrees if
    /// the blob has more pixels in the upper half. Returns `None` if no
    /// region crosses the middle row.
    pub fn central_blob(&self, pix: &Pix) -> AnalysisResult<Option<CentralBlob>> {
        let seg = self.segment(pix)?;
        let Some(color) = dominant_center_row_color(&seg.labeled) else {
            return Ok(None);
        };
        let mut pm = seg.labeled.to_mut();
        pm.isolate_color_keep_white(color);
        let (oriented, rotated) = orient_by_mass(&pm.into(), color);
        Ok(Some(CentralBlob {
            color,
            pix: oriented,
            rotated,
        }))
    }

    /// Outline every kept region's bounding box in red on a copy of `pix`
    /// and write it with `encoder`.
    ///
    /// Returns the number of outlined regions.
    pub fn export_outlined<E: ImageEncoder + ?Sized>(
        &self,
        encoder: &E,
        pix: &Pix,
        path: &Path,
    ) -> AnalysisResult<usize> {
        let seg = self.segment(pix)?;
        let mut canvas = pix.to_mut();
        let mut drawn = 0;
        for &c in &seg.colors {
            if let Some(rect) = seg.labeled.bounding_box_of_color(c) {
                canvas.draw_rectangle(&rect);
                drawn += 1;
            }
        }
        encoder
            .encode(&canvas.into(), path)
            .map_err(AnalysisError::from)?;
        log::debug!("outlined {drawn} regions into {}", path.display());
        Ok(drawn)
    }
}

/// Count keypoint matches between `model` and a grayscale copy of `pix`.
pub fn keypoint_match_count<D, M>(detector: &D, matcher: &M, model: &[Keypoint], pix: &Pix) -> usize
where
    D: KeypointDetector + ?Sized,
    M: KeypointMatcher + ?Sized,
{
    let mut gray = pix.to_mut();
    gray.grayscale();
    let observed = detector.detect(&gray.into());
    matcher.match_count(model, &observed)
}
