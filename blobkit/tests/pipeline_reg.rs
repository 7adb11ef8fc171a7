//! End-to-end analysis regression test
//!
//! Run with:
//! ```
//! cargo test -p blobkit --test pipeline_reg
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use blobkit::filter::GradientPipeline;
use blobkit::{
    AnalysisError, AnalyzerOptions, BlobAnalyzer, Box, Color, Error, ImageDecoder, ImageEncoder,
    Keypoint, KeypointDetector, KeypointMatcher, Pix, keypoint_match_count,
};
use blobkit_test::RegParams;
use blobkit_test::synth::{count_color, rects_on_white};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct MemoryDecoder(HashMap<PathBuf, Pix>);

impl ImageDecoder for MemoryDecoder {
    fn decode(&self, path: &Path) -> blobkit::Result<Pix> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| Error::DecodeError(format!("no image at {}", path.display())))
    }
}

#[derive(Default)]
struct RecordingEncoder(RefCell<Vec<(PathBuf, Pix)>>);

impl ImageEncoder for RecordingEncoder {
    fn encode(&self, pix: &Pix, path: &Path) -> blobkit::Result<()> {
        self.0.borrow_mut().push((path.to_path_buf(), pix.clone()));
        Ok(())
    }
}

/// One keypoint per dark pixel
struct DarkPixelDetector;

impl KeypointDetector for DarkPixelDetector {
    fn detect(&self, gray: &Pix) -> Vec<Keypoint> {
        let mut out = Vec::new();
        for y in 0..gray.height() {
            for x in 0..gray.width() {
                if let Some(c) = gray.get_rgb(x, y).filter(|c| c.b < 128) {
                    out.push(Keypoint::new(x as f32, y as f32, vec![c.b as f32]));
                }
            }
        }
        out
    }
}

/// Matches keypoints at the same position
struct SamePositionMatcher;

impl KeypointMatcher for SamePositionMatcher {
    fn match_count(&self, model: &[Keypoint], observed: &[Keypoint]) -> usize {
        observed
            .iter()
            .filter(|o| model.iter().any(|m| m.x == o.x && m.y == o.y))
            .count()
    }
}

fn square_at(x: i32, y: i32) -> Pix {
    rects_on_white(20, 20, &[(Box::new_unchecked(x, y, 3, 3), Color::BLACK)]).unwrap()
}

#[test]
fn pipeline_reg() {
    init_logger();
    let mut rp = RegParams::new("pipeline");

    // -----------------------------------------------------------
    // Decode and measure a 3x3 square
    // -----------------------------------------------------------
    eprintln!("--- analyze file ---");
    let path = PathBuf::from("square.png");
    let decoder = MemoryDecoder(HashMap::from([(path.clone(), square_at(4, 4))]));
    let analyzer = BlobAnalyzer::default();
    let results = analyzer.analyze_file(&decoder, &path).unwrap();
    rp.compare_values(1.0, results.len() as f64, 0.0);
    let metrics = results[0].1.as_ref().unwrap();
    rp.compare_values(9.0, metrics.area as f64, 0.0);
    rp.compare_values(5.0, metrics.centroid.0, 1e-12);
    rp.compare_values(5.0, metrics.centroid.1, 1e-12);
    rp.compare_values(8.0, metrics.perimeter, 1e-9);

    let missing = analyzer.analyze_file(&decoder, Path::new("nope.png"));
    rp.compare_values(
        1.0,
        matches!(missing, Err(AnalysisError::Core(Error::DecodeError(_)))) as u8 as f64,
        0.0,
    );

    // -----------------------------------------------------------
    // Gradient preprocessing keeps only the edge ring of a square
    // -----------------------------------------------------------
    eprintln!("--- gradient preprocess ---");
    let scene =
        rects_on_white(40, 40, &[(Box::new_unchecked(15, 15, 10, 10), Color::BLACK)]).unwrap();
    let edges = BlobAnalyzer::new(
        AnalyzerOptions::new()
            .with_preprocess(GradientPipeline::default())
            .with_invert(true),
    );
    let seg = edges.segment(&scene).unwrap();
    rp.compare_values(1.0, seg.colors.len() as f64, 0.0);
    let ring = seg.labeled.bounding_box_of_color(seg.colors[0]);
    rp.compare_values(
        1.0,
        (ring == Some(Box::new_unchecked(14, 14, 12, 12))) as u8 as f64,
        0.0,
    );

    // -----------------------------------------------------------
    // Outlines are drawn once per region and handed to the encoder
    // -----------------------------------------------------------
    eprintln!("--- export ---");
    let two = rects_on_white(
        20,
        12,
        &[
            (Box::new_unchecked(2, 2, 3, 3), Color::BLACK),
            (Box::new_unchecked(10, 6, 6, 4), Color::BLACK),
        ],
    )
    .unwrap();
    let encoder = RecordingEncoder::default();
    let drawn = analyzer
        .export_outlined(&encoder, &two, Path::new("out.png"))
        .unwrap();
    rp.compare_values(2.0, drawn as f64, 0.0);
    let written = encoder.0.borrow();
    rp.compare_values(1.0, written.len() as f64, 0.0);
    rp.compare_values(24.0, count_color(&written[0].1, Color::RED) as f64, 0.0);

    // -----------------------------------------------------------
    // Keypoint matching runs on a grayscale copy
    // -----------------------------------------------------------
    eprintln!("--- keypoints ---");
    let model = DarkPixelDetector.detect(&square_at(4, 4));
    rp.compare_values(9.0, model.len() as f64, 0.0);
    let same = keypoint_match_count(&DarkPixelDetector, &SamePositionMatcher, &model, &square_at(4, 4));
    rp.compare_values(9.0, same as f64, 0.0);
    let shifted =
        keypoint_match_count(&DarkPixelDetector, &SamePositionMatcher, &model, &square_at(5, 5));
    rp.compare_values(4.0, shifted as f64, 0.0);

    assert!(rp.cleanup(), "pipeline regression test failed");
}
