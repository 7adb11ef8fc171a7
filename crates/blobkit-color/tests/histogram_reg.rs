//! Color histogram regression test
//!
//! Run with:
//! ```
//! cargo test -p blobkit-color --test histogram_reg
//! ```

use blobkit_color::{
    BIN_COUNT, ColorBins, TileScanOptions, WindowSearchOptions, color_bins,
    color_bins_within_blob, distance, min_region_distance, sliding_window_search,
};
use blobkit_core::{Box, Color, Pix};
use blobkit_test::RegParams;
use blobkit_test::synth::{pix_from_rows, rects_on_white};

const RED: Color = Color::new(255, 0, 0);

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn red_template() -> ColorBins {
    let mut bins = [0.0; BIN_COUNT];
    bins[48] = 100.0;
    ColorBins::from_slice(&bins).unwrap()
}

fn invert(mask: &Pix) -> Pix {
    let mut pm = mask.to_mut();
    pm.threshold(128, true);
    pm.into()
}

#[test]
fn histogram_reg() {
    init_logger();
    let mut rp = RegParams::new("histogram");

    let palette = [
        ('r', RED),
        ('g', Color::new(0, 200, 0)),
        ('b', Color::new(10, 10, 140)),
        ('y', Color::new(230, 220, 20)),
    ];
    let scene = pix_from_rows(
        &[
            "rrgg..", //
            "rrggbb", //
            "yy#.bb", //
            "yy..rr", //
        ],
        &palette,
    )
    .unwrap();

    // -----------------------------------------------------------
    // Counts sum to the pixel count; percentages to about 100
    // -----------------------------------------------------------
    eprintln!("--- conservation ---");
    let counts = color_bins(&scene, false).unwrap();
    rp.compare_values(24.0, counts.total(), 0.0);
    rp.compare_values(6.0, counts[48], 0.0);
    let pct = color_bins(&scene, true).unwrap();
    rp.compare_values(100.0, pct.total(), 0.005 * BIN_COUNT as f64);

    // -----------------------------------------------------------
    // A mask and its inverse split the histogram exactly
    // -----------------------------------------------------------
    eprintln!("--- within blob ---");
    let mask = pix_from_rows(
        &[
            "##....", //
            "##..##", //
            "......", //
            "....##", //
        ],
        &[],
    )
    .unwrap();
    let inside = color_bins_within_blob(&scene, &mask, false).unwrap();
    let outside = color_bins_within_blob(&scene, &invert(&mask), false).unwrap();
    rp.compare_values(8.0, inside.total(), 0.0);
    rp.compare_values(6.0, inside[48], 0.0);
    for i in 0..BIN_COUNT {
        rp.compare_values(counts[i], inside[i] + outside[i], 0.0);
    }

    // -----------------------------------------------------------
    // Distance is symmetric and zero on identical histograms
    // -----------------------------------------------------------
    eprintln!("--- distance ---");
    let inside_pct = inside.normalized().unwrap();
    rp.compare_values(0.0, distance(&pct, &pct), 0.0);
    rp.compare_values(
        distance(&pct, &inside_pct),
        distance(&inside_pct, &pct),
        1e-12,
    );
    // pure red against three quarters red, one quarter blue
    rp.compare_values(
        625.0 / 175.0 + 25.0,
        distance(&red_template(), &inside_pct),
        1e-9,
    );

    assert!(rp.cleanup(), "histogram regression test failed");
}

#[test]
fn scan_reg() {
    init_logger();
    let mut rp = RegParams::new("scan");

    // -----------------------------------------------------------
    // Region scoring picks the purest candidate region
    // -----------------------------------------------------------
    eprintln!("--- region distance ---");
    let both = rects_on_white(
        40,
        24,
        &[
            (Box::new_unchecked(8, 8, 8, 8), RED),
            (Box::new_unchecked(24, 8, 8, 6), RED),
        ],
    )
    .unwrap();
    let opts = TileScanOptions::default();
    let d = min_region_distance(&both, &red_template(), &opts).unwrap();
    rp.compare_values(0.0, d, 0.0);

    let partial =
        rects_on_white(40, 24, &[(Box::new_unchecked(24, 8, 8, 6), RED)]).unwrap();
    let d = min_region_distance(&partial, &red_template(), &opts).unwrap();
    rp.compare_values(625.0 / 175.0 + 25.0, d, 1e-9);

    // -----------------------------------------------------------
    // Window search finds the red square, deterministically
    // -----------------------------------------------------------
    eprintln!("--- window search ---");
    let square = Box::new_unchecked(10, 10, 30, 30);
    let scene = rects_on_white(60, 60, &[(square, RED)]).unwrap();
    let wopts = WindowSearchOptions::default();
    let found = sliding_window_search(&scene, &red_template(), &wopts).unwrap();
    rp.compare_values(1.0, (!found.is_empty()) as u8 as f64, 0.0);
    for b in &found {
        rp.compare_values(1.0, b.significantly_intersects(&square) as u8 as f64, 0.0);
    }
    let again = sliding_window_search(&scene, &red_template(), &wopts).unwrap();
    rp.compare_values(1.0, (found == again) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "scan regression test failed");
}
