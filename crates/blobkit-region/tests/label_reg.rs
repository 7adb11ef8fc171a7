//! Region labeling regression test
//!
//! Run with:
//! ```
//! cargo test -p blobkit-region --test label_reg
//! ```

use blobkit_core::{Box, Color, Pix};
use blobkit_region::{LabelOptions, count_regions, label_copy};
use blobkit_test::RegParams;
use blobkit_test::synth::{count_color, mask_from_rows, rects_on_white, with_padding};
use std::collections::HashMap;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// True if the two labelings put the same pixels together.
fn same_partition(a: &Pix, b: &Pix) -> bool {
    let mut forward: HashMap<Color, Color> = HashMap::new();
    let mut backward: HashMap<Color, Color> = HashMap::new();
    for y in 0..a.height() {
        for x in 0..a.width() {
            let (Some(ca), Some(cb)) = (a.get_rgb(x, y), b.get_rgb(x, y)) else {
                return false;
            };
            if *forward.entry(ca).or_insert(cb) != cb || *backward.entry(cb).or_insert(ca) != ca {
                return false;
            }
        }
    }
    true
}

#[test]
fn label_reg() {
    init_logger();
    let mut rp = RegParams::new("label");

    // -----------------------------------------------------------
    // Two disjoint squares: two regions, no merges
    // -----------------------------------------------------------
    eprintln!("--- two squares ---");
    let squares = rects_on_white(
        20,
        20,
        &[
            (Box::new_unchecked(2, 2, 2, 2), Color::BLACK),
            (Box::new_unchecked(14, 13, 2, 2), Color::BLACK),
        ],
    )
    .unwrap();
    let (labeled, colors) = label_copy(&squares, &LabelOptions::default()).unwrap();
    rp.compare_values(2.0, colors.len() as f64, 0.0);
    for &c in &colors {
        rp.compare_values(4.0, count_color(&labeled, c) as f64, 0.0);
    }
    rp.compare_values(0.0, count_color(&labeled, Color::BLACK) as f64, 0.0);
    // first square in raster order gets the first color
    rp.compare_values(
        1.0,
        (labeled.get_rgb(2, 2) == Some(colors[0])) as u8 as f64,
        0.0,
    );

    // -----------------------------------------------------------
    // A bar joining two columns forces a merge
    // -----------------------------------------------------------
    eprintln!("--- merge ---");
    let arms = [
        "..........", //
        ".#......#.", //
        ".#......#.", //
        ".#......#.", //
    ];
    let joined = [
        "..........", //
        ".#......#.", //
        ".#......#.", //
        ".#......#.", //
        ".########.", //
        "..........",
    ];
    let arms = mask_from_rows(&arms).unwrap();
    let joined = mask_from_rows(&joined).unwrap();
    rp.compare_values(2.0, count_regions(&arms).unwrap() as f64, 0.0);
    let (labeled, colors) = label_copy(&joined, &LabelOptions::default()).unwrap();
    rp.compare_values(1.0, colors.len() as f64, 0.0);
    rp.compare_values(14.0, count_color(&labeled, colors[0]) as f64, 0.0);

    // -----------------------------------------------------------
    // Labeling a labeled image changes nothing
    // -----------------------------------------------------------
    eprintln!("--- idempotence ---");
    let shapes = mask_from_rows(&[
        "...............", //
        ".##....#....#..", //
        ".##...###...#..", //
        "......#.#...#..", //
        "..#...........#", //
        ".###..####.....", //
        "..#.....##.....", //
        "...............",
    ])
    .unwrap();
    let (once, c1) = label_copy(&shapes, &LabelOptions::default()).unwrap();
    let (twice, c2) = label_copy(&once, &LabelOptions::default()).unwrap();
    eprintln!("regions: {}", c1.len());
    rp.compare_values(c1.len() as f64, c2.len() as f64, 0.0);
    rp.compare_pix(&once, &twice);

    let seeded = LabelOptions::new().with_seed(99);
    let (r1, _) = label_copy(&shapes, &seeded).unwrap();
    let (r2, _) = label_copy(&r1, &LabelOptions::new().with_seed(5)).unwrap();
    rp.compare_values(1.0, same_partition(&r1, &r2) as u8 as f64, 0.0);
    rp.compare_values(1.0, same_partition(&once, &r1) as u8 as f64, 0.0);

    // -----------------------------------------------------------
    // Row padding does not change the result
    // -----------------------------------------------------------
    eprintln!("--- padding ---");
    let padded = with_padding(&shapes, 3, 0).unwrap();
    let (labeled_padded, cp) = label_copy(&padded, &LabelOptions::default()).unwrap();
    rp.compare_values(c1.len() as f64, cp.len() as f64, 0.0);
    rp.compare_pix(&once, &labeled_padded);

    // -----------------------------------------------------------
    // Blobs on opposite edges of adjacent rows stay apart
    // -----------------------------------------------------------
    eprintln!("--- edges ---");
    let edges = mask_from_rows(&[
        "......", //
        ".....#", //
        "#.....", //
        "......",
    ])
    .unwrap();
    let tight = count_regions(&edges).unwrap();
    eprintln!("tight stride: {} regions", tight);
    rp.compare_values(2.0, tight as f64, 0.0);
    for extra in [1, 4] {
        let padded = with_padding(&edges, extra, 0).unwrap();
        let n = count_regions(&padded).unwrap();
        eprintln!("stride {}: {} regions", padded.stride(), n);
        rp.compare_values(2.0, n as f64, 0.0);
    }
    let (labeled, colors) = label_copy(&edges, &LabelOptions::default()).unwrap();
    rp.compare_values(1.0, count_color(&labeled, colors[0]) as f64, 0.0);
    rp.compare_values(1.0, count_color(&labeled, colors[1]) as f64, 0.0);
    rp.compare_values(
        1.0,
        (labeled.get_rgb(5, 1) == Some(colors[0])) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup());
}
