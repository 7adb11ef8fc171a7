//! Blob measurement and boundary tracing regression test
//!
//! Run with:
//! ```
//! cargo test -p blobkit-region --test measure_reg
//! ```

use blobkit_core::{Box, Color, Pix};
use blobkit_morph::extract_boundary;
use blobkit_region::{BlobMetrics, LabelOptions, label_copy, trace_boundary};
use blobkit_test::RegParams;
use blobkit_test::synth::{count_color, rects_on_white, replicate_2x2, white_image};
use std::collections::HashSet;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn disk(size: u32, cx: f64, cy: f64, r: f64) -> Pix {
    let mut pm = white_image(size, size).unwrap().to_mut();
    for y in 0..size {
        for x in 0..size {
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            if dx * dx + dy * dy <= r * r {
                pm.set_rgb(x, y, Color::BLACK).unwrap();
            }
        }
    }
    pm.into()
}

fn shapes() -> Vec<(&'static str, Pix)> {
    let black = |rects: &[(i32, i32, i32, i32)]| {
        let rects: Vec<_> = rects
            .iter()
            .map(|&(x, y, w, h)| (Box::new_unchecked(x, y, w, h), Color::BLACK))
            .collect();
        rects_on_white(20, 20, &rects).unwrap()
    };
    vec![
        ("square", black(&[(4, 4, 3, 3)])),
        ("bar", black(&[(2, 2, 8, 2)])),
        ("skewed", black(&[(2, 2, 4, 3), (4, 5, 4, 3)])),
        ("plus", black(&[(4, 2, 3, 9), (2, 4, 7, 3)])),
        ("ell", black(&[(2, 2, 3, 8), (2, 7, 8, 3)])),
        ("tee", black(&[(2, 2, 9, 3), (5, 5, 3, 6)])),
        ("disk", disk(20, 9.5, 9.5, 6.0)),
    ]
}

#[test]
fn measure_reg() {
    init_logger();
    let mut rp = RegParams::new("measure");

    // -----------------------------------------------------------
    // 3x3 square in a 10x10 image
    // -----------------------------------------------------------
    eprintln!("--- square ---");
    let pix = rects_on_white(10, 10, &[(Box::new_unchecked(4, 4, 3, 3), Color::BLACK)]).unwrap();
    let (labeled, colors) = label_copy(&pix, &LabelOptions::default()).unwrap();
    rp.compare_values(1.0, colors.len() as f64, 0.0);
    let m = BlobMetrics::compute(&labeled, colors[0]).unwrap();
    eprint!("{}", m);
    rp.compare_values(9.0, m.area as f64, 0.0);
    rp.compare_values(5.0, m.centroid.0, 1e-12);
    rp.compare_values(5.0, m.centroid.1, 1e-12);
    rp.compare_values(m.max_inertia, m.min_inertia, 1e-12);
    rp.compare_values(1.0, m.circularity.is_finite() as u8 as f64, 0.0);
    rp.compare_values(8.0, m.perimeter, 1e-12);

    // -----------------------------------------------------------
    // Moment scale law under 2x2 pixel replication
    // -----------------------------------------------------------
    eprintln!("--- scale law ---");
    for (name, pix) in shapes() {
        let small = BlobMetrics::compute(&pix, Color::BLACK).unwrap();
        let big = BlobMetrics::compute(&replicate_2x2(&pix).unwrap(), Color::BLACK).unwrap();
        eprintln!(
            "{}: area {} -> {}, perimeter {:.1} -> {:.1}",
            name, small.area, big.area, small.perimeter, big.perimeter
        );
        rp.compare_values(4.0 * small.area as f64, big.area as f64, 0.0);
        rp.compare_values(
            4.0 * small.second_row_moment + 0.25,
            big.second_row_moment,
            1e-9,
        );
        rp.compare_values(
            4.0 * small.second_column_moment + 0.25,
            big.second_column_moment,
            1e-9,
        );
        rp.compare_values(4.0 * small.second_mixed_moment, big.second_mixed_moment, 1e-9);
        rp.compare_values(4.0 * small.max_inertia + 0.25, big.max_inertia, 1e-9);
        rp.compare_values(4.0 * small.min_inertia + 0.25, big.min_inertia, 1e-9);
        rp.compare_values(2.0 * small.centroid.0 + 0.5, big.centroid.0, 1e-9);
    }

    // -----------------------------------------------------------
    // Boundary closure
    // -----------------------------------------------------------
    eprintln!("--- closure ---");
    for (name, pix) in shapes() {
        let area = count_color(&pix, Color::BLACK);
        let ring = extract_boundary(&pix).unwrap();
        let path = trace_boundary(&ring).unwrap();
        let points = path.points(ring.stride());
        let n = points.len();
        let closes = (0..n).all(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a != b && a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
        });
        eprintln!("{}: {} boundary steps for area {}", name, path.len(), area);
        rp.compare_values(1.0, closes as u8 as f64, 0.0);
        rp.compare_values(1.0, (path.len() <= area) as u8 as f64, 0.0);
        rp.compare_values(1.0, (path.length(ring.stride()) > 0.0) as u8 as f64, 0.0);
    }

    // -----------------------------------------------------------
    // Every disk traces and measures, whatever its radius and centre
    // -----------------------------------------------------------
    eprintln!("--- disk sweep ---");
    let mut traced = 0;
    for step in 4..=30 {
        let r = step as f64 * 0.5;
        for c in [20.0, 20.5] {
            let pix = disk(41, c, c, r);
            let ring = extract_boundary(&pix).unwrap();
            let path = match trace_boundary(&ring) {
                Ok(path) => path,
                Err(e) => {
                    eprintln!("r={} c={}: {}", r, c, e);
                    rp.compare_values(1.0, 0.0, 0.0);
                    continue;
                }
            };
            let points = path.points(ring.stride());
            let walks = points
                .windows(2)
                .all(|p| p[0] != p[1] && p[0].0.abs_diff(p[1].0) <= 1 && p[0].1.abs_diff(p[1].1) <= 1);
            let on_ring = path
                .addresses()
                .iter()
                .all(|&a| ring.pixel_at(a) == Some(Color::BLACK));
            let distinct: HashSet<_> = path.addresses().iter().collect();
            rp.compare_values(1.0, walks as u8 as f64, 0.0);
            rp.compare_values(1.0, on_ring as u8 as f64, 0.0);
            rp.compare_values(path.len() as f64, distinct.len() as f64, 0.0);
            rp.compare_values(1.0, (path.length(ring.stride()) > 0.0) as u8 as f64, 0.0);

            let m = BlobMetrics::compute(&pix, Color::BLACK);
            rp.compare_values(1.0, m.is_ok() as u8 as f64, 0.0);
            if let Ok(m) = m {
                rp.compare_values(c, m.centroid.0, 1e-9);
                rp.compare_values(c, m.centroid.1, 1e-9);
            }
            traced += 1;
        }
    }
    rp.compare_values(54.0, traced as f64, 0.0);

    // -----------------------------------------------------------
    // Rectangle with a one-pixel spur
    // -----------------------------------------------------------
    eprintln!("--- spur ---");
    let spur = rects_on_white(
        16,
        16,
        &[
            (Box::new_unchecked(4, 4, 6, 4), Color::BLACK),
            (Box::new_unchecked(9, 8, 1, 1), Color::BLACK),
        ],
    )
    .unwrap();
    let m = BlobMetrics::compute(&spur, Color::BLACK).unwrap();
    eprint!("{}", m);
    rp.compare_values(25.0, m.area as f64, 0.0);
    rp.compare_values(1.0, (m.perimeter > 0.0) as u8 as f64, 0.0);

    assert!(rp.cleanup());
}
