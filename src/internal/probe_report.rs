//! Measures probe sequence lengths of `HashTable` at increasing load factors
//! and plots them.

#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::indexing_slicing)]

use std::error::Error;

use log::info;
use plotters::prelude::*;
use primehash::{HashTable, TableConfig};
use rand::Rng;

// A prime base size, large enough for smooth averages
const BASE_SIZE: usize = 10_007;
// Load factors from 0.1 to 0.9
const NUM_LOAD_FACTORS: usize = 9;
const MISS_LOOKUPS: usize = 2_000;
const OUTPUT: &str = "probe_lengths.png";

/// Probe statistics for one load factor
#[derive(Debug, Clone, Copy)]
struct Sample {
    load: f64,
    avg_hit: f64,
    avg_miss: f64,
    worst_hit: usize,
    worst_miss: usize,
}

fn random_key(rng: &mut impl Rng, prefix: &str) -> String {
    format!("{prefix}{:016x}", rng.random::<u64>())
}

/// Fills a fixed-size table to `load` and probes it with present and absent keys
fn measure(load: f64, rng: &mut impl Rng) -> Result<Sample, Box<dyn Error>> {
    // Pin the size: minimum base size = base size and a grow threshold no load reaches
    let config = TableConfig::default().with_min_base_size(BASE_SIZE).with_thresholds(95, 1);
    let mut table = HashTable::with_config(BASE_SIZE, config)?;
    let n_keys = (table.capacity() as f64 * load) as usize;

    let keys: Vec<String> = (0..n_keys).map(|_| random_key(rng, "hit-")).collect();
    for key in &keys {
        table.insert(key.as_str(), "v")?;
    }

    let hits: Vec<usize> = keys.iter().map(|key| table.probe_len(key)).collect();
    let misses: Vec<usize> =
        (0..MISS_LOOKUPS).map(|_| table.probe_len(&random_key(rng, "miss-"))).collect();

    Ok(Sample {
        load: table.load_factor() as f64 / 100.0,
        avg_hit: average(&hits),
        avg_miss: average(&misses),
        worst_hit: hits.iter().copied().max().unwrap_or(0),
        worst_miss: misses.iter().copied().max().unwrap_or(0),
    })
}

fn average(probes: &[usize]) -> f64 {
    if probes.is_empty() {
        return 0.0;
    }
    probes.iter().sum::<usize>() as f64 / probes.len() as f64
}

fn draw(samples: &[Sample]) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let line_width = 2;
    let marker_size = 4;

    let root = BitMapBackend::new(OUTPUT, (1200, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));

    let hit_color = RGBColor(50, 90, 220); // Bright blue
    let miss_color = RGBColor(220, 50, 50); // Bright red

    let averages: [(&str, RGBColor, Vec<(f64, f64)>); 2] = [
        ("Successful lookup", hit_color, samples.iter().map(|s| (s.load, s.avg_hit)).collect()),
        ("Unsuccessful lookup", miss_color, samples.iter().map(|s| (s.load, s.avg_miss)).collect()),
    ];
    let worst: [(&str, RGBColor, Vec<(f64, f64)>); 2] = [
        (
            "Successful lookup",
            hit_color,
            samples.iter().map(|s| (s.load, s.worst_hit as f64)).collect(),
        ),
        (
            "Unsuccessful lookup",
            miss_color,
            samples.iter().map(|s| (s.load, s.worst_miss as f64)).collect(),
        ),
    ];

    for (area, caption, y_desc, series) in [
        (&areas[0], "Average Probe Length", "Average probes", &averages),
        (&areas[1], "Worst-Case Probe Length", "Worst-case probes", &worst),
    ] {
        let max_y = series
            .iter()
            .flat_map(|(_, _, points)| points.iter().map(|&(_, y)| y))
            .fold(1.0, f64::max) *
            1.1; // Add 10% margin

        let mut chart = ChartBuilder::on(area)
            .caption(caption, (font_family, 30))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..1.0, 0.0..max_y)?;

        chart
            .configure_mesh()
            .x_desc("Load factor")
            .y_desc(y_desc)
            .axis_desc_style((font_family, 16))
            .draw()?;

        for (label, color, points) in series {
            let line_style = ShapeStyle::from(color).stroke_width(line_width);
            chart
                .draw_series(LineSeries::new(points.iter().copied(), line_style))?
                .label(*label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
            chart.draw_series(
                points.iter().map(|&point| Circle::new(point, marker_size, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.9 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    let mut rng = rand::rng();
    let mut samples = Vec::with_capacity(load_factors.len());
    for &load in &load_factors {
        let sample = measure(load, &mut rng)?;
        info!(
            "load {:.2}: avg hit {:.2}, avg miss {:.2}, worst hit {}, worst miss {}",
            sample.load, sample.avg_hit, sample.avg_miss, sample.worst_hit, sample.worst_miss
        );
        samples.push(sample);
    }

    draw(&samples)?;
    info!("wrote {OUTPUT}");
    Ok(())
}
