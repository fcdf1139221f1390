#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(warnings)]

//! Measures how evenly keys spread over a chained table's buckets under MAD
//! compression versus plain modulo compression, and plots the results.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use mad_containers::HashTableBase;
use plotters::prelude::*;
use rand::Rng;

const TABLE_SIZE: usize = 100_000;
// Keys share this stride, which also divides TABLE_SIZE.
const STRIDE: u64 = 1_000;
// Create load factors from 0.1 to 0.95 with 10 steps
const NUM_LOAD_FACTORS: usize = 10;

const METHODS: [&str; 3] = ["MAD Compression", "Hash Modulo", "Identity Modulo"];

const COLORS: [RGBColor; 3] = [
    RGBColor(220, 50, 50), // Bright red
    RGBColor(50, 90, 220), // Bright blue
    RGBColor(50, 180, 50), // Bright green
];

fn bucket_index(method: &str, table: &HashTableBase<()>, key: u64) -> usize {
    match method {
        "MAD Compression" => table.hash_index(&key),
        "Hash Modulo" => {
            let mut hasher = DefaultHasher::new();
            key.hash(&mut hasher);
            (hasher.finish() % TABLE_SIZE as u64) as usize
        }
        "Identity Modulo" => (key % TABLE_SIZE as u64) as usize,
        _ => panic!("Unknown method"),
    }
}

struct Occupancy {
    /// Mean chain position of a key, i.e. comparisons for a successful lookup
    average_probes: f64,
    longest_chain: usize,
}

fn measure(method: &str, table: &HashTableBase<()>, keys: &[u64]) -> Occupancy {
    let mut counts = vec![0_usize; TABLE_SIZE];
    for &key in keys {
        counts[bucket_index(method, table, key)] += 1;
    }

    let probes: usize = counts.iter().map(|&c| c * (c + 1) / 2).sum();
    Occupancy {
        average_probes: probes as f64 / keys.len().max(1) as f64,
        longest_chain: counts.iter().copied().max().unwrap_or(0),
    }
}

fn plot_metric(
    file_name: &str,
    caption: &str,
    y_desc: &str,
    num_keys: &[usize],
    series: &[Vec<f64>],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let root = BitMapBackend::new(file_name, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series.iter().flat_map(|v| v.iter()).fold(0.0_f64, |max, &x| max.max(x)) * 1.1; // Add 10% margin
    let max_y = if max_y > 0.0 { max_y } else { 1.0 };

    let x_labels: Vec<String> = num_keys.iter().map(|n| n.to_string()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_labels(num_keys.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &COLORS[method_idx % COLORS.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(series[method_idx].iter().copied().enumerate(), line_style))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            series[method_idx]
                .iter()
                .copied()
                .enumerate()
                .map(|(i, y)| Circle::new((i, y), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Strided keys collapse onto TABLE_SIZE / STRIDE buckets under identity modulo.
    let mut rng = rand::rng();
    let offset: u64 = rng.random_range(0..STRIDE);
    let max_keys_needed = num_keys.iter().copied().max().unwrap_or(0);
    let keys: Vec<u64> = (0..max_keys_needed as u64).map(|i| i * STRIDE + offset).collect();

    let table: HashTableBase<()> = HashTableBase::with_capacity(TABLE_SIZE);
    println!("MAD parameters: prime = {}, scale = {}, shift = {}", table.prime(), table.scale(), table.shift());

    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut longest_chain: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];

    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (method_idx, &method) in METHODS.iter().enumerate() {
            let occupancy = measure(method, &table, &keys[..n_keys]);
            average_probes[method_idx].push(occupancy.average_probes);
            longest_chain[method_idx].push(occupancy.longest_chain as f64);

            println!(
                "  {}: Avg probes = {:.2}, Longest chain = {}",
                method, occupancy.average_probes, occupancy.longest_chain
            );
        }
    }

    plot_metric(
        "average_probes.png",
        "Average Successful Lookup Cost by Compression",
        "Average Comparisons per Lookup",
        &num_keys,
        &average_probes,
    )?;
    plot_metric(
        "longest_chain.png",
        "Longest Bucket Chain by Compression",
        "Entries in Fullest Bucket",
        &num_keys,
        &longest_chain,
    )?;

    println!("Generated plot images: average_probes.png, longest_chain.png");

    Ok(())
}
