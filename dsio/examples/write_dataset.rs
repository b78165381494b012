//! Write the same dataset as a binary storage pair and as text

use dsio::{DynamicDataset, FileFormat, Matrix};
use std::time::Instant;

fn main() -> dsio::Result<()> {
    let rows = 10_000;
    let cols = 8;
    println!("Building {rows} x {cols} float64 dataset...");

    let data = (0..rows * cols)
        .map(|i| (i / cols) as f64 + (i % cols) as f64 * 0.125)
        .collect();
    let matrix = Matrix::from_vec(rows, cols, data)?;
    let dataset: DynamicDataset = matrix.into();

    let start = Instant::now();
    dsio::save(&dataset, "example_dataset.dat", FileFormat::Binary)?;
    println!("Binary pair written in {:?}", start.elapsed());

    let start = Instant::now();
    dsio::save(&dataset, "example_dataset.txt", FileFormat::Text)?;
    println!("Text written in {:?}", start.elapsed());

    println!("\nRun 'cargo run --example read_dataset' to read them back!");
    Ok(())
}
