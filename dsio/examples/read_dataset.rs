//! Sniff and load the datasets written by `write_dataset`

use dsio::LoadOptions;
use std::path::Path;
use std::time::Instant;

fn main() -> dsio::Result<()> {
    for filename in ["example_dataset.dat", "example_dataset.txt"] {
        if !Path::new(filename).exists() {
            println!("File '{filename}' not found!");
            println!("   Run 'cargo run --example write_dataset' first");
            continue;
        }

        let format = dsio::sniff(filename)?;
        println!("\n'{filename}' sniffed as {format:?}");

        // Text has no element type on disk; ask for float64 to match
        let options = LoadOptions::new().with_data_type(dsio::DataType::F64);
        let start = Instant::now();
        let dataset = dsio::load(filename, &options)?;
        let load_time = start.elapsed();

        println!("   Dimensions: {} x {}", dataset.nrows(), dataset.ncols());
        println!("   Data type: {}", dataset.data_type());
        println!("   Loaded in {:.3}ms", load_time.as_secs_f64() * 1000.0);

        if let Some(matrix) = dataset.as_matrix::<f64>() {
            if let Some(row) = matrix.row(1) {
                println!("   Row 1: {row:?}");
            }
        }
    }
    Ok(())
}
