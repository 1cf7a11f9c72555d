use catalog::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading catalog from {}...\n", data_dir.display());

    let start = Instant::now();
    let catalog = Catalog::load_from_dir(data_dir)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Matrix cells: {}", catalog.similarity().dim().pow(2));
}
