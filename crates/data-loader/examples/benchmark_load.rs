use data_loader::TravelIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/interactions.csv");

    println!("Loading travel dataset...\n");

    let start = Instant::now();
    let index = TravelIndex::load_from_file(path)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (users, attractions, rows) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Attractions: {}", attractions);
    println!("Rows: {}", rows);
    println!("Categories: {}", index.categories().len());
    println!("\nPerformance: {:.0} rows/second",
             rows as f64 / elapsed.as_secs_f64());
}
