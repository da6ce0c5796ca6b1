//! Example: Generate candidates for a user
//!
//! Run with: cargo run --package sources --example generate_candidates -- [user_id]
//!
//! This example shows how to:
//! 1. Load the interaction dataset
//! 2. Build a user profile
//! 3. Generate collaborative candidates
//! 4. Generate popularity (fallback) candidates
//! 5. Display the results

use data_loader::TravelIndex;
use sources::{user_profile::build_user_profile, CollaborativeSource, PopularitySource};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    println!("=== Candidate Generation Example ===\n");

    // Load dataset
    println!("Loading travel dataset...");
    let start = Instant::now();
    let data_index = Arc::new(TravelIndex::load_from_file(Path::new("data/interactions.csv"))?);
    println!("Loaded dataset in {:?}\n", start.elapsed());

    // Choose a test user: first argument, else the first user in the file
    let user_id = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => *data_index
            .user_ids()
            .first()
            .ok_or_else(|| anyhow::anyhow!("dataset has no users"))?,
    };
    println!("Target User: {}", user_id);

    // Build user profile
    let start = Instant::now();
    let profile = build_user_profile(&data_index, user_id);
    println!("Built profile in {:?}", start.elapsed());
    println!("  Visits: {}", profile.history.len());
    println!("  Distinct attractions: {}", profile.visited.len());
    if let Some(avg) = profile.avg_rating() {
        println!("  Avg rating: {:.2}", avg);
    }
    println!();

    // Generate collaborative candidates
    println!("Generating collaborative candidates...");
    let collaborative = CollaborativeSource::new(data_index.clone());
    let start = Instant::now();
    let collaborative_candidates = collaborative.get_candidates(&profile);
    let collaborative_time = start.elapsed();
    println!(
        "Generated {} collaborative candidate rows in {:?}",
        collaborative_candidates.len(),
        collaborative_time
    );

    println!("\nFirst 5 collaborative rows:");
    for (i, candidate) in collaborative_candidates.iter().take(5).enumerate() {
        println!(
            "  {}. Attraction {} [{}] avg {:.2}, popularity {:.0} (via user {})",
            i + 1,
            candidate.attraction_id,
            candidate.category,
            candidate.avg_rating,
            candidate.popularity,
            candidate.via_user
        );
    }

    // Generate popularity candidates over every category
    println!("\nGenerating popularity candidates...");
    let popularity = PopularitySource::new(data_index.clone());
    let start = Instant::now();
    let popularity_candidates = popularity.get_candidates(&profile, &[]);
    let popularity_time = start.elapsed();
    println!(
        "Generated {} popularity candidate rows in {:?}",
        popularity_candidates.len(),
        popularity_time
    );

    // Summary
    let collaborative_ids: HashSet<_> = collaborative_candidates
        .iter()
        .map(|c| c.attraction_id)
        .collect();
    let popularity_ids: HashSet<_> = popularity_candidates
        .iter()
        .map(|c| c.attraction_id)
        .collect();

    println!("\n=== Summary ===");
    println!("Distinct collaborative attractions: {}", collaborative_ids.len());
    println!("Distinct popularity attractions: {}", popularity_ids.len());
    println!(
        "Overlap between sources: {} attractions",
        collaborative_ids.intersection(&popularity_ids).count()
    );
    println!("Collaborative time: {:?}", collaborative_time);
    println!("Popularity time: {:?}", popularity_time);

    Ok(())
}
