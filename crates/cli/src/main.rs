use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use classifier::NearestCentroidClassifier;
use colored::Colorize;
use data_loader::{Interaction, TravelIndex, UserId};
use engine::{EngineConfig, RankedRecommendations, RecommendationEngine, StylePrediction, UserReport};
use sources::user_profile::build_user_profile;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// tour-recs - Travel Attraction Recommendation Engine
#[derive(Parser)]
#[command(name = "tour-recs")]
#[command(about = "Attraction recommendations from travel style prediction and collaborative filtering", long_about = None)]
struct Cli {
    /// Path to the interactions CSV file
    #[arg(short, long, default_value = "data/interactions.csv")]
    data_file: PathBuf,

    /// Path to the visit mode model (JSON)
    #[arg(short, long, default_value = "data/model.json")]
    model_file: PathBuf,

    /// Optional engine config (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict a user's travel style and recommend attractions
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return (overrides the config)
        #[arg(long)]
        limit: Option<usize>,

        /// Show features and a reason for each recommendation
        #[arg(long)]
        explain: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's visit history and stats
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// List user IDs that can be selected
    Users {
        /// Maximum number of IDs to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading travel dataset from {}...", cli.data_file.display());
    let start = Instant::now();
    let data_index = Arc::new(
        TravelIndex::load_from_file(&cli.data_file).context("Failed to load travel dataset")?,
    );
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            explain,
            json,
        } => {
            if let Some(limit) = limit {
                config.result_limit = limit;
            }
            let engine = build_engine(data_index, &cli.model_file, config)?;
            handle_recommend(&engine, user_id, explain, json)?
        }
        Commands::User { user_id } => handle_user(&data_index, user_id, config.history_limit)?,
        Commands::Users { limit } => handle_users(&data_index, limit),
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let engine = build_engine(data_index, &cli.model_file, config)?;
            handle_benchmark(Arc::new(engine), requests, concurrent).await?
        }
    }

    Ok(())
}

fn build_engine(
    data_index: Arc<TravelIndex>,
    model_file: &Path,
    config: EngineConfig,
) -> Result<RecommendationEngine> {
    let model = NearestCentroidClassifier::load(model_file)
        .with_context(|| format!("Failed to load model {}", model_file.display()))?;
    info!("Loaded model with classes {:?}", model.classes());
    RecommendationEngine::new(data_index, Arc::new(model), config).context("Failed to build engine")
}

/// Handle the 'recommend' command
fn handle_recommend(engine: &RecommendationEngine, user_id: UserId, explain: bool, json: bool) -> Result<()> {
    let report = engine.recommend_for_user(user_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report {
        UserReport::NoData { user_id } => {
            println!("{}", format!("No data available for user {}", user_id).yellow());
        }
        UserReport::Ready {
            user_id,
            prediction,
            recommendations,
            history,
        } => {
            print_prediction(user_id, &prediction, explain);
            print_history(&history);
            print_recommendations(&recommendations, explain);
        }
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(data_index: &TravelIndex, user_id: UserId, history_limit: usize) -> Result<()> {
    if !data_index.contains_user(user_id) {
        bail!("No data available for user {}", user_id);
    }
    let profile = build_user_profile(data_index, user_id);

    println!("{}", format!("User ID: {}", user_id).bold().blue());
    println!("{}Visits: {}", "• ".green(), profile.history.len());
    println!("{}Distinct attractions: {}", "• ".green(), profile.visited.len());
    if let Some(avg) = profile.avg_rating() {
        println!("{}Average rating: {:.2}", "• ".cyan(), avg);
    }

    print_history(profile.recent(history_limit));
    if profile.history.len() > history_limit {
        println!("  ... and {} more", profile.history.len() - history_limit);
    }
    Ok(())
}

/// Handle the 'users' command
fn handle_users(data_index: &TravelIndex, limit: usize) {
    let (users, attractions, rows) = data_index.counts();
    println!(
        "{}",
        format!("{} users, {} attractions, {} visits", users, attractions, rows)
            .bold()
            .blue()
    );

    let ids: Vec<String> = data_index
        .user_ids()
        .iter()
        .take(limit)
        .map(|id| id.to_string())
        .collect();
    println!("{}", ids.join(", "));
    if users > limit {
        println!("... and {} more", users - limit);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(engine: Arc<RecommendationEngine>, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let known_users = engine.data_index().user_ids();
    if known_users.is_empty() {
        bail!("Dataset has no users to benchmark");
    }

    let user_ids: Vec<UserId> = (0..requests)
        .map(|_| known_users[rand::random_range(0..known_users.len())])
        .collect();

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for user_id in user_ids {
        let engine = engine.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            tokio::task::spawn_blocking(move || engine.recommend_for_user(user_id)).await??;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let busy_time: Duration = timings.iter().sum();
    let avg_latency = busy_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_prediction(user_id: UserId, prediction: &StylePrediction, explain: bool) {
    println!(
        "{} {}",
        format!("Predicted travel style for user {}:", user_id).bold().blue(),
        prediction.label().green().bold()
    );
    if explain {
        println!("  Mean features:");
        for (name, value) in prediction.features.named() {
            println!("    {:<24} {:.3}", name, value);
        }
        println!("  Class code: {}", prediction.code());
    }
}

fn print_history(rows: &[Interaction]) {
    println!("{}", "Visit history:".bold().blue());
    for line in format_history(rows) {
        println!("{}", line);
    }
}

/// One line per visit: attraction id, category, rating and visit date
fn format_history(rows: &[Interaction]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["  (none)".to_string()];
    }
    let mut lines = vec![format!(
        "  {:>8}  {:<28} {:>6}  {:>7}",
        "ID", "Category", "Rating", "Visited"
    )];
    lines.extend(rows.iter().map(|row| {
        format!(
            "  {:>8}  {:<28} {:>6.1}  {:>4}-{:02}",
            row.attraction_id, row.category, row.rating, row.visit_year, row.visit_month
        )
    }));
    lines
}

fn print_recommendations(recommendations: &RankedRecommendations, explain: bool) {
    println!("{}", "Recommended attractions:".bold().blue());
    if recommendations.is_empty() {
        println!("  (none)");
        return;
    }

    for rec in &recommendations.items {
        let marker = if rec.boost == 1 { "★".yellow() } else { " ".normal() };
        println!(
            "{}. {} Attraction {} [{}] - Rating: {:.1}, Avg: {:.2}, Popularity: {:.0}",
            rec.rank.to_string().green(),
            marker,
            rec.attraction_id,
            rec.category,
            rec.rating,
            rec.avg_rating,
            rec.popularity
        );
        if explain {
            println!("   Explanation: {}", rec.explanation(recommendations.path));
        }
    }
    if explain {
        println!("Ranking path: {:?}", recommendations.path);
    }
}
