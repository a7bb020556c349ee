//! CLI for building VP-tree indexes and running similarity queries

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vptree_search::{
    dataset, DistanceMetric, IndexConfig, PivotStrategy, Point, RandomFeatures, Vector,
};

#[derive(Parser)]
#[command(name = "vptree")]
#[command(about = "Vantage-point tree similarity search", long_about = None)]
struct Cli {
    /// JSON index config file. Flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for random pivot selection and demo features
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pivot selection strategy
    #[arg(long, value_enum, global = true)]
    pivot: Option<PivotArg>,

    /// Distance metric
    #[arg(long, value_enum, global = true)]
    metric: Option<MetricArg>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy)]
enum PivotArg {
    Random,
    First,
}

#[derive(ValueEnum, Clone, Copy)]
enum MetricArg {
    Euclidean,
    Manhattan,
}

#[derive(Subcommand)]
enum Commands {
    /// Index randomly-featured images and query with a random image
    Demo {
        /// Number of images to index
        #[arg(long, default_value = "10")]
        images: usize,
        /// Feature vector dimension
        #[arg(long, default_value = "128")]
        dim: usize,
        /// Number of results to return
        #[arg(short, long, default_value = "5")]
        k: usize,
    },
    /// Search a JSON dataset for the nearest points to a query
    Search {
        /// JSON file with an array of {"id": ..., "vector": [...]} objects
        #[arg(long)]
        points: PathBuf,
        /// Query vector as comma-separated values (e.g., "1.0,2.0,3.0")
        #[arg(short, long)]
        query: String,
        /// Number of results to return
        #[arg(short, long, default_value = "5")]
        k: usize,
    },
    /// Build an index over a JSON dataset and print its shape
    Stats {
        /// JSON file with an array of {"id": ..., "vector": [...]} objects
        #[arg(long)]
        points: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<IndexConfig> {
    let mut config = match &cli.config {
        Some(path) => IndexConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => IndexConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(pivot) = cli.pivot {
        config.pivot = match pivot {
            PivotArg::Random => PivotStrategy::Random,
            PivotArg::First => PivotStrategy::First,
        };
    }
    if let Some(metric) = cli.metric {
        config.metric = match metric {
            MetricArg::Euclidean => DistanceMetric::Euclidean,
            MetricArg::Manhattan => DistanceMetric::Manhattan,
        };
    }
    debug!(?config, "resolved index config");
    Ok(config)
}

fn load_dataset(path: &PathBuf) -> Result<Vec<Point<String>>> {
    let points = dataset::load_points(path)
        .with_context(|| format!("loading points from {}", path.display()))?;
    info!(count = points.len(), path = %path.display(), "loaded points");
    Ok(points)
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Demo { images, dim, k } => {
            let mut features = match config.seed {
                Some(seed) => RandomFeatures::seeded(dim, seed),
                None => RandomFeatures::new(dim),
            };
            let points: Vec<Point<String>> = (1..=images)
                .map(|i| Point::new(format!("images/image{}.jpg", i), features.sample()))
                .collect();
            let tree = config.build_tree(points)?;

            let query = features.sample();
            let results = tree.search_with_distances(&query, k)?;

            println!("Indexed {} images ({} dimensions)", tree.len(), dim);
            print_results(&results);
        }
        Commands::Search { points, query, k } => {
            let tree = config.build_tree(load_dataset(&points)?)?;
            let q: Vector = query.parse()?;
            let results = tree.search_with_distances(&q, k)?;
            print_results(&results);
        }
        Commands::Stats { points } => {
            let tree = config.build_tree(load_dataset(&points)?)?;
            println!("points:    {}", tree.len());
            match tree.dimension() {
                Some(d) => println!("dimension: {}", d),
                None => println!("dimension: -"),
            }
            println!("height:    {}", tree.height());
        }
    }
    Ok(())
}

fn print_results(results: &[vptree_search::Neighbor<String>]) {
    if results.is_empty() {
        println!("No results found (index is empty)");
        return;
    }
    println!("Top {} results:", results.len());
    for (i, result) in results.iter().enumerate() {
        println!("{}. {} (distance: {:.4})", i + 1, result.id, result.distance);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
