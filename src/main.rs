use clap::{Parser, Subcommand};
use serde::Serialize;
use smartcompare::{
    CatalogSnapshot, ComparisonEngine, EquivalenceEngine, Preferences, RecommendationEngine,
    ScoringConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Compare products, find equivalents and rank recommendations
#[derive(Parser, Debug)]
#[command(name = "smartcompare")]
#[command(about = "Multi-criteria product comparison and matching", long_about = None)]
struct Args {
    /// Catalog snapshot (entities, facts and symmetric relations) as JSON
    #[arg(short, long)]
    catalog: PathBuf,

    /// Factor weight overrides as a JSON object
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare 2-5 entities and pick a winner
    Compare {
        #[arg(required = true, num_args = 2..=5)]
        ids: Vec<String>,
    },
    /// List every equivalent of an entity
    Equivalents { id: String },
    /// Check whether two entities are equivalent
    Equivalence { first: String, second: String },
    /// Rank the catalog against a preference profile
    Recommend {
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        min_budget: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_ram: Option<f64>,
        #[arg(long)]
        min_storage: Option<f64>,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(short, long, default_value_t = smartcompare::DEFAULT_LIMIT)]
        limit: usize,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting SmartCompare v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog snapshot: {:?}", args.catalog);

    let snapshot = CatalogSnapshot::from_path(&args.catalog)?;
    let (catalog, facts) = snapshot.into_collaborators();
    info!("Loaded {} entities and {} facts", catalog.len(), facts.len());

    let catalog: Arc<dyn smartcompare::Catalog> = Arc::new(catalog);
    let reasoner: Arc<dyn smartcompare::Reasoner> = Arc::new(facts);

    match args.command {
        Command::Compare { ids } => {
            let scoring = ScoringConfig::from_weights_file(args.weights.as_deref());
            let engine = ComparisonEngine::new(catalog, reasoner, Some(scoring));
            print_json(&engine.compare(ids.as_slice())?)
        }
        Command::Equivalents { id } => {
            let engine = EquivalenceEngine::new(catalog, reasoner);
            print_json(&engine.find_equivalents(&id)?)
        }
        Command::Equivalence { first, second } => {
            let engine = EquivalenceEngine::new(catalog, reasoner);
            print_json(&engine.compare_pair(&first, &second)?)
        }
        Command::Recommend {
            budget,
            min_budget,
            category,
            min_ram,
            min_storage,
            min_rating,
            limit,
        } => {
            let preferences = Preferences {
                budget,
                min_budget,
                preferred_category: category,
                min_ram,
                min_storage,
                min_rating,
            };
            let engine = RecommendationEngine::new(catalog, reasoner);
            print_json(&engine.recommend(&preferences, limit))
        }
    }
}
