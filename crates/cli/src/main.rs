use anyhow::{Context, Result, anyhow, bail};
use catalog::{Availability, Catalog, Product, ProductId, synthetic};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use facets::{FacetEngine, FacetGroup, FacetSet, FilterState, SortDirection, SortKey, SortSpec};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Storefront Filter - faceted product filtering
#[derive(Parser)]
#[command(name = "storefront-filter")]
#[command(about = "Faceted filtering and sorting over a product catalog", long_about = None)]
struct Cli {
    /// Catalog JSON file, or a directory of them
    #[arg(short, long, default_value = "data/catalog.json", global = true)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Constraints shared by every listing command
#[derive(Args)]
struct FilterArgs {
    /// Start from a saved FilterState JSON file
    #[arg(long)]
    state: Option<PathBuf>,

    /// Category to include (repeatable)
    #[arg(long)]
    category: Vec<String>,

    /// Brand to include (repeatable)
    #[arg(long)]
    brand: Vec<String>,

    /// Color to include (repeatable)
    #[arg(long)]
    color: Vec<String>,

    /// Feature to include (repeatable)
    #[arg(long)]
    feature: Vec<String>,

    /// Availability status: in_stock, low_stock or pre_order (repeatable)
    #[arg(long)]
    availability: Vec<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    /// Only products rated at least this many stars
    #[arg(long)]
    min_rating: Option<f64>,

    /// Free-text search over name, brand, category and features
    #[arg(long)]
    query: Option<String>,

    /// Sort key: name, price, category or rating
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the products matching the filters
    Filter {
        #[command(flatten)]
        filters: FilterArgs,

        /// Number of products to print
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Also print facet options with counts
        #[arg(long)]
        facets: bool,

        /// Print the full view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show facet options with counts under the filters
    Facets {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show one product
    Product {
        /// Product ID to display
        #[arg(long)]
        id: ProductId,
    },

    /// Time listing refreshes on a synthetic catalog
    Benchmark {
        /// Synthetic catalog size
        #[arg(long, default_value = "10000")]
        products: usize,

        /// Number of refreshes to time
        #[arg(long, default_value = "100")]
        iterations: usize,

        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            filters,
            limit,
            facets,
            json,
        } => handle_filter(&load_engine(&cli.catalog)?, &filters, limit, facets, json)?,
        Commands::Facets { filters } => handle_facets(&load_engine(&cli.catalog)?, &filters)?,
        Commands::Product { id } => handle_product(&load_engine(&cli.catalog)?, id)?,
        Commands::Benchmark {
            products,
            iterations,
            seed,
        } => handle_benchmark(products, iterations, seed)?,
    }

    Ok(())
}

fn load_engine(path: &Path) -> Result<FacetEngine> {
    println!("Loading catalog from {}...", path.display());
    let start = Instant::now();
    let catalog = Catalog::load(path).context("Failed to load product catalog")?;
    println!(
        "{} Loaded {} products in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(FacetEngine::new(Arc::new(catalog)))
}

/// Turn the command line into a FilterState over the engine's catalog
fn build_state(engine: &FacetEngine, args: &FilterArgs) -> Result<FilterState> {
    let mut state = match &args.state {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read state file {}", path.display()))?;
            let saved: FilterState = serde_json::from_str(&text)
                .with_context(|| format!("Invalid state file {}", path.display()))?;
            engine.restore_state(saved)
        }
        None => engine.initial_state(),
    };

    let selections = [
        (FacetGroup::Category, &args.category),
        (FacetGroup::Brand, &args.brand),
        (FacetGroup::Color, &args.color),
        (FacetGroup::Feature, &args.feature),
    ];
    for (group, ids) in selections {
        for id in ids {
            state.select(group, id);
        }
    }
    for status in &args.availability {
        if status.parse::<Availability>().is_err() {
            bail!("Unknown availability status '{}'", status);
        }
        state.select(FacetGroup::Availability, status);
    }

    if args.min_price.is_some() || args.max_price.is_some() {
        let min = args.min_price.unwrap_or(state.price_range.min);
        let max = args.max_price.unwrap_or(state.price_range.max);
        state.set_price_range(min, max);
    }
    if let Some(rating) = args.min_rating {
        state.set_min_rating(rating);
    }
    if let Some(query) = &args.query {
        state.set_query(query.as_str());
    }

    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    match &args.sort {
        Some(key) => state.set_sort(SortSpec::parse(key, Some(direction.as_str()))),
        None if args.desc => state.set_sort(SortSpec::new(state.sort.key, direction)),
        None => {}
    }

    Ok(state)
}

/// Handle the 'filter' command
fn handle_filter(
    engine: &FacetEngine,
    args: &FilterArgs,
    limit: usize,
    show_facets: bool,
    json: bool,
) -> Result<()> {
    let state = build_state(engine, args)?;
    let view = engine.refresh(&state);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Showing {} of {} products (sorted by {} {})",
            view.products.len().min(limit),
            view.products.len(),
            state.sort.key.as_str(),
            state.sort.direction.as_str()
        )
        .bold()
        .blue()
    );
    for (rank, product) in view.products.iter().take(limit).enumerate() {
        print_product_line(rank + 1, product);
    }
    if view.products.is_empty() {
        println!("  {}", "No products match these filters".yellow());
    }

    if show_facets {
        println!();
        print_facets(&view.facets);
    }
    Ok(())
}

/// Handle the 'facets' command
fn handle_facets(engine: &FacetEngine, args: &FilterArgs) -> Result<()> {
    let state = build_state(engine, args)?;
    let facets = engine.recompute_counts(&state);
    print_facets(&facets);
    Ok(())
}

/// Handle the 'product' command
fn handle_product(engine: &FacetEngine, id: ProductId) -> Result<()> {
    let product = engine
        .catalog()
        .get_product(id)
        .ok_or_else(|| anyhow!("Product {} not found", id))?;

    println!("{}", format!("Product ID: {}", product.id).bold().blue());
    println!("{}Name: {}", "• ".green(), product.name);
    println!("{}Category: {}", "• ".green(), product.category);
    println!("{}Brand: {}", "• ".green(), or_dash(&product.brand));
    println!("{}Color: {}", "• ".green(), or_dash(&product.color));
    println!("{}Price: {}", "• ".cyan(), format_price(product.price));
    println!("{}Rating: {}", "• ".cyan(), format_rating(product.rating));
    println!(
        "{}Availability: {}",
        "• ".cyan(),
        product.availability.map(|a| a.label()).unwrap_or("-")
    );
    println!("Features:");
    for feature in product.distinct_features() {
        println!("  - {}", feature);
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(products: usize, iterations: usize, seed: u64) -> Result<()> {
    if iterations == 0 {
        bail!("--iterations must be at least 1");
    }

    let catalog = synthetic::generate(products, seed).context("Failed to generate synthetic catalog")?;
    let engine = FacetEngine::new(Arc::new(catalog));
    info!("Generated synthetic catalog of {} products", engine.catalog().len());

    // A handful of states a shopper would plausibly click through
    let mut states = vec![engine.initial_state()];
    let mut state = engine.initial_state();
    state.select(FacetGroup::Category, "Phones");
    states.push(state.clone());
    state.select(FacetGroup::Feature, "5G");
    state.set_min_rating(4.0);
    states.push(state.clone());
    state.set_sort(SortSpec::new(SortKey::Price, SortDirection::Descending));
    state.set_query("pro");
    states.push(state);

    let mut timings: Vec<Duration> = Vec::with_capacity(iterations);
    for i in 0..iterations {
        let state = &states[i % states.len()];
        let start = Instant::now();
        let view = engine.refresh(state);
        timings.push(start.elapsed());
        std::hint::black_box(view.products.len());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = iterations as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Catalog size: {}", engine.catalog().len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} refreshes/second", throughput);

    Ok(())
}

fn print_product_line(rank: usize, product: &Product) {
    println!(
        "{}. {} [{}] {} - {} - {}",
        rank.to_string().green(),
        product.name,
        product.category,
        or_dash(&product.brand),
        format_price(product.price),
        format_rating(product.rating)
    );
}

fn print_facets(facets: &FacetSet) {
    for group in FacetGroup::OPTION_GROUPS {
        let options = facets.options(group);
        if options.is_empty() {
            continue;
        }
        println!("{}", group.to_string().bold().blue());
        for option in options {
            let mark = if option.selected { "[x]" } else { "[ ]" };
            let line = format!("  {} {} ({})", mark, option.label, option.count);
            if option.count == 0 {
                println!("{}", line.dimmed());
            } else {
                println!("{}", line);
            }
        }
    }

    if !facets.ratings.is_empty() {
        println!("{}", FacetGroup::Rating.to_string().bold().blue());
        for option in &facets.ratings {
            let mark = if option.selected { "(o)" } else { "( )" };
            println!("  {} {} ({})", mark, option.label, option.count);
        }
    }

    println!(
        "{} {:.2} - {:.2}",
        FacetGroup::Price.to_string().bold().blue(),
        facets.price_bounds.min,
        facets.price_bounds.max
    );
}

fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("${:.2}", p))
}

fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "unrated".to_string(), |r| format!("{:.1}★", r))
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
