use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

use catalog_client::{CatalogFetcher, MAX_PAGE, SnapshotCatalog, TmdbClient, TmdbSettings};
use data_loader::{MovieRecord, Verdict, parser};
use engine::{
    AppConfig, CatalogSession, EngineConfig, RecommendationEngine, RefillStatus, SelectionPolicy,
    SlotOutcome,
};
use pipeline::RankList;

mod prompt;

use prompt::{HELP, SwipeInput, parse_input};

/// ReelSwipe - swipe through movies, get better suggestions
#[derive(Parser)]
#[command(name = "reel-swipe")]
#[command(
    about = "Like or dislike movies and get suggestions that learn from it",
    long_about = None
)]
struct Cli {
    /// Number of suggestions on screen
    #[arg(long)]
    capacity: Option<usize>,

    /// How replacements are chosen: ranked or avoid-disliked
    #[arg(long)]
    policy: Option<SelectionPolicy>,

    /// Catalog pages fetched per refill
    #[arg(long)]
    pages_per_batch: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive swipe session
    Swipe {
        /// Offline catalog snapshot; fetches from TMDB when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Fetch popular movies from TMDB and save them as a snapshot
    Export {
        /// Snapshot file to write
        #[arg(long)]
        out: PathBuf,

        /// Number of popular pages to fetch, at most 500
        #[arg(long, default_value = "5")]
        pages: u32,
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
    let config = AppConfig::from_env()?;

    let mut engine_config = config.engine();
    if let Some(capacity) = cli.capacity {
        engine_config.suggestion_capacity = capacity;
    }
    if let Some(policy) = cli.policy {
        engine_config.selection_policy = policy;
    }
    if let Some(pages) = cli.pages_per_batch {
        engine_config.pages_per_batch = pages;
    }
    let engine_config = engine_config.validate()?;

    match cli.command {
        Commands::Swipe { catalog: Some(path) } => {
            let catalog = SnapshotCatalog::from_file(&path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            if catalog.is_empty() {
                println!("{}", "The catalog is empty, nothing to suggest.".yellow());
                return Ok(());
            }
            println!(
                "{} Loaded {} movies from {}",
                "✓".green(),
                catalog.len(),
                path.display()
            );
            handle_swipe(engine_config, catalog).await?
        }
        Commands::Swipe { catalog: None } => {
            handle_swipe(engine_config, tmdb_client(&config)?).await?
        }
        Commands::Export { out, pages } => handle_export(&config, out, pages).await?,
    }

    Ok(())
}

fn tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_key = config
        .tmdb_api_key
        .clone()
        .context("TMDB_API_KEY is not set; pass --catalog <file> to swipe offline")?;
    let settings = TmdbSettings {
        api_key,
        api_url: config.tmdb_api_url.clone(),
        language: config.tmdb_language.clone(),
    };
    Ok(TmdbClient::new(settings)?)
}

/// Handle the 'swipe' command
async fn handle_swipe<F: CatalogFetcher>(engine_config: EngineConfig, fetcher: F) -> Result<()> {
    let source = fetcher.name().to_string();
    let mut session = CatalogSession::new(RecommendationEngine::new(&engine_config), fetcher);

    let start = Instant::now();
    session
        .start()
        .await
        .with_context(|| format!("Initial fetch from {} failed", source))?;
    tracing::info!("Initial catalog ready in {:?}", start.elapsed());

    if session.engine().suggested().is_empty() {
        println!("{}", "The catalog is empty, nothing to suggest.".yellow());
        return Ok(());
    }

    print_window(session.engine().suggested());
    println!("{}", HELP.dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                println!("{}", message.red());
                continue;
            }
        };

        match input {
            SwipeInput::Rate { slot, verdict } => {
                let Some(id) = slot_movie(session.engine().suggested(), slot).map(|m| m.id) else {
                    println!("{}", format!("No movie in slot {}", slot).red());
                    continue;
                };
                let mut refill_failed = false;
                match session.submit_feedback(id, verdict).await {
                    Ok(feedback) => {
                        print_outcome(session.engine(), verdict, feedback.report.slot);
                        if let RefillStatus::Failed { error, .. } = &feedback.refill {
                            let warning = format!("Couldn't fetch more movies: {}", error);
                            println!("{}", warning.yellow());
                        }
                        refill_failed = feedback.refill.is_failed();
                    }
                    Err(e) => println!("{}", e.to_string().red()),
                }
                // A refill that lands on an empty window refills it, so an
                // empty window here means nothing unrated is left
                if session.engine().suggested().is_empty() {
                    let message = if refill_failed {
                        "Out of movies, and fetching more failed. Try again later."
                    } else {
                        "You've rated every movie we have. Thanks!"
                    };
                    println!("{}", message.yellow());
                    break;
                }
                print_window(session.engine().suggested());
            }
            SwipeInput::Details(slot) => match slot_movie(session.engine().suggested(), slot) {
                Some(movie) => print_details(session.engine(), movie),
                None => println!("{}", format!("No movie in slot {}", slot).red()),
            },
            SwipeInput::Profile => print_profile(session.engine()),
            SwipeInput::Window => print_window(session.engine().suggested()),
            SwipeInput::Help => println!("{}", HELP),
            SwipeInput::Quit => break,
        }
    }

    let pools = session.engine().pools();
    println!(
        "{} liked, {} disliked, {} movies seen in the catalog",
        pools.liked().len().to_string().green(),
        pools.disliked().len().to_string().red(),
        pools.all().len()
    );
    Ok(())
}

/// Handle the 'export' command
async fn handle_export(config: &AppConfig, out: PathBuf, pages: u32) -> Result<()> {
    let client = tmdb_client(config)?;

    let start = Instant::now();
    let records = client
        .fetch_batch(1, pages.clamp(1, MAX_PAGE))
        .await
        .context("Failed to fetch popular movies from TMDB")?;
    parser::write_catalog(&out, &records)
        .with_context(|| format!("Failed to write snapshot {}", out.display()))?;

    println!(
        "{} Wrote {} movies to {} in {:?}",
        "✓".green(),
        records.len(),
        out.display(),
        start.elapsed()
    );
    Ok(())
}

fn slot_movie(suggested: &[MovieRecord], slot: usize) -> Option<&MovieRecord> {
    slot.checked_sub(1).and_then(|index| suggested.get(index))
}

fn print_window(suggested: &[MovieRecord]) {
    println!("{}", "Suggestions:".bold().blue());
    for (index, movie) in suggested.iter().enumerate() {
        let director = if movie.has_known_director() {
            movie.director.as_str()
        } else {
            "director unknown"
        };
        println!(
            "{:>3}. {} [{}] - {}",
            (index + 1).to_string().green(),
            movie.title.bold(),
            movie.genres.join(", "),
            director
        );
    }
}

fn print_outcome(engine: &RecommendationEngine, verdict: Verdict, slot: SlotOutcome) {
    let verdict = match verdict {
        Verdict::Liked => "Liked".green(),
        Verdict::Disliked => "Disliked".red(),
    };
    match slot {
        SlotOutcome::Replaced { next } => {
            let title = engine
                .pools()
                .get(next)
                .map(|m| m.title.as_str())
                .unwrap_or("?");
            println!("{}. Up next: {}", verdict, title.bold());
        }
        SlotOutcome::PoolExhausted => {
            println!("{}. {}", verdict, "No new movies to show in that slot.".yellow());
        }
        SlotOutcome::SlotNotFound => println!("{}.", verdict),
    }
}

fn print_details(engine: &RecommendationEngine, movie: &MovieRecord) {
    println!("{}", movie.title.bold().blue());
    if !movie.overview.is_empty() {
        println!("  {}", movie.overview);
    }
    println!("{}Genres: {}", "• ".green(), movie.genres.join(", "));
    if movie.has_known_director() {
        println!("{}Director: {}", "• ".green(), movie.director);
    }
    println!("{}Starring: {}", "• ".green(), movie.actors.join(", "));
    if let Some(poster) = &movie.poster_path {
        println!("{}Poster: {}", "• ".green(), poster);
    }
    if let Some(breakdown) = engine.explain(movie.id) {
        println!(
            "{}Score {} (genres {}, director {}, actors {})",
            "• ".cyan(),
            breakdown.total(),
            breakdown.genres,
            breakdown.director,
            breakdown.actors
        );
    }
}

fn print_profile(engine: &RecommendationEngine) {
    let profile = engine.profile();
    if profile.is_empty() {
        println!("{}", "No ratings yet.".dimmed());
        return;
    }

    let rows: [(&str, &RankList, &RankList); 3] = [
        ("Genres", &profile.liked_genres, &profile.disliked_genres),
        ("Directors", &profile.liked_directors, &profile.disliked_directors),
        ("Actors", &profile.liked_actors, &profile.disliked_actors),
    ];
    println!("{}", "Preference profile:".bold().blue());
    for (label, liked, disliked) in rows {
        println!("  {}", label.bold());
        println!("    {} {}", "+".green(), liked.top(5).join(", "));
        println!("    {} {}", "-".red(), disliked.top(5).join(", "));
    }
}
