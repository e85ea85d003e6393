use anyhow::{Context, Result, anyhow};
use catalog::Asset;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use curation::{CurationConfig, CurationPipeline, CurationStats, SystemClock, default_filters};
use frame::{Slide, SlideLayout, SlideshowController, slide_at};
use rand::SeedableRng;
use rand::rngs::StdRng;
use seen_store::{JsonFileSeenStore, SeenTimeStore};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// FrameCurate - picture frame slideshow curation
#[derive(Parser)]
#[command(name = "frame-curate")]
#[command(about = "Curate a photo collection into a picture frame slideshow", long_about = None)]
struct Cli {
    /// Path to the seen-time store (JSON, created on first write)
    #[arg(short, long, default_value = "seen.json", global = true)]
    store: PathBuf,

    #[command(flatten)]
    tuning: TuningArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Pairing and ordering tunables
#[derive(Args)]
struct TuningArgs {
    /// Pair portraits taken at most this many seconds apart
    #[arg(long, default_value = "120", global = true)]
    pairing_window: u64,

    /// Do not pair portraits just because they share a calendar day
    #[arg(long, global = true)]
    no_same_day: bool,

    /// Score for the longer-unseen group in a comparison
    #[arg(long, default_value = "0.8", global = true)]
    recency_bias: f64,

    /// Score for photos taken this month in an earlier year
    #[arg(long, default_value = "0.5", global = true)]
    season_bias: f64,

    /// Seed the random source for a reproducible order
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the curated display sequence
    Curate {
        /// Asset manifest (JSON array of assets)
        #[arg(long)]
        manifest: PathBuf,

        /// Only use assets from this album
        #[arg(long)]
        album: Option<String>,

        /// Print the sequence as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the display loop for a number of slides, recording seen-times
    Play {
        /// Asset manifest (JSON array of assets)
        #[arg(long)]
        manifest: PathBuf,

        /// Only use assets from this album
        #[arg(long)]
        album: Option<String>,

        /// Number of slides to show
        #[arg(long, default_value = "10")]
        steps: usize,
    },

    /// Record assets as seen
    MarkSeen {
        /// Asset ids to mark
        #[arg(required = true)]
        ids: Vec<String>,

        /// When they were seen (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// List recorded seen-times, oldest first
    History {
        /// Show only the first N entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show asset counts after each pipeline stage
    Stats {
        /// Asset manifest (JSON array of assets)
        #[arg(long)]
        manifest: PathBuf,

        /// Only use assets from this album
        #[arg(long)]
        album: Option<String>,
    },
}

impl TuningArgs {
    fn config(&self) -> CurationConfig {
        CurationConfig::default()
            .with_pairing_window_secs(self.pairing_window)
            .with_pair_same_day(!self.no_same_day)
            .with_recency_bias(self.recency_bias)
            .with_season_bias(self.season_bias)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Curate {
            manifest,
            album,
            json,
        } => handle_curate(&cli, manifest, album.as_deref(), *json)?,
        Commands::Play {
            manifest,
            album,
            steps,
        } => handle_play(&cli, manifest, album.as_deref(), *steps)?,
        Commands::MarkSeen { ids, at } => handle_mark_seen(&cli.store, ids, at.as_deref())?,
        Commands::History { limit } => handle_history(&cli.store, *limit)?,
        Commands::Stats { manifest, album } => handle_stats(&cli, manifest, album.as_deref())?,
    }

    Ok(())
}

fn build_pipeline(tuning: &TuningArgs, album: Option<&str>) -> Result<CurationPipeline> {
    let pipeline = CurationPipeline::new(&tuning.config()).context("Invalid curation settings")?;
    Ok(pipeline.with_filters(default_filters(album)))
}

fn load_assets(manifest: &Path) -> Result<Vec<Asset>> {
    let assets = catalog::load_manifest(manifest)
        .with_context(|| format!("Failed to load manifest {}", manifest.display()))?;
    info!("Loaded {} assets from {}", assets.len(), manifest.display());
    Ok(assets)
}

fn open_store(path: &Path) -> Result<JsonFileSeenStore> {
    JsonFileSeenStore::open(path)
        .with_context(|| format!("Failed to open seen-time store {}", path.display()))
}

#[derive(Serialize)]
struct CurateOutput<'a> {
    stats: CurationStats,
    slides: Vec<Slide<'a>>,
}

/// Handle the 'curate' command
fn handle_curate(cli: &Cli, manifest: &Path, album: Option<&str>, json: bool) -> Result<()> {
    let pipeline = build_pipeline(&cli.tuning, album)?;
    let assets = load_assets(manifest)?;
    let store = open_store(&cli.store)?;
    let mut rng = cli.tuning.rng();

    let curation = pipeline.run(assets, &store, &SystemClock, &mut rng);
    let slides = collect_slides(&curation.sequence);

    if json {
        let output = CurateOutput {
            stats: curation.stats,
            slides,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Slideshow: {} assets in {} slides",
            curation.sequence.len(),
            slides.len()
        )
        .bold()
        .blue()
    );
    for (number, slide) in slides.iter().enumerate() {
        print_slide(number + 1, slide, &store)?;
    }
    Ok(())
}

/// Handle the 'play' command
fn handle_play(cli: &Cli, manifest: &Path, album: Option<&str>, steps: usize) -> Result<()> {
    let pipeline = build_pipeline(&cli.tuning, album)?;
    let assets = load_assets(manifest)?;
    let store = open_store(&cli.store)?;

    let mut slideshow =
        SlideshowController::new(pipeline, Box::new(store), Box::new(SystemClock), cli.tuning.rng());
    slideshow.refresh(assets);

    for number in 1..=steps {
        let Some(slide) = slideshow.show_next()? else {
            println!("{}", "Nothing to show".yellow());
            break;
        };
        let ids: Vec<&str> = slide.assets.iter().map(|a| a.id.as_str()).collect();
        println!(
            "{} {} {}",
            format!("{number:>3}.").green(),
            layout_label(slide.layout),
            ids.join(" | ")
        );
    }
    println!(
        "{} {} seen-times recorded",
        "✓".green(),
        slideshow.store().len()
    );
    Ok(())
}

/// Handle the 'mark-seen' command
fn handle_mark_seen(store_path: &Path, ids: &[String], at: Option<&str>) -> Result<()> {
    let seen_at = match at {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("Invalid timestamp '{}'", text))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut store = open_store(store_path)?;
    for id in ids {
        store.set(id, seen_at)?;
    }
    println!(
        "{} Marked {} assets as seen at {}",
        "✓".green(),
        ids.len(),
        seen_at.to_rfc3339()
    );
    Ok(())
}

/// Handle the 'history' command
fn handle_history(store_path: &Path, limit: Option<usize>) -> Result<()> {
    let store = open_store(store_path)?;
    if store.is_empty() {
        println!("{}", "No assets have been shown yet".yellow());
        return Ok(());
    }

    println!("{}", format!("Seen-times ({} assets):", store.len()).bold().blue());
    let entries = store.entries();
    for (id, seen_at) in entries.iter().take(limit.unwrap_or(entries.len())) {
        println!("  {} {}", seen_at.to_rfc3339().cyan(), id);
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(cli: &Cli, manifest: &Path, album: Option<&str>) -> Result<()> {
    let pipeline = build_pipeline(&cli.tuning, album)?;
    let assets = load_assets(manifest)?;
    let store = open_store(&cli.store)?;
    let mut rng = cli.tuning.rng();

    let stats = pipeline.run(assets, &store, &SystemClock, &mut rng).stats;

    println!("{}", "Pipeline stages:".bold().blue());
    println!("{}Input assets:      {}", "• ".green(), stats.input);
    println!("{}After filtering:   {}", "• ".green(), stats.filtered);
    println!("{}Landscape:         {}", "• ".cyan(), stats.landscape);
    println!("{}Portrait:          {}", "• ".cyan(), stats.portrait);
    println!("{}Portrait pairs:    {}", "• ".cyan(), stats.pairs);
    println!("{}Sequence length:   {}", "• ".green(), stats.sequence);
    let dropped = stats.portrait.saturating_sub(2 * stats.pairs);
    if dropped > 0 {
        println!("{}", format!("{} unpaired portrait left out", dropped).yellow());
    }
    Ok(())
}

/// Split a flat sequence into slides the way the display does
fn collect_slides(sequence: &[Asset]) -> Vec<Slide<'_>> {
    let mut slides = Vec::new();
    let mut index = 0;
    while let Some(slide) = slide_at(sequence, index) {
        index += slide.assets.len();
        slides.push(slide);
    }
    slides
}

fn layout_label(layout: SlideLayout) -> colored::ColoredString {
    match layout {
        SlideLayout::Single => "[single]".normal(),
        SlideLayout::Pair => "[pair]  ".magenta(),
    }
}

fn print_slide(number: usize, slide: &Slide<'_>, store: &dyn SeenTimeStore) -> Result<()> {
    let ids: Vec<&str> = slide.assets.iter().map(|a| a.id.as_str()).collect();
    let last_seen = match store.get(&slide.assets[0].id)? {
        Some(at) => format!("last seen {}", at.format("%Y-%m-%d %H:%M")),
        None => "new".to_string(),
    };
    println!(
        "{}. {} {} ({})",
        number.to_string().green(),
        layout_label(slide.layout),
        ids.join(" | "),
        last_seen.dimmed()
    );
    Ok(())
}
