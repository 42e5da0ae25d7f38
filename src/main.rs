use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playlist_tracker::fetch::YouTubeSource;
use playlist_tracker::store::SnapshotStore;
use playlist_tracker::{view, SyncPipeline, TrackerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "playlist-tracker")]
#[command(about = "Track remote playlist membership against local snapshots", long_about = None)]
struct Args {
    /// Path to the config file (defaults to the user config directory)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check configured playlists against their snapshots (default)
    Check {
        /// Check only specific playlists (can be specified multiple times)
        #[arg(long = "playlist")]
        playlists_filter: Vec<String>,
    },

    /// List playlists with a stored snapshot
    List,

    /// Print the items of stored snapshots
    Show {
        /// Playlist ids to print
        #[arg(required = true)]
        playlist_ids: Vec<String>,

        /// Print only items marked missing
        #[arg(short = 'm', long)]
        missing_only: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = match args.config {
        Some(path) => path,
        None => TrackerConfig::default_path()
            .context("Could not determine the user config directory")?,
    };
    log::info!("Running with config file located at {:?}", config_path);

    let config = TrackerConfig::load(&config_path)?;

    match args.command.unwrap_or(Command::Check {
        playlists_filter: Vec::new(),
    }) {
        Command::Check { playlists_filter } => check(config, playlists_filter),
        Command::List => list(config),
        Command::Show {
            playlist_ids,
            missing_only,
        } => show(config, playlist_ids, missing_only),
    }
}

fn check(mut config: TrackerConfig, playlists_filter: Vec<String>) -> Result<()> {
    if !playlists_filter.is_empty() {
        log::info!(
            "Filtering to {} playlist(s): {:?}",
            playlists_filter.len(),
            playlists_filter
        );
        config = config.with_playlists(playlists_filter);
    }

    let source = YouTubeSource::new(config.api_key.clone());
    let pipeline = SyncPipeline::new(config, source)?;
    let summary = pipeline.run()?;

    log::info!(
        "Run complete: {} playlist(s) checked, {} updated, {} skipped",
        summary.checked,
        summary.updated,
        summary.skipped
    );

    Ok(())
}

fn list(config: TrackerConfig) -> Result<()> {
    let store = SnapshotStore::new(config.snapshot_dir())?;
    let snapshots = store.list()?;

    print!("{}", view::render_available(&snapshots));

    Ok(())
}

fn show(config: TrackerConfig, playlist_ids: Vec<String>, missing_only: bool) -> Result<()> {
    let store = SnapshotStore::new(config.snapshot_dir())?;

    for playlist_id in &playlist_ids {
        match store.read(playlist_id) {
            Ok(snapshot) => print!("{}", view::render_snapshot(&snapshot, missing_only)),
            Err(err) => log::error!("Could not read file {}.ipl: {:#}", playlist_id, err),
        }
    }

    Ok(())
}
