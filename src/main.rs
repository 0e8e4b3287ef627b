// src/main.rs

//! tastemap: export a subreddit's top restaurant posts as a map-ready CSV.
//!
//! Four subcommands, one per pipeline stage; `export` runs the whole
//! pipeline. Every stage memoizes its output, so an interrupted run can be
//! re-invoked and resumes at the first incomplete stage.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use tastemap::config::{Credentials, RunOptions, TimeRange};
use tastemap::error::Result;
use tastemap::pipeline::{run_export, run_extract, run_posts, run_resolve};
use tastemap::storage::SnapshotStore;

#[derive(Parser, Debug)]
#[command(
    name = "tastemap",
    version,
    about = "Export a subreddit's top restaurant posts as a map-ready CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and cache a community's top posts
    Posts {
        #[command(flatten)]
        shared: SharedArgs,
    },
    /// Parse posts into structured restaurant candidates
    Extract {
        #[command(flatten)]
        shared: SharedArgs,
    },
    /// Pull canonical place data for extracted candidates
    Resolve {
        #[command(flatten)]
        shared: SharedArgs,
    },
    /// Run the full pipeline and write the CSV
    Export {
        #[command(flatten)]
        shared: SharedArgs,

        /// Maximum number of rows to write (0 means no limit)
        #[arg(short = 'o', long, default_value_t = 0)]
        limit: usize,
    },
}

/// Flags shared by every subcommand.
#[derive(Args, Debug)]
struct SharedArgs {
    /// Community (subreddit) to fetch posts from
    #[arg(short = 's', long)]
    community: String,

    /// Number of posts to fetch
    #[arg(short = 'n', long, default_value_t = 10)]
    posts: usize,

    /// Time range for the top listing
    #[arg(short = 't', long, value_enum, default_value_t = TimeRange::Month)]
    time_range: TimeRange,

    /// Location context for place searches (e.g. "NYC")
    #[arg(short = 'l', long)]
    location_hint: Option<String>,

    /// Ignore cached stage snapshots and refetch everything
    #[arg(long)]
    no_cache: bool,

    /// Directory holding stage snapshots
    #[arg(long, default_value = ".cache")]
    cache_dir: PathBuf,

    /// Directory the CSV is written under
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,
}

impl SharedArgs {
    fn into_options(self, limit: usize) -> RunOptions {
        RunOptions {
            community: self.community,
            post_count: self.posts,
            time_range: self.time_range,
            location_hint: self.location_hint,
            use_cache: !self.no_cache,
            output_limit: (limit > 0).then_some(limit),
            cache_dir: self.cache_dir,
            out_dir: self.out_dir,
        }
    }
}

/// Validate options and open the snapshot store.
fn prepare(shared: SharedArgs, limit: usize) -> Result<(RunOptions, SnapshotStore)> {
    let options = shared.into_options(limit);
    options.validate()?;
    let store = SnapshotStore::new(&options.cache_dir);
    Ok((options, store))
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // A .env file is a convenience; plain environment variables work too.
    let _ = dotenvy::dotenv();
    let credentials = Credentials::from_env()?;

    match cli.command {
        Command::Posts { shared } => {
            let (options, store) = prepare(shared, 0)?;
            run_posts(&credentials, &options, &store).await?;
        }
        Command::Extract { shared } => {
            let (options, store) = prepare(shared, 0)?;
            run_extract(&credentials, &options, &store).await?;
        }
        Command::Resolve { shared } => {
            let (options, store) = prepare(shared, 0)?;
            run_resolve(&credentials, &options, &store).await?;
        }
        Command::Export { shared, limit } => {
            let (options, store) = prepare(shared, limit)?;
            run_export(&credentials, &options, &store).await?;
        }
    }

    Ok(())
}

/// Main entry point
#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
