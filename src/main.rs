use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use pagescout::classify::liveness::DEFAULT_SAMPLE_SIZE;
use pagescout::config::Config;
use pagescout::pipeline::collect::DEFAULT_POSTS_PER_PAGE;
use pagescout::pipeline::discovery::DEFAULT_RESULTS_PER_QUERY;
use pagescout::vk::PageGateway;

/// pagescout: discover live, non-spam programming communities on VK.
///
/// Searches VK for community pages, drops the ones that stopped posting
/// and the ones selling services, and prints the surviving page ids.
#[derive(Parser)]
#[command(name = "pagescout", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for community pages and keep the live, non-spam ones
    Discover {
        /// Write the JSON id list here instead of stdout
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// Search results requested per query
        #[arg(long, default_value_t = DEFAULT_RESULTS_PER_QUERY, value_parser = clap::value_parser!(u32).range(1..))]
        results_per_query: u32,

        /// Recent posts sampled per page for the liveness check
        #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
        sample_size: u32,

        /// Pages checked in parallel per filter stage (default: 1)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=16))]
        concurrency: u64,
    },

    /// Fetch recent posts of discovered pages into a post store
    Collect {
        /// JSON id list written by `discover`
        #[arg(long)]
        pages: PathBuf,

        /// Write the post store here instead of stdout
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// Posts fetched per page
        #[arg(long, default_value_t = DEFAULT_POSTS_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..=100))]
        count: u32,
    },

    /// Answer a bot command from a post store
    Reply {
        /// Post store written by `collect`
        #[arg(long)]
        store: PathBuf,

        /// Command name, e.g. `python_news` or `/help`
        command: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pagescout=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Discover {
            outfile,
            results_per_query,
            sample_size,
            concurrency,
        } => {
            let config = Config::load()?;
            let gateway: Arc<dyn PageGateway> = Arc::new(config.client()?);

            let mut settings = config.pipeline_settings();
            settings.results_per_query = results_per_query;
            settings.sample_size = sample_size;
            settings.concurrency = concurrency as usize;
            settings.show_progress = true;

            info!(queries = ?settings.queries, "Starting discovery");

            let report = pagescout::pipeline::run::discover_and_filter(gateway, &settings)
                .await
                .context("Discovery run failed; nothing was written")?;

            pagescout::output::terminal::display_run_summary(&report);

            match outfile {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    pagescout::output::write_result(&report.accepted, BufWriter::new(file))?;
                    eprintln!("{} {}", "Saved to".bold(), path.display());
                }
                None => pagescout::output::write_result(&report.accepted, io::stdout().lock())?,
            }
        }

        Commands::Collect {
            pages,
            outfile,
            count,
        } => {
            let config = Config::load()?;
            let client = config.client()?;

            let file = File::open(&pages)
                .with_context(|| format!("Failed to open {}", pages.display()))?;
            let page_set = pagescout::output::read_page_set(BufReader::new(file))?;

            let posts = pagescout::pipeline::collect::collect_posts(&client, &page_set, count)
                .await
                .context("Post collection failed; nothing was written")?;

            let destination = match outfile {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    pagescout::output::write_posts(&posts, BufWriter::new(file))?;
                    path.display().to_string()
                }
                None => {
                    pagescout::output::write_posts(&posts, io::stdout().lock())?;
                    "stdout".to_string()
                }
            };

            pagescout::output::terminal::display_collect_summary(
                page_set.len(),
                posts.len(),
                &destination,
            );
        }

        Commands::Reply { store, command } => {
            let store = pagescout::bot::store::PostStore::open(&store)?;
            match pagescout::bot::commands::dispatch(&command, &store) {
                Some(reply) => println!("{reply}"),
                None => anyhow::bail!(
                    "Unknown command `{command}`. Run `pagescout reply --store <FILE> help` for the list."
                ),
            }
        }
    }

    Ok(())
}
