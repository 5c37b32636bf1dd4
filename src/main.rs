//! ticktock CLI
//!
//! Command-line front end for a ticktock server:
//! - Start and finish tasks
//! - Show recent titles and ongoing tasks
//! - Fetch reports for day ranges

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ticktock::config::{generate_default_config, Config, LoggingConfig};
use ticktock::display;
use ticktock::prompt::{self, PromptError};
use ticktock::view::{days_back_range, Clock, QueryParams, SystemClock, ViewModel};
use ticktock::ApiClient;

#[derive(Parser)]
#[command(name = "ticktock")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track where your time goes")]
#[command(long_about = "ticktock talks to a ticktock server.\nStart and finish tasks, check what is ongoing, and read time reports.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API server URL (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file (default: ~/.config/ticktock/config.toml, then ./ticktock.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print recent finished titles
    Recent {
        /// Number of titles to display (0 means the default)
        #[arg(short = 'n', long, default_value_t = display::DEFAULT_RECENT_LIMIT)]
        limit: usize,
        /// Prefix titles with an index starting from 1
        #[arg(short, long)]
        index: bool,
    },

    /// Show currently ongoing tasks
    Ongoing,

    /// Start a task
    Start {
        /// Title of the task. Choose interactively if not given
        title: Option<String>,
        /// Wait for notes on stdin until Ctrl-D, then finish the task
        #[arg(short, long)]
        wait: bool,
    },

    /// Finish an ongoing task
    Finish {
        /// Title of the task. Defaults to the only ongoing task
        title: Option<String>,
        /// Notes, one line per flag. A single '-' reads stdin
        #[arg(long)]
        notes: Vec<String>,
    },

    /// Show time usage report for days relative to today
    Report {
        /// Start from '@today - from' days
        #[arg(short, long, default_value_t = 0)]
        from: u32,
        /// End at '@today - to' days
        #[arg(short, long, default_value_t = 0)]
        to: u32,
        /// Report view type (default from config)
        #[arg(long)]
        view_type: Option<String>,
    },

    /// Show time usage report for explicit days (YYYY-MM-DD)
    ReportByDate {
        start: String,
        end: String,
        /// Report view type (default from config)
        #[arg(long)]
        view_type: Option<String>,
    },

    /// Quick report: OFFSET days back, spanning WINDOW days (default: through today)
    Quick {
        offset: u32,
        window: Option<u32>,
        /// Report view type (default from config)
        #[arg(long)]
        view_type: Option<String>,
    },

    /// Show last finished details of a task
    Detail {
        /// Title of the task. Choose interactively if not given
        title: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    init_logging(&config.logging);

    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }
    tracing::debug!(url = %config.api.url, "Using ticktock server");

    let api = Arc::new(ApiClient::new(config.api.client_config())?);
    let clock = Arc::new(SystemClock);
    let view = ViewModel::with_view_type(api, clock.clone(), config.report.view_type.clone());

    let output = run(cli.command, &view, clock.as_ref()).await?;

    if cli.format == OutputFormat::Json {
        println!("{}", display::render_json(&view.snapshot().await)?);
    } else if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ticktock={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run one command, returning the text to print
async fn run(command: Commands, view: &ViewModel, clock: &dyn Clock) -> anyhow::Result<String> {
    match command {
        Commands::Recent { limit, index } => {
            view.refresh().await?;
            let state = view.snapshot().await;
            Ok(display::render_recent(&state.recent_titles, limit, index))
        }

        Commands::Ongoing => {
            view.refresh().await?;
            Ok(display::render_ongoing(&view.snapshot().await, Utc::now()))
        }

        Commands::Start { title, wait } => {
            let title = match title {
                Some(title) => title,
                None => choose_recent(view).await?,
            };

            view.start(&title).await?;

            if !wait {
                return Ok(format!("(Started: {})", title));
            }

            eprintln!("(Started: {})", title);
            eprintln!("Waiting for notes input, Ctrl-D ends the input and finishes the task:");
            let notes = read_stdin_notes()
                .await
                .context("failed to read notes, task not finished")?;
            view.set_notes(&title, notes).await?;
            view.finish(&title).await?;
            Ok(format!("(Finished: {})", title))
        }

        Commands::Finish { title, notes } => {
            view.refresh().await?;
            let ongoing: Vec<String> = view.snapshot().await.ongoing.keys().cloned().collect();

            let title = match title {
                Some(title) => title,
                None if ongoing.is_empty() => return Ok("(NothingToFinish)".to_string()),
                None if ongoing.len() == 1 => ongoing[0].clone(),
                None => choose(ongoing).await?,
            };

            let notes = if notes.len() == 1 && notes[0] == "-" {
                read_stdin_notes().await?
            } else {
                notes.join("\n")
            };

            view.set_notes(&title, notes).await?;
            view.finish(&title).await?;
            Ok(format!("(Finished: {})", title))
        }

        Commands::Report {
            from,
            to,
            view_type,
        } => {
            let (start, end) = days_back_range(clock.today(), from, to)?;
            let current = view.snapshot().await.query.view_type;
            view.set_query(QueryParams::for_range(
                start,
                end,
                view_type.unwrap_or(current),
            ))
            .await;
            view.report().await?;
            Ok(display::render_report(view.snapshot().await.report.as_deref()))
        }

        Commands::ReportByDate {
            start,
            end,
            view_type,
        } => {
            let view_type = match view_type {
                Some(view_type) => view_type,
                None => view.snapshot().await.query.view_type,
            };
            view.report_by_date(&start, &end, &view_type).await?;
            Ok(display::render_report(view.snapshot().await.report.as_deref()))
        }

        Commands::Quick {
            offset,
            window,
            view_type,
        } => {
            if let Some(view_type) = view_type {
                let mut query = view.snapshot().await.query;
                query.view_type = view_type;
                view.set_query(query).await;
            }
            view.quick_report(offset, window).await?;
            Ok(display::render_report(view.snapshot().await.report.as_deref()))
        }

        Commands::Detail { title } => {
            let title = match title {
                Some(title) => title,
                None => choose_recent(view).await?,
            };
            view.item_detail(&title).await?;
            Ok(display::render_detail(view.snapshot().await.detail.as_deref()))
        }

        Commands::Config { .. } => Ok(String::new()),
    }
}

async fn choose_recent(view: &ViewModel) -> anyhow::Result<String> {
    view.refresh().await?;
    choose(view.snapshot().await.recent_titles).await
}

async fn choose(candidates: Vec<String>) -> anyhow::Result<String> {
    let picked = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        prompt::choose(&candidates, stdin.lock(), std::io::stderr())
    })
    .await??;
    Ok(picked)
}

async fn read_stdin_notes() -> Result<String, PromptError> {
    tokio::task::spawn_blocking(|| prompt::read_notes(std::io::stdin().lock()))
        .await
        .map_err(|e| PromptError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}
