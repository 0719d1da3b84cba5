//! CLI for pubs-render - Render and export a lab publication feed.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use pubs_render::{
    bibtex_export, citation_export, compute_view, load_publications, CopyButton, CopyFormat,
    FeedSource, HtmlRenderer, PublicationsPage, RenderError, SiteConfig, SortOrder,
    SystemClipboard, CLIPBOARD_HANDOVER,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Render a publication feed as grouped HTML cards, or export it as citations
#[derive(Parser)]
#[command(name = "pubs-render")]
#[command(version)]
#[command(after_help = "\
Examples:
  pubs-render render --feed data/publications.json --fallback fallback.html
  pubs-render render --query rowhammer --ascending -o pubs.html
  pubs-render bibtex --feed https://lab.example/data/publications.json
  pubs-render copy --doi 10.1145/3548606 --format citation")]
struct Cli {
    /// Site configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the publication list as HTML
    #[command(after_help = "\
If the feed cannot be loaded, the fallback markup is written unchanged.")]
    Render {
        /// Feed path or URL (default: data/publications.json)
        #[arg(short, long)]
        feed: Option<String>,

        /// File holding the markup to keep when the feed is unavailable
        #[arg(long)]
        fallback: Option<PathBuf>,

        /// Free-text search over title, authors, journal and DOI
        #[arg(short, long, default_value = "")]
        query: String,

        /// Oldest first within the view
        #[arg(long)]
        ascending: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print BibTeX entries for the view
    Bibtex {
        #[arg(short, long)]
        feed: Option<String>,

        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(long)]
        ascending: bool,
    },

    /// Print plain citations for the view
    Cite {
        #[arg(short, long)]
        feed: Option<String>,

        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(long)]
        ascending: bool,
    },

    /// Copy one publication's export to the system clipboard
    Copy {
        /// DOI of the publication to copy
        #[arg(long)]
        doi: String,

        #[arg(long, value_enum, default_value_t = Format::Bibtex)]
        format: Format,

        #[arg(short, long)]
        feed: Option<String>,

        /// Seconds to keep serving the copied text until a clipboard manager takes it
        #[arg(long, default_value_t = CLIPBOARD_HANDOVER.as_secs())]
        handover: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Bibtex,
    Citation,
}

impl From<Format> for CopyFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Bibtex => CopyFormat::Bibtex,
            Format::Citation => CopyFormat::Citation,
        }
    }
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — fallback markup file not found / unreadable
    FallbackFile(String),
    /// Exit 11 — feed unavailable or malformed
    Feed(String),
    /// Exit 12 — configuration file not found / invalid
    Config(String),
    /// Exit 13 — no publication with the requested DOI
    PublicationNotFound(String),
    /// Exit 14 — template setup or rendering failed
    Render(String),
    /// Exit 15 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::FallbackFile(_) => 10,
            AppError::Feed(_) => 11,
            AppError::Config(_) => 12,
            AppError::PublicationNotFound(_) => 13,
            AppError::Render(_) => 14,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::FallbackFile(msg) => {
                write!(f, "{}\n  hint: verify the fallback file path is correct", msg)
            }
            AppError::Feed(msg) => {
                write!(
                    f,
                    "{}\n  hint: the feed must be a JSON array of publication objects",
                    msg
                )
            }
            AppError::Config(msg) => {
                write!(
                    f,
                    "{}\n  hint: supported keys are 'feed' and 'fallback'",
                    msg
                )
            }
            AppError::PublicationNotFound(msg) => {
                write!(f, "{}\n  hint: check the DOI against the feed", msg)
            }
            AppError::Render(msg) => write!(f, "{}", msg),
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => SiteConfig::load(path)
            .map_err(|e| AppError::Config(format!("'{}': {}", path.display(), e)))?,
        None => SiteConfig::default(),
    };

    match cli.command {
        Commands::Render {
            feed,
            fallback,
            query,
            ascending,
            output,
        } => {
            let source = feed_source(feed.as_deref(), &config);
            let fallback = fallback.or_else(|| config.fallback.clone());
            render_command(&source, fallback.as_deref(), &query, ascending, output.as_deref())?;
        }
        Commands::Bibtex {
            feed,
            query,
            ascending,
        } => {
            let source = feed_source(feed.as_deref(), &config);
            export_command(&source, &query, ascending, Export::Bibtex)?;
        }
        Commands::Cite {
            feed,
            query,
            ascending,
        } => {
            let source = feed_source(feed.as_deref(), &config);
            export_command(&source, &query, ascending, Export::Citation)?;
        }
        Commands::Copy {
            doi,
            format,
            feed,
            handover,
        } => {
            let source = feed_source(feed.as_deref(), &config);
            copy_command(&source, &doi, format.into(), Duration::from_secs(handover))?;
        }
    }

    Ok(())
}

fn feed_source(flag: Option<&str>, config: &SiteConfig) -> FeedSource {
    FeedSource::parse(flag.unwrap_or(&config.feed))
}

fn sort_order(ascending: bool) -> SortOrder {
    if ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Render the publication list, keeping the fallback when the feed is unavailable.
fn render_command(
    source: &FeedSource,
    fallback: Option<&Path>,
    query: &str,
    ascending: bool,
    output: Option<&Path>,
) -> Result<(), AppError> {
    // 1. Seed the container with the fallback markup
    let fallback_markup = match fallback {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| AppError::FallbackFile(format!("'{}': {}", path.display(), e)))?,
        None => String::new(),
    };
    let renderer =
        HtmlRenderer::new(fallback_markup).map_err(|e| AppError::Render(e.to_string()))?;

    // 2. Load once and render the default view
    let render_error = |e: RenderError| AppError::Render(e.to_string());
    let mut page = PublicationsPage::new(renderer);
    page.init(load_publications(source)).map_err(render_error)?;

    // 3. Replay the requested search and sort
    if !query.is_empty() {
        page.on_search(query).map_err(render_error)?;
    }
    if ascending {
        page.on_sort_toggle().map_err(render_error)?;
    }
    debug!(loaded = page.is_loaded(), sort = page.sort_label(), "page ready");

    // 4. Write to file or stdout
    let markup = page.into_renderer().into_markup();
    write_output(&markup, output)
}

#[derive(Clone, Copy)]
enum Export {
    Bibtex,
    Citation,
}

/// Print every publication of the view in one citation format.
fn export_command(
    source: &FeedSource,
    query: &str,
    ascending: bool,
    export: Export,
) -> Result<(), AppError> {
    let publications =
        load_publications(source).map_err(|e| AppError::Feed(format!("'{}': {}", source, e)))?;
    let view = compute_view(&publications, query, sort_order(ascending));

    let text = match export {
        Export::Bibtex => bibtex_export(&view),
        Export::Citation => citation_export(&view),
    };
    info!(count = view.len(), "exported publications");

    if text.is_empty() {
        return Ok(());
    }
    write_output(&format!("{}\n", text), None)
}

/// Copy one publication's export, printing the confirmation label on success.
fn copy_command(
    source: &FeedSource,
    doi: &str,
    format: CopyFormat,
    handover: Duration,
) -> Result<(), AppError> {
    let publications =
        load_publications(source).map_err(|e| AppError::Feed(format!("'{}': {}", source, e)))?;
    let publication = publications
        .iter()
        .find(|p| p.doi.as_deref().is_some_and(|d| d.eq_ignore_ascii_case(doi)))
        .ok_or_else(|| AppError::PublicationNotFound(format!("no publication with DOI '{}'", doi)))?;

    let mut clipboard = match SystemClipboard::new() {
        Ok(clipboard) => clipboard.with_handover(handover),
        Err(e) => {
            debug!(error = %e, "clipboard unavailable");
            return Ok(());
        }
    };

    let mut button = CopyButton::new(format);
    debug!(format = ?button.format(), doi, "copying publication");
    if button.activate(publication, &mut clipboard, Instant::now()) {
        println!("{}", button.label(Instant::now()));
    }

    Ok(())
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), AppError> {
    if let Some(output_path) = output {
        fs::write(output_path, content).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
        info!(path = %output_path.display(), "wrote publication list");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{}", content)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }
    Ok(())
}
