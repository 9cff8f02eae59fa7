//! # Folio CLI (`folio`)
//!
//! The `folio` binary loads the content tree and exposes the sidebar,
//! navigation, search and export logic from the command line.
//!
//! ## Usage
//!
//! ```bash
//! folio --config ./folio.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `folio stats` | Document counts, per-section breakdown, read time |
//! | `folio tree` | Render the docs sidebar for a location |
//! | `folio nav <slug>` | Previous/next links for a docs page |
//! | `folio search "<query>"` | Ranked search over docs or blog |
//! | `folio get <slug>` | Metadata, contents and navigation for one page |
//! | `folio export` | Write the static search index JSON |
//! | `folio state ...` | Inspect or change persisted sidebar state |
//! | `folio completions <shell>` | Print a shell completion script |
//!
//! Logs go to stderr and honour `RUST_LOG` (default `warn`).

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use folio::config;
use folio::content::{self, LoadedContent};
use folio::progress::ProgressMode;
use folio::state_cmd::{self, StateChange};
use folio::tree::TreeFormat;
use folio::{export, get, nav, search, stats, tree};
use folio_core::models::Collection;
use folio_core::navigation::NavPolicy;

/// Folio: ordering, sidebar, navigation and search for a docs and blog site.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "folio",
    about = "Ordering, sidebar, prev/next navigation and search for a Markdown docs and blog site",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./folio.toml`. Content root, ordering tables, search
    /// limits and the state file location are read from this file.
    #[arg(long, global = true, default_value = "./folio.toml")]
    config: PathBuf,

    /// Load progress on stderr. Defaults to human when stderr is a TTY.
    #[arg(long, global = true, value_enum)]
    progress: Option<ProgressMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CollectionArg {
    Docs,
    Blog,
}

impl From<CollectionArg> for Collection {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Docs => Collection::Docs,
            CollectionArg::Blog => Collection::Blog,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Global,
    Context,
}

impl From<PolicyArg> for NavPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Global => NavPolicy::GlobalFlatten,
            PolicyArg::Context => NavPolicy::ContextScoped,
        }
    }
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Summarize loaded content.
    ///
    /// Counts per collection and per docs section, total and average read
    /// time, and any files that failed to compile.
    Stats,

    /// Render the docs sidebar.
    ///
    /// Sections on the path to `--current` are expanded; stored overrides
    /// from `folio state open/close` take precedence.
    Tree {
        /// URL of the page being viewed, e.g. `/docs/guide/setup`.
        #[arg(long)]
        current: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: TreeFormat,

        /// Expand every section regardless of location and overrides.
        #[arg(long)]
        all: bool,
    },

    /// Print previous/next links for a docs page.
    Nav {
        /// Docs slug, e.g. `guide/setup`.
        slug: String,

        /// Override `[navigation].policy`.
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        #[arg(long)]
        json: bool,
    },

    /// Search docs or blog posts.
    ///
    /// Title matches outrank description, slug and body matches. Results
    /// carry a score and an excerpt around the first body match.
    Search {
        /// The search query string.
        query: String,

        #[arg(long, value_enum, default_value = "docs")]
        collection: CollectionArg,

        /// Maximum number of results to return.
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Show one document with read time, table of contents and navigation.
    Get {
        slug: String,

        #[arg(long, value_enum, default_value = "docs")]
        collection: CollectionArg,

        #[arg(long)]
        json: bool,
    },

    /// Write the static search index as JSON.
    ///
    /// Writes to `--output`, else `[export].path`, else stdout.
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Inspect or change persisted sidebar state.
    State {
        #[command(subcommand)]
        action: StateAction,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Sidebar state subcommands.
#[derive(Subcommand)]
enum StateAction {
    /// Print the stored state.
    Show,
    /// Flip sidebar visibility.
    Toggle,
    /// Force a section open, e.g. `guide/features`.
    Open { key: String },
    /// Force a section closed.
    Close { key: String },
    /// Drop a section's override so it follows the current page again.
    Clear { key: String },
    /// Set the sidebar width in pixels (clamped).
    Width { px: u32 },
    /// Delete the state file.
    Reset,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that don't need config
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "folio", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_or_default(&cli.config)?;

    // Commands that don't need content
    if let Commands::State { action } = cli.command {
        return match action {
            StateAction::Show => state_cmd::run_show(&cfg),
            StateAction::Toggle => state_cmd::run_change(&cfg, StateChange::ToggleSidebar),
            StateAction::Open { key } => state_cmd::run_change(&cfg, StateChange::Open(key)),
            StateAction::Close { key } => state_cmd::run_change(&cfg, StateChange::Close(key)),
            StateAction::Clear { key } => state_cmd::run_change(&cfg, StateChange::Clear(key)),
            StateAction::Width { px } => state_cmd::run_change(&cfg, StateChange::Width(px)),
            StateAction::Reset => state_cmd::run_reset(&cfg),
        };
    }

    let progress = cli.progress.unwrap_or_else(ProgressMode::default_for_tty);
    let loaded: LoadedContent = content::load_content(&cfg.content, progress.reporter().as_ref())?;

    match cli.command {
        Commands::Stats => {
            stats::run_stats(&cfg, &loaded)?;
        }
        Commands::Tree {
            current,
            format,
            all,
        } => {
            tree::run_tree(&cfg, &loaded, current.as_deref(), format, all)?;
        }
        Commands::Nav { slug, policy, json } => {
            nav::run_nav(&cfg, &loaded, &slug, policy.map(NavPolicy::from), json)?;
        }
        Commands::Search {
            query,
            collection,
            limit,
            json,
        } => {
            search::run_search(&cfg, &loaded, &query, collection.into(), limit, json)?;
        }
        Commands::Get {
            slug,
            collection,
            json,
        } => {
            get::run_get(&cfg, &loaded, collection.into(), &slug, json)?;
        }
        Commands::Export { output } => {
            let output = output.or_else(|| cfg.export.path.clone());
            export::run_export(&cfg, &loaded, output.as_deref())?;
        }
        Commands::State { .. } | Commands::Completions { .. } => {
            // Handled above (before content loading)
            unreachable!()
        }
    }

    Ok(())
}
