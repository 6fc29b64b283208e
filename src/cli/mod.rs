//! Command-line interface for tm
//!
//! This module defines the CLI structure using clap derive macros.
//! Subcommand implementations live in the submodules.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::seed;
use crate::task::TaskStore;

mod stats;
mod task;

/// tm - TaskMaster
///
/// A terminal task manager: create, edit, delete, filter, and track
/// completion of tasks held in session-local, in-memory state. Running
/// without a subcommand opens the interactive UI.
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./.tm.toml)
    #[arg(long, global = true, env = "TM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start the session without the sample task list
    #[arg(long, global = true)]
    pub empty: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive terminal UI (the default)
    Ui,

    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Priority: low, medium, high (defaults from config)
        #[arg(short, long)]
        priority: Option<String>,

        /// Category label
        #[arg(short, long)]
        category: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Create the task already completed
        #[arg(long)]
        completed: bool,
    },

    /// List tasks, optionally filtered
    List {
        /// Substring match against title or description (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Exact category match
        #[arg(short, long)]
        category: Option<String>,

        /// Exact priority match: low, medium, high
        #[arg(short, long)]
        priority: Option<String>,

        /// Only completed tasks
        #[arg(long, conflicts_with = "pending")]
        completed: bool,

        /// Only pending tasks
        #[arg(long)]
        pending: bool,

        /// Show at most this many tasks
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one task by id or unique prefix
    Show {
        /// Task id or unique prefix
        id: String,
    },

    /// Edit a task (unspecified fields keep their current value)
    Edit {
        /// Task id or unique prefix
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        clear_description: bool,

        /// New priority: low, medium, high
        #[arg(short, long)]
        priority: Option<String>,

        /// New category label
        #[arg(short, long)]
        category: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// New completion state (true/false)
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Toggle a task between completed and pending
    Done {
        /// Task id or unique prefix
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task id or unique prefix
        id: String,
    },

    /// Aggregate statistics for the session
    Stats {
        /// Evaluation instant (RFC 3339 or YYYY-MM-DD, defaults to now)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// List known categories (configured defaults plus in-use labels)
    Categories,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let ctx = load_context(self.config.as_deref(), self.empty)?;
        let out = crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command.unwrap_or(Commands::Ui) {
            Commands::Ui => crate::ui::run(ctx.store, ctx.config),
            Commands::Add {
                title,
                description,
                priority,
                category,
                due,
                completed,
            } => task::run_add(
                ctx,
                task::AddOptions {
                    title,
                    description,
                    priority,
                    category,
                    due,
                    completed,
                },
                out,
            ),
            Commands::List {
                search,
                category,
                priority,
                completed,
                pending,
                limit,
            } => task::run_list(
                ctx,
                task::ListOptions {
                    search,
                    category,
                    priority,
                    completed,
                    pending,
                    limit,
                },
                out,
            ),
            Commands::Show { id } => task::run_show(ctx, &id, out),
            Commands::Edit {
                id,
                title,
                description,
                clear_description,
                priority,
                category,
                due,
                clear_due,
                completed,
            } => task::run_edit(
                ctx,
                task::EditOptions {
                    id,
                    title,
                    description,
                    clear_description,
                    priority,
                    category,
                    due,
                    clear_due,
                    completed,
                },
                out,
            ),
            Commands::Done { id } => task::run_done(ctx, &id, out),
            Commands::Rm { id } => task::run_rm(ctx, &id, out),
            Commands::Stats { as_of } => stats::run_stats(ctx, as_of.as_deref(), out),
            Commands::Categories => stats::run_categories(ctx, out),
        }
    }
}

/// One session's worth of state: config plus the (possibly seeded) store.
pub(crate) struct Context {
    pub config: Config,
    pub store: TaskStore,
}

pub(crate) fn load_context(config_path: Option<&Path>, empty: bool) -> Result<Context> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let store = if config.tasks.seed && !empty {
        TaskStore::with_tasks(config.tasks.clone(), seed::sample_tasks())
    } else {
        TaskStore::new(config.tasks.clone())
    };
    tracing::debug!(tasks = store.len(), "session loaded");
    Ok(Context { config, store })
}
