//! Revive CLI - list, search, and export secondhand items

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use revive::config::{self, Settings};
use revive::ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "revive")]
#[command(version)]
#[command(about = "Revive - give your idle things a second life")]
#[command(long_about = r#"
Revive keeps a local list of things you want to sell or give away.

Example usage:
  revive --init-db
  revive add --name "Umbrella" --contact "qq:123" --price 0
  revive list --order price --asc
  revive find --q umbrella
  revive export --out items.csv
"#)]
struct Cli {
    /// Path to the database file (default: revive.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Create the database if needed (safe to repeat)
    #[arg(long)]
    init_db: bool,

    /// Path to the config file (default: revive.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item
    Add {
        /// Item name (required)
        #[arg(long)]
        name: String,

        /// Item description
        #[arg(long, default_value = "")]
        desc: String,

        /// How to reach you (required)
        #[arg(long)]
        contact: String,

        /// Asking price, 0 means it is a gift
        #[arg(long, default_value = "0")]
        price: String,
    },

    /// List items
    List {
        /// Maximum number of items to show
        #[arg(long)]
        limit: Option<usize>,

        /// Sort key
        #[arg(long, default_value = "created_at", value_parser = ["created_at", "price", "id", "name"])]
        order: String,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },

    /// Find items by keyword in name or description
    Find {
        /// Keyword
        #[arg(long)]
        q: String,

        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete an item by id
    Delete {
        /// Item id
        #[arg(long)]
        id: i64,
    },

    /// Export all items to CSV
    Export {
        /// Output file (default: items.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show totals for the current database
    Stats,

    /// Open the interactive form
    #[cfg(feature = "form")]
    Form,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::List { .. } => "list",
            Commands::Find { .. } => "find",
            Commands::Delete { .. } => "delete",
            Commands::Export { .. } => "export",
            Commands::Stats => "stats",
            #[cfg(feature = "form")]
            Commands::Form => "form",
        }
    }
}

/// How command results are written to stdout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

pub fn emit_success(mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": true,
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string(&envelope)?);
    }
    Ok(())
}

fn report_error(mode: OutputMode, command: &str, err: &anyhow::Error) {
    if mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": false,
            "command": command,
            "error": format!("{:#}", err),
        });
        println!("{}", envelope);
        return;
    }

    let is_validation = err
        .downcast_ref::<revive::Error>()
        .is_some_and(revive::Error::is_validation);
    if is_validation {
        ui::warn(&format!("{:#}", err));
    } else {
        ui::error(&format!("{:#}", err));
    }
}

fn init_logging(verbose: bool, interactive: bool) {
    let default_level = if verbose {
        "debug"
    } else if interactive {
        "off"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("REVIVE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    #[cfg(feature = "form")]
    let interactive = matches!(cli.command, Some(Commands::Form));
    #[cfg(not(feature = "form"))]
    let interactive = false;
    init_logging(cli.verbose, interactive);

    let command_name = match &cli.command {
        Some(command) => command.name(),
        None => "init-db",
    };

    match run(cli, mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("{} failed: {:?}", command_name, err);
            report_error(mode, command_name, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mode: OutputMode) -> anyhow::Result<()> {
    let file_config = config::load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.db, file_config);
    tracing::debug!(?settings, "Resolved settings");

    if cli.init_db {
        commands::run_init_db(&settings, mode)?;
    }

    let Some(command) = cli.command else {
        if !cli.init_db {
            Cli::command().print_help()?;
        }
        return Ok(());
    };

    match command {
        Commands::Add { name, desc, contact, price } => {
            commands::run_add(&settings, mode, &name, &desc, &contact, &price)
        }
        Commands::List { limit, order, asc } => {
            commands::run_list(&settings, mode, limit.unwrap_or(settings.list_limit), &order, asc)
        }
        Commands::Find { q, limit } => {
            commands::run_find(&settings, mode, &q, limit.unwrap_or(settings.list_limit))
        }
        Commands::Delete { id } => commands::run_delete(&settings, mode, id),
        Commands::Export { out } => {
            let out = out.unwrap_or_else(|| settings.export_file.clone());
            commands::run_export(&settings, mode, &out)
        }
        Commands::Stats => commands::run_stats(&settings, mode),
        #[cfg(feature = "form")]
        Commands::Form => commands::run_form(&settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_global_db() {
        let cli = Cli::try_parse_from([
            "revive", "--db", "my.db", "add", "--name", "雨伞", "--contact", "qq:123",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("my.db")));
        match cli.command {
            Some(Commands::Add { name, desc, price, .. }) => {
                assert_eq!(name, "雨伞");
                assert_eq!(desc, "");
                assert_eq!(price, "0");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_init_db_without_command() {
        let cli = Cli::try_parse_from(["revive", "--init-db"]).unwrap();
        assert!(cli.init_db);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_rejects_unknown_order() {
        assert!(Cli::try_parse_from(["revive", "list", "--order", "color"]).is_err());
        let cli = Cli::try_parse_from(["revive", "list", "--order", "price", "--asc"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List { limit: None, asc: true, .. })
        ));
    }

    #[test]
    fn test_add_requires_name_and_contact() {
        assert!(Cli::try_parse_from(["revive", "add", "--name", "lamp"]).is_err());
    }
}
