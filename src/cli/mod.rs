//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Setport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Setport - selection set export and batch processing for model documents
#[derive(Parser, Debug)]
#[command(name = "setport")]
#[command(version, about, long_about = None)]
#[command(author = "Setport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "setport.toml", env = "SETPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SETPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export each selection set of a model into its own document
    Export(commands::export::ExportArgs),

    /// Run process steps over a folder of documents
    Batch(commands::batch::BatchArgs),

    /// List the selection sets defined in a model
    ListSets(commands::list::ListSetsArgs),

    /// List the available batch process steps
    ListSteps(commands::list::ListStepsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["setport", "export", "tower.rvt"]);
        assert_eq!(cli.config, "setport.toml");
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.model, PathBuf::from("tower.rvt"));
                assert!(args.sets.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_export_sets_in_order() {
        let cli = Cli::parse_from([
            "setport", "export", "tower.rvt", "--set", "Kitchen", "-s", "Bath", "--mode",
            "save_as", "--dry-run",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.sets, vec!["Kitchen", "Bath"]);
                assert_eq!(args.mode.as_deref(), Some("save_as"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["setport", "export", "tower.rvt", "--mode", "link"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["setport", "--config", "custom.toml", "list-steps"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["setport", "--log-level", "debug", "list-steps"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_batch() {
        let cli = Cli::parse_from([
            "setport", "batch", "--input-dir", "/models", "--step", "cleanup_backups",
        ]);
        match cli.command {
            Commands::Batch(args) => {
                assert_eq!(args.input_dir, Some(PathBuf::from("/models")));
                assert_eq!(args.steps, vec!["cleanup_backups"]);
                assert!(args.files.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_list_sets() {
        let cli = Cli::parse_from(["setport", "list-sets", "tower.rvt", "--json"]);
        assert!(matches!(cli.command, Commands::ListSets(ref a) if a.json));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["setport", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["setport", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref a) if a.force));
    }
}
