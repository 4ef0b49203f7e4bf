//! `list-sets` and `list-steps` commands

use super::{EXIT_CONFIG, EXIT_FATAL};
use crate::adapters::host::{DocumentHandle, OpenOptions};
use crate::adapters::model::ModelHost;
use crate::config::load_config_or_default;
use crate::core::batch::available_steps;
use crate::core::catalog::list_selection_sets;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the list-sets command
#[derive(Args, Debug)]
pub struct ListSetsArgs {
    /// Model document to inspect
    pub model: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SetListing {
    name: String,
    members: usize,
}

impl ListSetsArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let host = ModelHost::with_extension(config.export.model_extension.clone());
        let handle = match DocumentHandle::open(&host, &self.model, &OpenOptions::default()) {
            Ok(handle) => handle,
            Err(e) => {
                eprintln!("Failed to open {}: {e}", self.model.display());
                return Ok(EXIT_FATAL);
            }
        };

        let sets = list_selection_sets(handle.document());
        handle.close()?;
        let sets = match sets {
            Ok(sets) => sets,
            Err(e) => {
                eprintln!("Failed to read selection sets: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        let listing: Vec<SetListing> = sets
            .into_iter()
            .map(|set| SetListing {
                members: set.member_count(),
                name: set.name,
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else if listing.is_empty() {
            println!("No selection sets defined in {}", self.model.display());
        } else {
            println!("Selection sets in {}:", self.model.display());
            for set in &listing {
                println!("  {} ({} member(s))", set.name, set.members);
            }
        }
        Ok(0)
    }
}

/// Arguments for the list-steps command
#[derive(Args, Debug)]
pub struct ListStepsArgs {}

impl ListStepsArgs {
    pub async fn execute(&self) -> anyhow::Result<i32> {
        println!("Available process steps:");
        for step in available_steps() {
            let modifies = if step.might_modify_document() {
                " (may modify document)"
            } else {
                ""
            };
            println!("  {:<22} {}{modifies}", step.id(), step.name());
            println!("  {:<22} {}", "", step.description());
        }
        Ok(0)
    }
}
