//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "setport.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Setport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set export.output_dir in {}", self.output);
                println!("  2. List selection sets: setport list-sets <MODEL>");
                println!("  3. Validate configuration: setport validate-config");
                println!("  4. Run export: setport export <MODEL>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with every setting at its default
    fn generate_config() -> String {
        r#"# Setport Configuration File
# Selection set export and batch processing for model documents

[application]
log_level = "info"

# ============================================================================
# Selection Set Export
# ============================================================================
[export]
# Directory receiving one artifact per set. Leave empty to use the last
# directory used, or pass --output-dir.
output_dir = ""

# Sets to export, in order. Empty exports every set.
set_names = []

# Save the source document first when it has unsaved changes
save_before_export = true

# Replace artifacts that already exist
overwrite = false

# Center each artifact's wall footprint at the origin (horizontal only)
recenter_xy = true
anchor_category = "walls"

# Detach artifacts from their central model
detach = false

# copy | save_as
artifact_mode = "copy"
compact = true
preview = false

# ignore | report
unresolved_members = "ignore"

model_extension = "rvt"

# Delete numbered backups (name.0001.rvt) next to artifacts
cleanup_backups = true

dry_run = false

# ============================================================================
# Batch Processing
# ============================================================================
[batch]
input_dir = ""
extension = "rvt"
# Run `setport list-steps` for the available steps
steps = ["open_and_save"]
save_compact = true
detach = false

# ============================================================================
# Audit Log
# ============================================================================
[audit]
enabled = true
# Defaults to <preferences dir>/logs/SelectionSetAuditLog.csv
# path = "/var/log/setport/audit.csv"

[preferences]
# Defaults to the platform configuration directory
# dir = "${HOME}/.config/setport"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }
}
