//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Setport configuration file.

use super::EXIT_CONFIG;
use crate::config::load_config;
use crate::core::batch::resolve_steps;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(EXIT_CONFIG);
        }

        if let Err(e) = resolve_steps(&config.batch.steps) {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(EXIT_CONFIG);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Output Directory: {}",
            if config.export.output_dir.is_empty() {
                "(remembered or default)"
            } else {
                config.export.output_dir.as_str()
            }
        );
        println!(
            "  Selection Sets: {}",
            if config.export.set_names.is_empty() {
                "All".to_string()
            } else {
                format!("{:?}", config.export.set_names)
            }
        );
        println!("  Artifact Mode: {:?}", config.export.artifact_mode);
        println!("  Recenter: {}", config.export.recenter_xy);
        println!("  Anchor Category: {}", config.export.anchor_category);
        println!("  Overwrite: {}", config.export.overwrite);
        println!("  Batch Steps: {}", config.batch.steps.join(", "));
        println!("  Audit Enabled: {}", config.audit.enabled);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("setport.toml");
        std::fs::write(&path, "[export]\noutput_dir = \"/out\"\n").unwrap();

        let code = ValidateArgs {}.execute(path.to_str().unwrap()).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_unknown_step_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("setport.toml");
        std::fs::write(&path, "[batch]\nsteps = [\"purge_views\"]\n").unwrap();

        let code = ValidateArgs {}.execute(path.to_str().unwrap()).await.unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let code = ValidateArgs {}
            .execute("/no/such/setport.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
