//! CLI definition using clap

use clap::{Parser, Subcommand};
use digit_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "digit-identifier")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Identify a handwritten digit in an image using a multimodal AI model")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Model name override
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the digit in a single image
    Identify {
        /// Path to image file
        image: PathBuf,

        /// Declared MIME type (e.g. "image/png"). Guessed from the extension if omitted.
        #[arg(long)]
        mime: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the Gemini model
        #[arg(long)]
        set_model: Option<String>,

        /// Set the API base URL
        #[arg(long)]
        set_endpoint: Option<String>,

        /// Set the environment variable the API key is read from
        #[arg(long)]
        set_api_key_env: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identify() {
        let cli = Cli::try_parse_from(["digit-identifier", "identify", "seven.png", "-f", "json"])
            .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Identify { image, mime } => {
                assert_eq!(image, PathBuf::from("seven.png"));
                assert!(mime.is_none());
            }
            _ => panic!("expected identify"),
        }
    }

    #[test]
    fn test_parse_config_flags() {
        let cli = Cli::try_parse_from([
            "digit-identifier",
            "config",
            "--set-model",
            "gemini-2.5-flash",
            "--set-output",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Config { set_model, set_output, reset, .. } => {
                assert_eq!(set_model.as_deref(), Some("gemini-2.5-flash"));
                assert_eq!(set_output, Some(OutputFormat::Json));
                assert!(!reset);
            }
            _ => panic!("expected config"),
        }
    }
}
