//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::output_outcome;
use digit_app::app::identify;
use digit_app::config::Config;
use digit_types::{OutputFormat, Outcome, Result};
use digit_vision::UploadedImage;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Identify { image, mime } => {
            let mut config = Config::load()?;
            if let Some(ref model) = cli.model {
                config.model = model.clone();
            }
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_identify(&config, image.clone(), mime.clone(), output_format)
        }

        Commands::Config {
            show,
            set_model,
            set_endpoint,
            set_api_key_env,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_model.clone(),
            set_endpoint.clone(),
            set_api_key_env.clone(),
            *set_output,
            *reset,
        ),
    }
}

fn cmd_identify(
    config: &Config,
    image: PathBuf,
    mime: Option<String>,
    output_format: OutputFormat,
) -> Result<()> {
    let image = UploadedImage::open(&image, mime.as_deref())?;
    if let Some((width, height)) = image.dimensions() {
        debug!(width, height, "image dimensions");
    }

    let classifier = config.classifier();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Asking {} about {}...", config.model, image.file_name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = identify(&image, &classifier);
    spinner.finish_and_clear();

    let outcome = Outcome::from(result?);
    output_outcome(output_format, &image, &outcome)
}

fn cmd_config(
    show: bool,
    set_model: Option<String>,
    set_endpoint: Option<String>,
    set_api_key_env: Option<String>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(model) = set_model {
        config.model = model;
        modified = true;
    }

    if let Some(endpoint) = set_endpoint {
        config.endpoint = endpoint;
        modified = true;
    }

    if let Some(api_key_env) = set_api_key_env {
        config.api_key_env = api_key_env;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("\n{}", config);
    }

    Ok(())
}
