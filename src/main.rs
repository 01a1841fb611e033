use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use dl_formats::cli::Args;
use dl_formats::config::AppConfig;
use dl_formats::options::DownloadOptions;
use dl_formats::security::InputValidator;
use dl_formats::formats::FormatResolver;

fn main() {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match AppConfig::load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load configuration, using defaults: {}", e);
                AppConfig::default()
            }
        },
    };

    let format = args.format.clone().unwrap_or_else(|| config.default_format.clone());
    let quality = args.quality.clone().unwrap_or_else(|| config.default_quality.clone());
    let validator = InputValidator::strict(args.strict || config.strict_quality);

    let parsed = validator.validate_format_name(&format)?;
    let interpreted = validator.validate_quality(&parsed, &quality)?;
    info!("Format '{}' with quality {:?}", parsed, interpreted);

    if args.selector_only {
        println!("{}", FormatResolver::selector_for(&parsed, &quality));
        return Ok(());
    }

    let base = match &args.options {
        Some(raw) => config.base_options.merged_with(&read_options(raw)?)?,
        None => config.base_options.clone(),
    };
    validator.validate_options(&base)?;

    let request = dl_formats::build_request(Some(format.as_str()), &quality, &base)?;
    let output = if args.pretty {
        serde_json::to_string_pretty(&request)?
    } else {
        serde_json::to_string(&request)?
    };
    println!("{}", output);
    Ok(())
}

fn read_options(raw: &str) -> Result<DownloadOptions> {
    let json = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {}", path))?,
        None => raw.to_string(),
    };
    DownloadOptions::from_json_str(&json).context("options must be a JSON object")
}
