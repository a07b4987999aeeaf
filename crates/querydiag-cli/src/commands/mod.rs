pub mod locate;
pub mod normalize;

use anyhow::{Context, Result};
use querydiag::DiagnosticFormatter;
use querydiag_config::find_config;
use std::io::Read;
use std::path::Path;

/// Build the formatter from an explicit config path, a discovered config, or
/// the built-in defaults when neither exists.
pub fn load_formatter(config_path: Option<&Path>, locale: Option<&str>) -> Result<DiagnosticFormatter> {
    let config_path = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir()?;
        find_config(&current_dir).context("Failed to search for config")?
    };

    match config_path {
        Some(ref path) => {
            tracing::info!("Using diagnostics config at {:?}", path);
            DiagnosticFormatter::from_config_file(path, locale)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => {
            tracing::debug!("No diagnostics config found, using defaults");
            DiagnosticFormatter::from_config(&querydiag_config::DiagnosticsConfig::default(), locale)
                .context("Invalid diagnostics config")
        }
    }
}

/// Read query text from a file, or from stdin when the path is `-`
pub fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read query from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read query file {}", input.display()))
    }
}
