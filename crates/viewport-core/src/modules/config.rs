use std::fs;
use std::path::Path;
use tracing::info;
use viewport_types::{ConfigError, ViewportOptions, ViewportOptionsOverride};

/// Merge `patch` over `base`.
///
/// Present top-level fields replace the base ones; `cookie` merges field by field.
pub fn extend_options(base: &ViewportOptions, patch: &ViewportOptionsOverride) -> ViewportOptions {
    base.extend(patch)
}

/// Parse an options override document and merge it over the defaults.
pub fn parse_options(content: &str) -> Result<ViewportOptions, ConfigError> {
    let patch: ViewportOptionsOverride =
        serde_json::from_str(content).map_err(|e| ConfigError::from_json_error(&e))?;

    let options = extend_options(&ViewportOptions::default(), &patch);
    options.validate()?;
    Ok(options)
}

/// Load options from a JSON override file.
pub fn load_options(path: &Path) -> Result<ViewportOptions, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    let options = parse_options(&content)?;
    info!("[config] loaded {} breakpoints from {}", options.breakpoints.len(), path.display());
    Ok(options)
}

/// Load options from `path`, or the defaults when no path is given.
pub fn load_options_or_default(path: Option<&Path>) -> Result<ViewportOptions, ConfigError> {
    match path {
        Some(path) => load_options(path),
        None => Ok(ViewportOptions::default()),
    }
}
