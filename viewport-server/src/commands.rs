use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use viewport_core::{load_options, BreakpointDetector, DetectInput, LazyClassifier};
use viewport_types::{RequestHeaders, ViewportOptions};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderArgError {
    #[error("Header argument {0:?} must look like NAME=VALUE")]
    MissingSeparator(String),

    #[error("Header argument {0:?} has an empty name")]
    EmptyName(String),
}

/// Split a `NAME=VALUE` argument on the first `=`.
pub fn parse_header_arg(raw: &str) -> Result<(String, String), HeaderArgError> {
    let (name, value) =
        raw.split_once('=').ok_or_else(|| HeaderArgError::MissingSeparator(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(HeaderArgError::EmptyName(raw.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

pub async fn handle_detect(
    options: &ViewportOptions,
    classifier_timeout: Duration,
    user_agent: Option<String>,
    cookie: Option<String>,
    header_args: &[String],
) -> Result<()> {
    let mut headers = RequestHeaders::new();
    for raw in header_args {
        let (name, value) = parse_header_arg(raw)?;
        headers.insert(&name, value);
    }

    let mut input = DetectInput::new();
    if !headers.is_empty() {
        input = input.with_headers(headers);
    }
    if let Some(user_agent) = user_agent {
        input = input.with_user_agent(user_agent);
    }
    if let Some(cookie) = cookie {
        input = input.with_cookie(cookie);
    }

    let detector =
        BreakpointDetector::new(LazyClassifier::default()).with_timeout(classifier_timeout);
    let breakpoint = detector.detect(options, &input).await;

    println!("{}", breakpoint);
    Ok(())
}

pub fn handle_queries(options: &ViewportOptions, json: bool) -> Result<()> {
    let queries =
        viewport_core::build_queries(&options.breakpoints, options.feature, options.boundary_delta);

    if json {
        println!("{}", serde_json::to_string_pretty(&queries)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Breakpoint", "Width", "Media query"]);

    for (name, range) in queries.iter() {
        let name_cell = if name == options.fallback_breakpoint {
            Cell::new(format!("{name} (fallback)")).fg(Color::Green)
        } else {
            Cell::new(name)
        };
        table.add_row(vec![name_cell, Cell::new(range.size), Cell::new(&range.media_query)]);
    }

    println!("{table}");
    println!("\n{} breakpoints, feature {}", queries.len(), options.feature);
    Ok(())
}

pub fn handle_validate(config: Option<&Path>) -> Result<()> {
    let Some(path) = config else {
        anyhow::bail!("No options file given; pass --config or set VIEWPORT_CONFIG");
    };

    match load_options(path) {
        Ok(options) => {
            println!(
                "{} {} is valid ({} breakpoints, fallback {})",
                "✓".green(),
                path.display(),
                options.breakpoints.len(),
                options.fallback_breakpoint
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}: {}", "✗".red(), path.display(), e);
            Err(e.into())
        }
    }
}
