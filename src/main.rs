mod cli;
mod errors;
mod handlers;
mod state;
mod ui;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use crossmap_core::MapOptions;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputFormat};
use errors::map_dataset_load_error;
use handlers::criteria_from_args;
use state::{AppState, QueryResponse};
use ui::{format_facet_definitions, render_html_page, render_text_report, HtmlOptions};

fn main() {
    let cli = Cli::parse();
    init_logging();

    let state = AppState::load(
        &cli.file,
        MapOptions {
            unknown_name: cli.unknown_name.clone(),
        },
    )
    .unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to load dataset");
        let (title, message, details) = map_dataset_load_error(&err, &cli.file);
        eprintln!("{} {}", title.red().bold(), message);
        eprintln!("\n{}", details);
        process::exit(1);
    });
    tracing::debug!(
        path = %state.source().display(),
        crossings = state.dataset().len(),
        facets = state.facets().len(),
        "dataset ready"
    );

    if let Err(err) = run(&cli, &state) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        process::exit(1);
    }
}

/// Install a stderr subscriber; stdout is reserved for the report
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: &Cli, state: &AppState) -> anyhow::Result<()> {
    if cli.list_facets {
        return write_output(cli.output.as_deref(), &format_facet_definitions(state.facets()));
    }

    let request = criteria_from_args(&cli.filter);
    for rejected in &request.rejected {
        eprintln!(
            "{} Ignoring facet filter '{}'. Expected 'name=value' with name one of line, branch, location, type",
            "Warning:".yellow().bold(),
            rejected
        );
    }

    let response = state.query(&request.criteria);

    let rendered = match cli.format {
        OutputFormat::Text => render_text_report(&request.criteria, &response),
        OutputFormat::Json => render_json(&response)?,
        OutputFormat::Html => {
            let options = HtmlOptions {
                zoom: cli.zoom,
                ..Default::default()
            };
            render_html_page(&request.criteria, &response, &options)
                .context("failed to serialize map payload")?
        }
    };

    write_output(cli.output.as_deref(), &rendered)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    count: usize,
    facets: &'a [crossmap_core::FacetDefinition],
    map: Option<&'a crossmap_core::MapPayload>,
}

fn render_json(response: &QueryResponse<'_>) -> anyhow::Result<String> {
    let report = JsonReport {
        count: response.count(),
        facets: response.facets,
        map: response.map.as_ref(),
    };
    let mut json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    json.push('\n');
    Ok(json)
}

fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            tracing::info!(path = %path.display(), bytes = contents.len(), "wrote report");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}
