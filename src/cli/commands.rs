use crate::analyzers::DatasetAnalyzer;
use crate::charts::theme;
use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::dashboard::{render_html, serve_lines, Dashboard};
use crate::error::Result;
use crate::models::RequestOverrides;
use crate::utils::filename::generate_default_html_filename;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tokio::io::BufReader;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        settings = settings.with_data_source(source);
    }

    // stdout carries the protocol in serve mode
    let silent = cli.quiet || matches!(cli.command, Commands::Serve);
    let progress = ProgressReporter::new_spinner("Loading temperature data...", silent);
    let dashboard = Dashboard::load(settings, Some(&progress)).await?;

    match cli.command {
        Commands::Render {
            start_year,
            end_year,
            country,
            format,
            output,
        } => {
            let overrides = RequestOverrides {
                start_year,
                end_year,
                country,
            };
            let request = overrides.apply(dashboard.default_request());
            let response = dashboard.handle(&request)?;

            match format {
                OutputFormat::Json => {
                    let body = serde_json::to_string_pretty(&response)?;
                    match output {
                        Some(path) => write_output(&path, &body)?,
                        None => println!("{}", body),
                    }
                }
                OutputFormat::Html => {
                    let dark = theme::is_dark(&dashboard.settings().theme);
                    let page = render_html(&response, &dashboard.country_options(), dark)?;
                    let path = output.unwrap_or_else(generate_default_html_filename);
                    write_output(&path, &page)?;
                    progress.println(&format!("Dashboard written to {}", path.display()));
                }
            }
        }

        Commands::Serve => {
            let stdin = BufReader::new(tokio::io::stdin());
            let handled = serve_lines(&dashboard, stdin, tokio::io::stdout()).await?;
            info!(handled, "Serve loop finished");
        }

        Commands::Countries => {
            for country in dashboard.country_options() {
                println!("{}", country);
            }
        }

        Commands::Info { sample } => {
            let table = dashboard.table();
            let stats = DatasetAnalyzer::new().analyze(table)?;

            println!("Data source: {}", dashboard.settings().data_source);
            println!("\n{}", stats.detailed_summary());

            if sample > 0 {
                println!("\nSample Records (showing {} records):", sample.min(table.len()));
                for (i, record) in table.iter().take(sample).enumerate() {
                    println!(
                        "{}. {} in {}: min={:.1}°C, avg={:.1}°C, max={:.1}°C",
                        i + 1,
                        record.country,
                        record.year,
                        record.min_temp,
                        record.avg_temp,
                        record.max_temp
                    );
                }
            }
        }
    }

    Ok(())
}

fn write_output(path: &Path, body: &str) -> Result<()> {
    // Create output directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, body)?;
    info!(path = %path.display(), bytes = body.len(), "Wrote output");
    Ok(())
}
