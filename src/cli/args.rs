use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tempdash")]
#[command(about = "Average temperature of countries from 1901 - 2022: line, bar and map charts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the loading spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: tempdash.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "CSV URL or local path, overrides configuration [default: data/average_temperature_1901_2022.csv]"
    )]
    pub source: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the three charts for one year range and country
    Render {
        #[arg(long, help = "First year of the range [default: configured]")]
        start_year: Option<i32>,

        #[arg(long, help = "Last year of the range [default: configured]")]
        end_year: Option<i32>,

        #[arg(long, help = "Country for the line chart [default: configured or first]")]
        country: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(
            short,
            long,
            help = "Output path [default: stdout for json, output/temperature-dashboard-{YYMMDD}.html for html]"
        )]
        output: Option<PathBuf>,
    },

    /// Answer line-delimited JSON requests from stdin on stdout
    Serve,

    /// List the country dropdown options
    Countries,

    /// Summarise the loaded dataset
    Info {
        #[arg(long, default_value = "10")]
        sample: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Html,
}
