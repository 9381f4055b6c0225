use chrono::{Datelike, Local};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_OUTPUT_DIR;

/// Default page path: output/temperature-dashboard-{YYMMDD}.html
pub fn generate_default_html_filename() -> PathBuf {
    generate_default_filename("html")
}

fn generate_default_filename(extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!(
        "temperature-dashboard-{:02}{:02}{:02}.{}",
        year, month, day, extension
    );
    PathBuf::from(DEFAULT_OUTPUT_DIR).join(filename)
}
