pub mod temperature_loader;

pub use temperature_loader::{decode_source, parse_year, TemperatureLoader};
