pub mod country_aggregator;
pub mod filter_engine;

pub use country_aggregator::{CountryAggregator, CountryMean};
pub use filter_engine::FilterEngine;
