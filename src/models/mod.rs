pub mod request;
pub mod temperature;

pub use request::{DashboardRequest, RequestOverrides};
pub use temperature::{TemperatureRecord, TemperatureTable};
