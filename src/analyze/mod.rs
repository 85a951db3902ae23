pub mod analyzer;
mod model;

pub use analyzer::ReporterAggregator;
pub use model::ReporterSummary;
