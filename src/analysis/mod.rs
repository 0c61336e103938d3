pub mod analyzer;
pub mod config;
pub mod insights;
pub mod report;

pub use analyzer::analyze;
pub use config::AnalysisConfig;
pub use report::{PatternKind, PatternReport};
