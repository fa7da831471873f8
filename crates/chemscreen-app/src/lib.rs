//! chemscreen-app: owning screening context plus the JSON surface of the CLI.

pub mod context;
pub mod output;

pub use context::{AnalysisReport, Diagnostics, LibraryReport, ScreeningContext};
pub use output::{parse_records, Envelope};
