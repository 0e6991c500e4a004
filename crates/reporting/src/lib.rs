//! Report assembly and rendering for decomposition results — currency
//! formatting, ranked bar charts, and text/CSV/HTML/JSON export.

pub mod chart;
pub mod format;
pub mod report;

pub use chart::{build_chart, ChartBar, Direction};
pub use report::{ExportFormat, ImpactReport, ImpactReportBuilder};
