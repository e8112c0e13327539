//! Report generation port trait.

use crate::domain::error::LabeltraderError;
use crate::domain::simulator::SimulationReport;
use std::path::Path;

/// Port for exporting simulation results.
pub trait ReportPort {
    fn write(
        &self,
        ticker: &str,
        report: &SimulationReport,
        output_path: &Path,
    ) -> Result<(), LabeltraderError>;
}
