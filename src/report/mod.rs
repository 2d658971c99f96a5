pub mod json;
pub mod md;

use crate::error::AppraisalError;
use crate::types::appraisal::AppraisalReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &AppraisalReport, format: OutputFormat) -> Result<String, AppraisalError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(AppraisalError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
