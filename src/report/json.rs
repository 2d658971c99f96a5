use crate::types::appraisal::AppraisalReport;

pub fn to_json(report: &AppraisalReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
