use crate::types::appraisal::{AppraisalReport, AppraisalResult, ReviewerContribution};

const RULE_WIDTH: usize = 60;
const CONTRIBUTION_RULE_WIDTH: usize = 40;

pub fn to_markdown(report: &AppraisalReport) -> String {
    let mut output = String::new();
    if report.results.is_empty() {
        output.push_str("No appraisal data available yet.\n");
        return output;
    }

    output.push_str("# Final Appraisal Breakdown\n\n");
    output.push_str(&format!("Similarity mode: {}\n", report.similarity_mode));
    output.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));

    for result in &report.results {
        push_result(&mut output, report, result);
    }

    output
}

fn push_result(output: &mut String, report: &AppraisalReport, result: &AppraisalResult) {
    output.push_str(&format!("\nReviewee ID: {}\n", result.employee.code));
    output.push_str(&format!("Reviewee Name: {}\n", result.employee.name));
    output.push_str(&format!("Status       : {}\n", result.status.label()));
    output.push_str(&format!("Verdict      : {}\n\n", result.verdict.label()));

    output.push_str("Objective Scores:\n");
    for (category, score) in report
        .categories
        .iter()
        .zip(result.objective_scores.values())
    {
        output.push_str(&format!("  {:<18}: {}\n", category, score));
    }
    output.push_str(&format!(
        "\nMean Objective Score     : {:.2}\n\n",
        result.objective_mean
    ));

    output.push_str("Peer Review Contributions:\n");
    if result.contributions.is_empty() {
        output.push_str("  none\n");
    }
    for contribution in &result.contributions {
        push_contribution(output, report, contribution);
    }

    output.push_str(&format!(
        "\nWeighted Peer Avg Score  : {:.2}\n",
        result.weighted_peer_avg
    ));
    output.push_str(&format!(
        "Final Score Calculation  : ({} * {:.2} + {} * {:.2}) / {}\n",
        report.objective_weight,
        result.objective_mean,
        report.peer_weight,
        result.weighted_peer_avg,
        report.scale
    ));
    output.push_str(&format!("Final Score (0-1)        : {:.2}\n", result.final_score));
    output.push_str(&format!(
        "Threshold                : {:.2}\n",
        report.approval_threshold
    ));
    output.push_str(&format!("Verdict                 : {}\n", result.verdict.label()));
    output.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
}

fn push_contribution(
    output: &mut String,
    report: &AppraisalReport,
    contribution: &ReviewerContribution,
) {
    output.push_str(&format!(
        "  Reviewer ID            : {}\n",
        contribution.reviewer.code
    ));
    output.push_str(&format!(
        "  Reviewer Name          : {}\n",
        contribution.reviewer.name
    ));
    output.push_str(&format!(
        "  Credibility Weight     : {:.3}\n",
        contribution.weight
    ));
    output.push_str(&format!(
        "  Reviewer Avg Rating    : {:.2}\n",
        contribution.avg_rating
    ));
    output.push_str("  Ratings by Category:\n");
    for (category, rating) in report
        .categories
        .iter()
        .zip(contribution.ratings.values())
    {
        output.push_str(&format!("    {:<18}: {}\n", category, rating));
    }
    output.push_str(&format!("{}\n", "-".repeat(CONTRIBUTION_RULE_WIDTH)));
}
