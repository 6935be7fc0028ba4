//! Human-readable run summaries on stdout.

use postwatch_analysis::charts::{ChartRenderer, TextChartRenderer};
use postwatch_analysis::features::RepairStats;
use postwatch_analysis::AnalysisReport;
use postwatch_core::errors::PipelineError;

pub fn print_repairs(repairs: &RepairStats) {
    println!(
        "Repaired cells: {} timestamps, {} sentiment scores, {} source links, {} counts",
        repairs.timestamps_repaired, repairs.sentiment_filled, repairs.links_filled, repairs.counts_filled
    );
}

pub fn print_report(report: &AnalysisReport) -> Result<(), PipelineError> {
    if let Some(repairs) = &report.repairs {
        print_repairs(repairs);
    }
    println!(
        "Posts: {}  anomalies: {}  misinformation: {}",
        report.rows, report.anomalies, report.misinformation
    );
    for (rule, hits) in &report.rule_hits {
        println!("  {rule:<20}{hits:>6}");
    }
    if let Some(m) = &report.evaluation {
        println!(
            "Against ground truth: precision {:.3}  recall {:.3}  accuracy {:.3}  (tp {} fp {} tn {} fn {})",
            m.precision(),
            m.recall(),
            m.accuracy(),
            m.true_positives,
            m.false_positives,
            m.true_negatives,
            m.false_negatives
        );
    }
    println!();
    print!("{}", TextChartRenderer.render(&report.charts)?);
    Ok(())
}
