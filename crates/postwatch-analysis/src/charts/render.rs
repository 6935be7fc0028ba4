//! Chart renderers.

use std::fmt::Write as _;

use postwatch_core::errors::OutputError;

use super::data::{ChartData, TopSources};

/// Title shared by every rendering.
pub const REPORT_TITLE: &str = "Post Misinformation Analysis";

const BAR_WIDTH: usize = 40;

/// Turns chart data into a document.
pub trait ChartRenderer {
    fn name(&self) -> &str;

    fn render(&self, data: &ChartData) -> Result<String, OutputError>;
}

/// Pretty-printed JSON, for plotting tools.
pub struct JsonChartRenderer;

impl ChartRenderer for JsonChartRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, data: &ChartData) -> Result<String, OutputError> {
        serde_json::to_string_pretty(data).map_err(|e| OutputError::Serialization {
            what: "chart data".to_string(),
            message: e.to_string(),
        })
    }
}

/// Plain-text bar report for terminals.
pub struct TextChartRenderer;

impl ChartRenderer for TextChartRenderer {
    fn name(&self) -> &str {
        "text"
    }

    fn render(&self, data: &ChartData) -> Result<String, OutputError> {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = render_text(data, &mut out);
        Ok(out)
    }
}

fn render_text(data: &ChartData, out: &mut String) -> std::fmt::Result {
    writeln!(out, "{REPORT_TITLE}")?;
    writeln!(out, "{}", "=".repeat(REPORT_TITLE.len()))?;

    writeln!(out, "\nPost classification")?;
    let c = &data.classification;
    let max = c.legitimate.max(c.misinformation);
    bar(out, "Legitimate", c.legitimate, max)?;
    bar(out, "Misinformation", c.misinformation, max)?;

    writeln!(out, "\nSentiment distribution")?;
    let s = &data.sentiment;
    let total = s.positive + s.neutral + s.negative;
    for (label, count) in [
        ("Positive", s.positive),
        ("Neutral", s.neutral),
        ("Negative", s.negative),
    ] {
        let pct = if total == 0 {
            0.0
        } else {
            100.0 * count as f64 / total as f64
        };
        writeln!(out, "  {label:<16}{count:>6}  {pct:>5.1}%")?;
    }

    writeln!(out, "\nMisinformation over time (flagged / all)")?;
    for day in &data.daily {
        writeln!(out, "  {}  {:>5} / {:<5}", day.date, day.misinformation, day.total)?;
    }

    writeln!(out, "\nTop suspicious domains")?;
    match &data.top_sources {
        TopSources::Ranked { sources } => {
            let max = sources.first().map_or(0, |s| s.count);
            for s in sources {
                bar(out, &s.source, s.count, max)?;
            }
        }
        TopSources::Empty { message } => writeln!(out, "  {message}")?,
    }
    Ok(())
}

fn bar(out: &mut String, label: &str, count: usize, max: usize) -> std::fmt::Result {
    let len = if max == 0 { 0 } else { count * BAR_WIDTH / max };
    writeln!(out, "  {label:<24}{count:>6} {}", "#".repeat(len))
}
