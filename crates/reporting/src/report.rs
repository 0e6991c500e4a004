//! Impact report document — assembled once from a decomposition result,
//! then rendered to text, CSV, HTML, or JSON.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use revlens_core::config::ReportConfig;
use revlens_core::error::RevlensResult;
use revlens_core::types::{Factor, ImpactResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chart::{build_chart, ChartBar, Direction};
use crate::format::{format_currency, format_percent};

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Json,
    Csv,
    Html,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// One line of the detailed breakdown, already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub value: String,
}

/// Renderable report document. Self-contained: every renderer works from
/// these fields alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub currency_symbol: String,
    pub revenue_old: f64,
    pub revenue_new: f64,
    pub difference_observed: f64,
    pub difference_explained: f64,
    pub model_quality: f64,
    /// Bars ranked by descending absolute impact.
    pub chart: Vec<ChartBar>,
    /// Headline figures plus the five factors in declaration order.
    pub breakdown: Vec<BreakdownLine>,
}

/// Builds [`ImpactReport`] documents with a fixed currency prefix and
/// chart width.
pub struct ImpactReportBuilder {
    currency_symbol: String,
    chart_width: usize,
}

impl ImpactReportBuilder {
    pub fn new(currency_symbol: impl Into<String>, chart_width: usize) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            chart_width,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.currency_symbol.clone(), config.chart_width)
    }

    pub fn build(&self, result: &ImpactResult) -> ImpactReport {
        let currency = |amount: f64| format_currency(&self.currency_symbol, amount);

        let mut breakdown = vec![
            BreakdownLine {
                label: "Old Revenue".to_string(),
                value: currency(result.revenue_old),
            },
            BreakdownLine {
                label: "New Revenue".to_string(),
                value: currency(result.revenue_new),
            },
            BreakdownLine {
                label: "Observed Difference".to_string(),
                value: currency(result.difference_observed),
            },
            BreakdownLine {
                label: "Explained Difference".to_string(),
                value: currency(result.difference_explained),
            },
        ];
        for factor in Factor::ALL {
            breakdown.push(BreakdownLine {
                label: factor.label().to_string(),
                value: currency(result.impact(factor)),
            });
        }

        ImpactReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            currency_symbol: self.currency_symbol.clone(),
            revenue_old: result.revenue_old,
            revenue_new: result.revenue_new,
            difference_observed: result.difference_observed,
            difference_explained: result.difference_explained,
            model_quality: result.model_quality,
            chart: build_chart(result, self.chart_width),
            breakdown,
        }
    }
}

impl ImpactReport {
    /// Render in the requested format.
    pub fn render(&self, format: ExportFormat) -> RevlensResult<String> {
        match format {
            ExportFormat::Text => Ok(self.to_text()),
            ExportFormat::Csv => Ok(self.to_csv()),
            ExportFormat::Html => Ok(self.to_html()),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Plain-text report: headline metrics, ranked bar chart, detailed
    /// breakdown.
    pub fn to_text(&self) -> String {
        let currency = |amount: f64| format_currency(&self.currency_symbol, amount);
        let mut out = String::new();

        out.push_str("Revenue Impact Report\n");
        out.push_str("=====================\n");
        out.push_str(&format!("{:<16}{}\n", "Old Revenue:", currency(self.revenue_old)));
        out.push_str(&format!("{:<16}{}\n", "New Revenue:", currency(self.revenue_new)));
        out.push_str(&format!(
            "{:<16}{}\n",
            "Difference:",
            currency(self.difference_observed)
        ));
        out.push_str(&format!(
            "{:<16}{}\n",
            "Model Quality:",
            format_percent(self.model_quality)
        ));

        out.push_str("\nImpact by Factor\n");
        out.push_str("----------------\n");
        let label_width = self
            .chart
            .iter()
            .map(|bar| bar.label.len())
            .max()
            .unwrap_or(0);
        for bar in &self.chart {
            let marker = match bar.direction {
                Direction::Gain => "[+]",
                Direction::Loss => "[-]",
            };
            out.push_str(&format!(
                "{:<label_width$}  {} {} {}\n",
                bar.label,
                marker,
                "\u{2588}".repeat(bar.width),
                currency(bar.amount)
            ));
        }

        out.push_str("\nDetailed Calculations\n");
        out.push_str("---------------------\n");
        for line in &self.breakdown {
            out.push_str(&format!("{}: {}\n", line.label, line.value));
        }

        out
    }

    /// CSV export: ranked factor rows followed by the summary figures.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("label,amount\n");
        for bar in &self.chart {
            csv.push_str(&format!("\"{}\",{:.2}\n", bar.label, bar.amount));
        }
        csv.push_str(&format!("\"Old Revenue\",{:.2}\n", self.revenue_old));
        csv.push_str(&format!("\"New Revenue\",{:.2}\n", self.revenue_new));
        csv.push_str(&format!(
            "\"Observed Difference\",{:.2}\n",
            self.difference_observed
        ));
        csv.push_str(&format!(
            "\"Explained Difference\",{:.2}\n",
            self.difference_explained
        ));
        csv.push_str(&format!("\"Model Quality\",{:.1}\n", self.model_quality));
        csv
    }

    /// Self-contained HTML report: headline cards, green/red bar chart,
    /// expandable breakdown.
    pub fn to_html(&self) -> String {
        let currency = |amount: f64| format_currency(&self.currency_symbol, amount);
        let delta_class = if self.difference_observed > 0.0 {
            "gain"
        } else {
            "loss"
        };

        let mut rows = String::new();
        let max_width = self.chart.first().map(|bar| bar.width).unwrap_or(0);
        for bar in &self.chart {
            let pct = if max_width > 0 {
                bar.width * 100 / max_width
            } else {
                0
            };
            let class = match bar.direction {
                Direction::Gain => "gain",
                Direction::Loss => "loss",
            };
            rows.push_str(&format!(
                "<div class=\"row\"><span class=\"label\">{}</span>\
                 <div class=\"track\"><div class=\"bar {}\" style=\"width:{}%\"></div></div>\
                 <span class=\"amount\">{}</span></div>\n",
                bar.label,
                class,
                pct,
                currency(bar.amount)
            ));
        }

        let mut items = String::new();
        for line in &self.breakdown {
            items.push_str(&format!("<li>{}: {}</li>\n", line.label, line.value));
        }

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Revenue Impact Report</title>\n<style>\n");
        html.push_str(REPORT_STYLE);
        html.push_str("</style>\n</head>\n<body>\n<h1>Revenue Impact Report</h1>\n");
        html.push_str(&format!(
            "<section class=\"cards\">\n\
             <div class=\"card\"><h2>Old Revenue</h2><p>{}</p></div>\n\
             <div class=\"card\"><h2>New Revenue</h2><p>{}</p>\
             <p class=\"delta {}\">{}</p></div>\n\
             <div class=\"card\"><h2>Model Quality</h2><p>{}</p></div>\n\
             </section>\n",
            currency(self.revenue_old),
            currency(self.revenue_new),
            delta_class,
            currency(self.difference_observed),
            format_percent(self.model_quality)
        ));
        html.push_str("<h2>Impact by Factor</h2>\n<section class=\"chart\">\n");
        html.push_str(&rows);
        html.push_str("</section>\n<details>\n<summary>Detailed Calculations</summary>\n<ul>\n");
        html.push_str(&items);
        html.push_str("</ul>\n</details>\n");
        html.push_str(&format!(
            "<footer>Report {} · generated {}</footer>\n</body>\n</html>\n",
            self.report_id,
            self.generated_at.to_rfc3339()
        ));
        html
    }
}

const REPORT_STYLE: &str = "\
body { font-family: sans-serif; max-width: 720px; margin: 2rem auto; color: #222; }
.cards { display: flex; gap: 1rem; }
.card { flex: 1; border: 1px solid #ddd; border-radius: 8px; padding: 1rem; }
.card h2 { margin: 0; font-size: 0.85rem; color: #666; }
.card p { margin: 0.25rem 0 0; font-size: 1.4rem; }
.card .delta { font-size: 0.9rem; }
.delta.gain { color: #2e7d32; }
.delta.loss { color: #c62828; }
.chart .row { display: flex; align-items: center; gap: 0.5rem; margin: 0.3rem 0; }
.chart .label { width: 7rem; }
.chart .track { flex: 1; background: #f2f2f2; border-radius: 4px; }
.chart .bar { height: 1.1rem; border-radius: 4px; }
.bar.gain { background: #2e7d32; }
.bar.loss { background: #c62828; }
.chart .amount { width: 7rem; text-align: right; font-variant-numeric: tabular-nums; }
details { margin-top: 1.5rem; }
footer { margin-top: 2rem; font-size: 0.8rem; color: #888; }
";

#[cfg(test)]
mod tests {
    use super::*;
    use revlens_core::types::SnapshotPair;
    use revlens_engine::compute;

    fn demo_report() -> ImpactReport {
        let pair = SnapshotPair::demo();
        let result = compute(&pair.old, &pair.new);
        ImpactReportBuilder::new("$", 40).build(&result)
    }

    #[test]
    fn test_breakdown_order_and_formatting() {
        let report = demo_report();
        let labels: Vec<&str> = report.breakdown.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Old Revenue",
                "New Revenue",
                "Observed Difference",
                "Explained Difference",
                "Impressions",
                "CPM",
                "IAP Price",
                "IAP Sales",
                "IAP Refund",
            ]
        );
        assert_eq!(report.breakdown[0].value, "$1,975.00");
        assert_eq!(report.breakdown[2].value, "$-1,285.00");
        assert_eq!(report.breakdown[5].value, "$-1,050.00");
    }

    #[test]
    fn test_text_report_contents() {
        let report = demo_report();
        let text = report.to_text();

        assert!(text.starts_with("Revenue Impact Report"));
        assert!(text.contains("Old Revenue:    $1,975.00"));
        assert!(text.contains("Model Quality:  100.0%"));
        for label in ["Impressions", "CPM", "IAP Price", "IAP Sales", "IAP Refund"] {
            assert!(text.contains(label), "missing factor label {label}");
        }
        // Chart rows come before the detailed section, ranked by magnitude.
        let chart_start = text.find("Impact by Factor").unwrap();
        let cpm_row = text[chart_start..].find("CPM").unwrap();
        let impressions_row = text[chart_start..].find("Impressions").unwrap();
        assert!(cpm_row < impressions_row);
    }

    #[test]
    fn test_csv_report_shape() {
        let report = demo_report();
        let csv = report.to_csv();

        assert!(csv.starts_with("label,amount\n"));
        assert_eq!(csv.lines().count(), 11); // header + 5 factors + 5 summary rows
        assert!(csv.contains("\"CPM\",-1050.00"));
        assert!(csv.contains("\"Model Quality\",100.0"));
    }

    #[test]
    fn test_html_report_contents() {
        let report = demo_report();
        let html = report.to_html();

        assert!(html.contains("<title>Revenue Impact Report</title>"));
        assert!(html.contains("class=\"bar loss\" style=\"width:100%\""));
        assert!(html.contains("class=\"bar gain\""));
        assert!(html.contains("<details>"));
        assert!(html.contains("IAP Refund: $-35.00"));
    }

    #[test]
    fn test_json_render_round_trips() {
        let report = demo_report();
        let json = report.render(ExportFormat::Json).unwrap();
        let back: ImpactReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.report_id, report.report_id);
        assert_eq!(back.chart, report.chart);
        assert_eq!(back.breakdown, report.breakdown);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("HTML".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
