//! Terminal presentation
//!
//! Renders artifact load outcomes and prediction results, either as colored
//! tables or as JSON. Every prediction value shown here is rounded to 2
//! decimal places.

use crate::form::{Field, Form};
use clap::ValueEnum;
use colored::Colorize;
use profit_lib::{ArtifactReport, ArtifactStatus, ModelPrediction, PredictionReport};
use tabled::{settings::Style, Table, Tabled};

/// Output format for the presenter
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Artifact")]
    artifact: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Render the load outcome of all five artifacts.
pub fn render_statuses(reports: &[ArtifactReport], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(reports) {
                println!("{}", json);
            }
        }
        OutputFormat::Table => {
            let rows: Vec<StatusRow> = reports
                .iter()
                .map(|r| StatusRow {
                    artifact: r.name.to_string(),
                    file: r.file.to_string(),
                    status: color_status(r.status),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
}

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Predicted Profit (USD)")]
    profit: String,
}

/// Render one prediction pass: a 2-decimal USD value per available model,
/// or a "not loaded" notice for the rest.
pub fn render_predictions(report: &PredictionReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let rounded: Vec<ModelPrediction> = report
                .predictions
                .iter()
                .map(|p| ModelPrediction {
                    model: p.model,
                    value: p.rounded(),
                })
                .collect();
            let json = serde_json::json!({
                "generated_at": report.generated_at,
                "predictions": rounded,
            });
            if let Ok(text) = serde_json::to_string_pretty(&json) {
                println!("{}", text);
            }
        }
        OutputFormat::Table => {
            let rows: Vec<PredictionRow> = report
                .predictions
                .iter()
                .map(|p| PredictionRow {
                    model: p.model.to_string(),
                    profit: match p.rounded() {
                        Some(value) => format_usd(value).green().to_string(),
                        None => "model not loaded".yellow().to_string(),
                    },
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Render the current form state.
pub fn render_form(form: &Form, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(form.metrics()) {
                println!("{}", json);
            }
        }
        OutputFormat::Table => {
            let rows: Vec<FieldRow> = Field::ALL
                .iter()
                .map(|&field| FieldRow {
                    field: field.key().to_string(),
                    name: field.label().to_string(),
                    value: form.value(field),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
}

/// List the editable field keys.
pub fn render_fields() {
    for field in Field::ALL {
        println!("  {:<14} {}", field.key(), field.label());
    }
}

pub fn render_help() {
    println!("Commands:");
    println!("  set <field> <value>   edit one metric (see 'fields')");
    println!("  show                  display the current metrics");
    println!("  fields                list editable fields");
    println!("  predict               run every available model");
    println!("  reset                 restore all defaults");
    println!("  quit                  exit");
}

/// Format a profit value as USD with exactly 2 decimal places.
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn color_status(status: ArtifactStatus) -> String {
    match status {
        ArtifactStatus::Loaded => "loaded".green().to_string(),
        ArtifactStatus::Missing => "missing".yellow().to_string(),
        ArtifactStatus::Invalid => "invalid".red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_two_decimals() {
        assert_eq!(format_usd(1042.989), "$1042.99");
        assert_eq!(format_usd(7.0), "$7.00");
        assert_eq!(format_usd(-3.141), "$-3.14");
    }
}
