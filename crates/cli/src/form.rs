//! Interactive metrics form
//!
//! Holds the current value of the 12 business metrics and parses the
//! commands of the input loop. Parsing is pure so it can be tested without
//! a terminal; every field is independently editable and there is no
//! cross-field validation.

use profit_lib::{BusinessMetrics, FEATURE_NAMES, MONTH_MAX, MONTH_MIN};
use thiserror::Error;

/// One editable form field, in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Delay,
    Utilization,
    Turnaround,
    LoadFactor,
    Availability,
    Downtime,
    Fuel,
    Revenue,
    Cost,
    Ancillary,
    DebtRatio,
    Month,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Delay,
        Field::Utilization,
        Field::Turnaround,
        Field::LoadFactor,
        Field::Availability,
        Field::Downtime,
        Field::Fuel,
        Field::Revenue,
        Field::Cost,
        Field::Ancillary,
        Field::DebtRatio,
        Field::Month,
    ];

    /// Short key used in `set` commands.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Delay => "delay",
            Field::Utilization => "utilization",
            Field::Turnaround => "turnaround",
            Field::LoadFactor => "load-factor",
            Field::Availability => "availability",
            Field::Downtime => "downtime",
            Field::Fuel => "fuel",
            Field::Revenue => "revenue",
            Field::Cost => "cost",
            Field::Ancillary => "ancillary",
            Field::DebtRatio => "debt-ratio",
            Field::Month => "month",
        }
    }

    /// Full display name, shared with the training-order contract.
    pub fn label(&self) -> &'static str {
        FEATURE_NAMES[*self as usize]
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: Field, value: String },
    Show,
    Fields,
    Predict,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}', type 'help' for the command list")]
    UnknownCommand(String),

    #[error("unknown field '{0}', type 'fields' for the field list")]
    UnknownField(String),

    #[error("usage: set <field> <value>")]
    MissingArgument,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut parts = line.split_whitespace();
        let command = parts.next().ok_or(CommandError::Empty)?;

        match command.to_lowercase().as_str() {
            "set" => {
                let key = parts.next().ok_or(CommandError::MissingArgument)?;
                let field =
                    Field::from_key(key).ok_or_else(|| CommandError::UnknownField(key.into()))?;
                let value = parts.next().ok_or(CommandError::MissingArgument)?;
                Ok(Command::Set {
                    field,
                    value: value.to_string(),
                })
            }
            "show" => Ok(Command::Show),
            "fields" => Ok(Command::Fields),
            "predict" => Ok(Command::Predict),
            "reset" => Ok(Command::Reset),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} expects a number (got '{raw}')")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("Departure Month must be an integer between 1 and 12 (got '{raw}')")]
    InvalidMonth { raw: String },
}

/// Current form state. Rebuilt vectors always reflect the latest edits.
#[derive(Debug, Default)]
pub struct Form {
    metrics: BusinessMetrics,
}

impl Form {
    pub fn metrics(&self) -> &BusinessMetrics {
        &self.metrics
    }

    pub fn reset(&mut self) {
        self.metrics = BusinessMetrics::default();
    }

    /// Parse and store one field edit. Invalid input leaves the field
    /// unchanged.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<(), FormError> {
        match field {
            Field::Month => {
                let month: u32 = raw.parse().map_err(|_| FormError::InvalidMonth {
                    raw: raw.to_string(),
                })?;
                if !(MONTH_MIN..=MONTH_MAX).contains(&month) {
                    return Err(FormError::InvalidMonth {
                        raw: raw.to_string(),
                    });
                }
                self.metrics.departure_month = month;
            }
            Field::Delay => self.metrics.delay_minutes = parse_number(field, raw)?,
            Field::Utilization => self.metrics.aircraft_utilization = parse_number(field, raw)?,
            Field::Turnaround => self.metrics.turnaround_minutes = parse_number(field, raw)?,
            Field::LoadFactor => self.metrics.load_factor = parse_number(field, raw)?,
            Field::Availability => self.metrics.fleet_availability = parse_number(field, raw)?,
            Field::Downtime => self.metrics.maintenance_downtime = parse_number(field, raw)?,
            Field::Fuel => self.metrics.fuel_efficiency = parse_number(field, raw)?,
            Field::Revenue => self.metrics.revenue = parse_number(field, raw)?,
            Field::Cost => self.metrics.operating_cost = parse_number(field, raw)?,
            Field::Ancillary => self.metrics.ancillary_revenue = parse_number(field, raw)?,
            Field::DebtRatio => self.metrics.debt_to_equity = parse_number(field, raw)?,
        }
        Ok(())
    }

    /// Display value for one field.
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Delay => format_metric(self.metrics.delay_minutes),
            Field::Utilization => format_metric(self.metrics.aircraft_utilization),
            Field::Turnaround => format_metric(self.metrics.turnaround_minutes),
            Field::LoadFactor => format_metric(self.metrics.load_factor),
            Field::Availability => format_metric(self.metrics.fleet_availability),
            Field::Downtime => format_metric(self.metrics.maintenance_downtime),
            Field::Fuel => format_metric(self.metrics.fuel_efficiency),
            Field::Revenue => format_metric(self.metrics.revenue),
            Field::Cost => format_metric(self.metrics.operating_cost),
            Field::Ancillary => format_metric(self.metrics.ancillary_revenue),
            Field::DebtRatio => format_metric(self.metrics.debt_to_equity),
            Field::Month => self.metrics.departure_month.to_string(),
        }
    }
}

fn parse_number(field: Field, raw: &str) -> Result<f64, FormError> {
    raw.parse().map_err(|_| FormError::InvalidNumber {
        field: field.label(),
        raw: raw.to_string(),
    })
}

fn format_metric(value: f64) -> String {
    format!("{:.2}", value)
}
