//! Core data model
//!
//! The 12 business metrics the form collects, in the exact order the
//! artifacts were trained on. That order is a silent contract with the
//! training pipeline; nothing at runtime can verify it.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Number of input features expected by the artifacts.
pub const FEATURE_COUNT: usize = 12;

/// Display names for the input features, in training order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Delay (Minutes)",
    "Aircraft Utilization (Hours/Day)",
    "Turnaround Time (Minutes)",
    "Load Factor (%)",
    "Fleet Availability (%)",
    "Maintenance Downtime (Hours)",
    "Fuel Efficiency (ASK)",
    "Revenue (USD)",
    "Operating Cost (USD)",
    "Ancillary Revenue (USD)",
    "Debt-to-Equity Ratio",
    "Departure Month",
];

/// Valid range for the departure month field.
pub const MONTH_MIN: u32 = 1;
pub const MONTH_MAX: u32 = 12;

/// One snapshot of the business metrics form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessMetrics {
    pub delay_minutes: f64,
    pub aircraft_utilization: f64,
    pub turnaround_minutes: f64,
    pub load_factor: f64,
    pub fleet_availability: f64,
    pub maintenance_downtime: f64,
    pub fuel_efficiency: f64,
    pub revenue: f64,
    pub operating_cost: f64,
    pub ancillary_revenue: f64,
    pub debt_to_equity: f64,
    pub departure_month: u32,
}

impl Default for BusinessMetrics {
    fn default() -> Self {
        Self {
            delay_minutes: 0.0,
            aircraft_utilization: 0.0,
            turnaround_minutes: 0.0,
            load_factor: 0.0,
            fleet_availability: 0.0,
            maintenance_downtime: 0.0,
            fuel_efficiency: 0.0,
            revenue: 0.0,
            operating_cost: 0.0,
            ancillary_revenue: 0.0,
            debt_to_equity: 0.0,
            departure_month: MONTH_MIN,
        }
    }
}

impl BusinessMetrics {
    /// The ordered feature vector, rebuilt fresh on every call.
    pub fn to_vector(&self) -> Array1<f64> {
        Array1::from_vec(vec![
            self.delay_minutes,
            self.aircraft_utilization,
            self.turnaround_minutes,
            self.load_factor,
            self.fleet_availability,
            self.maintenance_downtime,
            self.fuel_efficiency,
            self.revenue,
            self.operating_cost,
            self.ancillary_revenue,
            self.debt_to_equity,
            f64::from(self.departure_month),
        ])
    }
}

/// Round a prediction for display. Every rendered prediction goes through
/// this, regardless of the model's underlying precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One regressor's outcome for a single predict trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPrediction {
    pub model: &'static str,
    /// `None` when the regressor was unavailable or its inference failed.
    pub value: Option<f64>,
}

impl ModelPrediction {
    /// The display value, rounded to 2 decimal places.
    pub fn rounded(&self) -> Option<f64> {
        self.value.map(round2)
    }
}

/// All model outcomes for a single predict trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub predictions: Vec<ModelPrediction>,
    pub generated_at: i64,
}
