use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::config::ChartSettings;
use crate::dte::Receipt;

/// Line chart payload: one labeled point per receipt
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// (label, value) pairs of the single series
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        let values = self.datasets.first().map(|d| d.data.as_slice()).unwrap_or(&[]);
        self.labels.iter().map(String::as_str).zip(values.iter().copied())
    }
}

/// Build the chart series from the type+month filtered receipts.
///
/// Points follow input order unless `sort_by_date` is set, in which case
/// they are stably sorted by emission date.
pub fn chart_series(receipts: &[&Receipt], settings: &ChartSettings) -> ChartData {
    let mut points: Vec<&Receipt> = receipts.to_vec();
    if settings.sort_by_date {
        points.sort_by_key(|r| r.emission_date);
    }

    ChartData {
        labels: points.iter().map(|r| r.emission_date.to_string()).collect(),
        datasets: vec![Dataset {
            label: settings.label.clone(),
            data: points
                .iter()
                .map(|r| r.total_payable.to_f64().unwrap_or_default())
                .collect(),
            border_color: settings.border_color.clone(),
            background_color: settings.background_color.clone(),
            fill: false,
        }],
    }
}

/// Tooltip text for a point value
pub fn tooltip_label(value: f64) -> String {
    format!("Total a Pagar: {value}")
}
