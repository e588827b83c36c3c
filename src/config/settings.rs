use serde::{Deserialize, Serialize};

use crate::view::DEFAULT_PAGE_SIZE;

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub view: ViewSettings,
    pub chart: ChartSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ViewSettings {
    pub page_size: usize,
    /// Go back to the first data page whenever a filter changes
    pub reset_page_on_filter: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            reset_page_on_filter: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartSettings {
    pub label: String,
    pub border_color: String,
    pub background_color: String,
    /// Order points by emission date instead of insertion order
    pub sort_by_date: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            label: "Total a Pagar".to_string(),
            border_color: "rgba(75, 192, 192, 1)".to_string(),
            background_color: "rgba(75, 192, 192, 0.2)".to_string(),
            sort_by_date: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    pub output_dir: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
        }
    }
}
