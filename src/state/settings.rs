use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::processing::crossings::CrossingStrategy;

/// One of the reported band parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum BandField {
    Barycenter,
    MaxPos,
    Fwhm,
    MaxVal,
}

impl BandField {
    /// Display order of a full report.
    pub const ALL: [BandField; 4] = [
        BandField::Barycenter,
        BandField::MaxPos,
        BandField::Fwhm,
        BandField::MaxVal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BandField::Barycenter => "barycenter",
            BandField::MaxPos => "max_pos",
            BandField::Fwhm => "fwhm",
            BandField::MaxVal => "max_val",
        }
    }

    /// Whether the value lives on the ordinate (intensity) axis.
    pub fn is_ordinate(&self) -> bool {
        matches!(self, BandField::MaxVal)
    }
}

impl FromStr for BandField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BandField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                format!("Unknown field '{s}' (expected barycenter, max_pos, fwhm or max_val)")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How a result is printed, loadable from a JSON settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Decimal digits for x-valued fields (max_pos, barycenter, fwhm).
    /// Negative values round to tens, hundreds, and so on.
    pub x_digits: i32,
    /// Decimal digits for max_val.
    pub y_digits: i32,
    /// Print only this field.
    pub field: Option<BandField>,
    pub strategy: CrossingStrategy,
    pub format: OutputFormat,
    /// Append units inferred from the column headers.
    pub show_units: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            x_digits: 2,
            y_digits: 3,
            field: None,
            strategy: CrossingStrategy::default(),
            format: OutputFormat::default(),
            show_units: false,
        }
    }
}

impl ReportSettings {
    /// Load settings from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read settings file: {e}"))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse settings: {e}"))
    }

    /// Digit count for `field`.
    pub fn digits_for(&self, field: BandField) -> i32 {
        if field.is_ordinate() {
            self.y_digits
        } else {
            self.x_digits
        }
    }

    /// Fields to report, in display order.
    pub fn fields(&self) -> Vec<BandField> {
        match self.field {
            Some(f) => vec![f],
            None => BandField::ALL.to_vec(),
        }
    }
}
