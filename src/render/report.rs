use serde::Serialize;

use crate::processing::band::BandParameters;
use crate::state::settings::{BandField, OutputFormat, ReportSettings};

/// Display units of the two axes, when known.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisUnits {
    pub x: Option<String>,
    pub y: Option<String>,
}

impl AxisUnits {
    fn for_field(&self, field: BandField) -> Option<&str> {
        if field.is_ordinate() {
            self.y.as_deref()
        } else {
            self.x.as_deref()
        }
    }
}

#[derive(Serialize)]
struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    barycenter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_pos: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fwhm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_val: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<AxisUnits>,
}

/// Round half away from zero to `digits` decimals.
///
/// Negative `digits` round left of the decimal point, so `-2` rounds to
/// the nearest hundred.
pub fn round_to(value: f64, digits: i32) -> f64 {
    if digits < 0 {
        let step = 10f64.powi(digits.saturating_neg());
        if !step.is_finite() {
            return 0.0;
        }
        return (value / step).round() * step;
    }
    let scale = 10f64.powi(digits);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

pub fn field_value(params: &BandParameters, field: BandField) -> f64 {
    match field {
        BandField::Barycenter => params.barycenter,
        BandField::MaxPos => params.max_pos,
        BandField::Fwhm => params.fwhm,
        BandField::MaxVal => params.max_val,
    }
}

fn format_value(params: &BandParameters, field: BandField, settings: &ReportSettings) -> String {
    let digits = settings.digits_for(field);
    let decimals = usize::try_from(digits).unwrap_or(0);
    format!("{:.*}", decimals, round_to(field_value(params, field), digits))
}

/// Render a result according to `settings`.
pub fn render(
    params: &BandParameters,
    settings: &ReportSettings,
    units: &AxisUnits,
) -> Result<String, serde_json::Error> {
    match settings.format {
        OutputFormat::Text => Ok(render_text(params, settings, units)),
        OutputFormat::Json => render_json(params, settings, units),
    }
}

fn render_text(params: &BandParameters, settings: &ReportSettings, units: &AxisUnits) -> String {
    if let Some(field) = settings.field {
        return format_value(params, field, settings);
    }

    let mut lines = Vec::with_capacity(BandField::ALL.len());
    for field in settings.fields() {
        let mut line = format!(
            "{:<12} {}",
            format!("{}:", field.name()),
            format_value(params, field, settings)
        );
        if settings.show_units {
            if let Some(unit) = units.for_field(field) {
                line.push(' ');
                line.push_str(unit);
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn render_json(
    params: &BandParameters,
    settings: &ReportSettings,
    units: &AxisUnits,
) -> Result<String, serde_json::Error> {
    let pick = |field: BandField| {
        settings
            .fields()
            .contains(&field)
            .then(|| round_to(field_value(params, field), settings.digits_for(field)))
    };
    let report = JsonReport {
        barycenter: pick(BandField::Barycenter),
        max_pos: pick(BandField::MaxPos),
        fwhm: pick(BandField::Fwhm),
        max_val: pick(BandField::MaxVal),
        units: settings.show_units.then(|| units.clone()),
    };
    serde_json::to_string_pretty(&report)
}
