use serde_json::{Map, Value};

use super::domain::{VehicleInput, DEFAULT_RESIDUAL_VALUE_PCT};

const REQUIRED_POSITIVE_FIELDS: [&str; 10] = [
    "unit_price",
    "tco",
    "annual_tco",
    "cost_per_km",
    "revenue_per_km",
    "contribution_margin",
    "total_revenue",
    "roi",
    "bep_years",
    "bep_km",
];

/// Rejections raised before any metric is processed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Tidak ada data yang diberikan")]
    EmptyPayload,
    #[error("Validation errors: {}", .details.join(", "))]
    Invalid { details: Vec<String> },
}

impl ValidationError {
    pub fn details(&self) -> &[String] {
        match self {
            ValidationError::EmptyPayload => &[],
            ValidationError::Invalid { details } => details,
        }
    }
}

/// Convert a raw JSON payload into a [`VehicleInput`], collecting every
/// violation instead of stopping at the first one.
pub fn validate_payload(payload: &Value) -> Result<VehicleInput, ValidationError> {
    let object = match payload.as_object() {
        Some(object) if !object.is_empty() => object,
        _ => return Err(ValidationError::EmptyPayload),
    };

    let mut reader = FieldReader {
        object,
        violations: Vec::new(),
    };

    let unit_name = reader.required_text("unit_name");
    let segment = reader.required_text("segment");

    let mut positives = [0.0_f64; REQUIRED_POSITIVE_FIELDS.len()];
    for (slot, field) in positives.iter_mut().zip(REQUIRED_POSITIVE_FIELDS) {
        *slot = reader.required_positive(field);
    }

    let owning_pct = reader.share("owning_pct", 0.0);
    let operational_pct = reader.share("operational_pct", 0.0);
    let residual_value_pct = reader.share("residual_value_pct", DEFAULT_RESIDUAL_VALUE_PCT);
    let uses_leasing = reader.flag("uses_leasing");

    if !reader.violations.is_empty() {
        return Err(ValidationError::Invalid {
            details: reader.violations,
        });
    }

    let [
        unit_price,
        tco,
        annual_tco,
        cost_per_km,
        revenue_per_km,
        contribution_margin,
        total_revenue,
        roi,
        bep_years,
        bep_km,
    ] = positives;

    Ok(VehicleInput {
        unit_name,
        segment,
        uses_leasing,
        unit_price,
        tco,
        annual_tco,
        cost_per_km,
        revenue_per_km,
        contribution_margin,
        total_revenue,
        roi,
        bep_years,
        bep_km,
        owning_pct,
        operational_pct,
        residual_value_pct,
    })
}

struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<String>,
}

impl<'a> FieldReader<'a> {
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field).filter(|value| !value.is_null())
    }

    fn required_text(&mut self, field: &str) -> String {
        let text = self
            .present(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        if text.is_empty() {
            self.violations
                .push(format!("{field} is required and cannot be empty"));
        }
        text
    }

    fn required_positive(&mut self, field: &str) -> f64 {
        match self.present(field) {
            None => {
                self.violations.push(format!("{field} is required"));
                0.0
            }
            Some(value) => match value.as_f64() {
                Some(number) if number.is_finite() && number > 0.0 => number,
                _ => {
                    self.violations
                        .push(format!("{field} must be a positive number"));
                    0.0
                }
            },
        }
    }

    fn share(&mut self, field: &str, default: f64) -> f64 {
        match self.present(field) {
            None => default,
            Some(value) => match value.as_f64() {
                Some(number) if (0.0..=1.0).contains(&number) => number,
                _ => {
                    self.violations
                        .push(format!("{field} must be between 0 and 1"));
                    default
                }
            },
        }
    }

    fn flag(&mut self, field: &str) -> bool {
        match self.present(field) {
            None => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                self.violations.push(format!("{field} must be a boolean"));
                false
            }
        }
    }
}
