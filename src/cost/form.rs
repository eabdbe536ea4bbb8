//! Parsing and validating the cost entry form.

use serde::{Deserialize, Serialize};

use crate::validation::FieldErrors;

/// The raw form data for the costs of a trip.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CostForm {
    #[serde(default)]
    pub real_km: String,
    #[serde(default)]
    pub km_paid: String,
    #[serde(default)]
    pub reference_value: String,
}

/// Validated cost figures for a trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEntry {
    pub real_km: f64,
    pub km_paid: f64,
    pub reference_value: f64,
}

pub const NEGATIVE_REAL_KM: &str = "KM Real deve ser positivo.";
pub const NEGATIVE_KM_PAID: &str = "Valor por KM deve ser positivo.";
pub const NEGATIVE_REFERENCE_VALUE: &str = "Valor de referência deve ser positivo.";
pub const NOT_A_NUMBER: &str = "Informe um número válido.";

pub fn validate_cost_form(form: &CostForm) -> Result<CostEntry, FieldErrors> {
    let mut errors = FieldErrors::new();

    let real_km = parse_non_negative(&form.real_km, "real_km", NEGATIVE_REAL_KM, &mut errors);
    let km_paid = parse_non_negative(&form.km_paid, "km_paid", NEGATIVE_KM_PAID, &mut errors);
    let reference_value = parse_non_negative(
        &form.reference_value,
        "reference_value",
        NEGATIVE_REFERENCE_VALUE,
        &mut errors,
    );

    match (real_km, km_paid, reference_value) {
        (Some(real_km), Some(km_paid), Some(reference_value)) => Ok(CostEntry {
            real_km,
            km_paid,
            reference_value,
        }),
        _ => Err(errors),
    }
}

/// Parse a decimal number that may use a comma as the decimal separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let number: f64 = text.trim().replace(',', ".").parse().ok()?;

    number.is_finite().then_some(number)
}

fn parse_non_negative(
    text: &str,
    field: &'static str,
    negative_message: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    match parse_decimal(text) {
        Some(number) if number >= 0.0 => Some(number),
        Some(_) => {
            errors.add(field, negative_message);
            None
        }
        None => {
            errors.add(field, NOT_A_NUMBER);
            None
        }
    }
}
