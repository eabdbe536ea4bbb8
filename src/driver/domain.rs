//! Core driver domain types and validation.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::validation::FieldErrors;

pub type DriverId = u64;

/// A person who can be assigned to trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    /// The driver's CNH (national driver's licence) number.
    pub license_number: String,
    pub phone: String,
}

/// A driver that passed validation but has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDriver {
    pub name: String,
    pub license_number: String,
    pub phone: String,
}

/// The raw form data for registering a driver.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DriverForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub phone: String,
}

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PHONE_LENGTH: usize = 10;
const LICENSE_NUMBER_DIGITS: RangeInclusive<usize> = 9..=11;

pub const NAME_TOO_SHORT: &str = "Nome deve ter pelo menos 2 caracteres.";
pub const INVALID_LICENSE_NUMBER: &str = "CNH inválida.";
pub const INVALID_PHONE: &str = "Telefone inválido.";

/// Check the driver form, reporting every invalid field.
///
/// Leading and trailing whitespace is removed from every field.
pub fn validate_driver_form(form: &DriverForm) -> Result<NewDriver, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.graphemes(true).count() < MIN_NAME_LENGTH {
        errors.add("name", NAME_TOO_SHORT);
    }

    let license_number = form.license_number.trim();
    if !is_valid_license_number(license_number) {
        errors.add("license_number", INVALID_LICENSE_NUMBER);
    }

    let phone = form.phone.trim();
    if phone.graphemes(true).count() < MIN_PHONE_LENGTH {
        errors.add("phone", INVALID_PHONE);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewDriver {
        name: name.to_owned(),
        license_number: license_number.to_owned(),
        phone: phone.to_owned(),
    })
}

fn is_valid_license_number(text: &str) -> bool {
    LICENSE_NUMBER_DIGITS.contains(&text.len()) && text.bytes().all(|byte| byte.is_ascii_digit())
}
