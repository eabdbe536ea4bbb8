//! Parsing and validating the new trip form.

use serde::{Deserialize, Serialize};

use crate::{
    cost::parse_decimal,
    dates::parse_iso_date,
    driver::DriverId,
    trip::{NewTrip, Product},
    validation::FieldErrors,
};

/// A trip's route must visit at least this many cities.
pub const MIN_CITIES: usize = 2;

pub const MISSING_OC: &str = "Ordem de Carga é obrigatória.";
pub const MISSING_DRIVER: &str = "Motorista é obrigatório.";
pub const UNKNOWN_DRIVER: &str = "Motorista não encontrado.";
pub const INVALID_PRODUCT: &str = "Selecione milho ou sorgo.";
pub const MISSING_SACKS: &str = "Quantidade de sacos é obrigatória.";
pub const MISSING_START_DATE: &str = "Data de início é obrigatória.";
pub const TOO_FEW_CITIES: &str = "Pelo menos duas cidades são necessárias.";
pub const INVALID_ESTIMATED_KM: &str = "KM estimado deve ser positivo.";

/// The raw form data for creating a trip.
///
/// `cities` holds one entry per city input, so it must be deserialized with
/// a form extractor that supports repeated keys.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripForm {
    #[serde(default)]
    pub oc: String,
    #[serde(default)]
    pub driver_id: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub sacks: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub estimated_km: String,
    #[serde(default)]
    pub cities: Vec<String>,
}

/// The non-blank cities, trimmed and in the order entered.
pub fn clean_cities(cities: &[String]) -> Vec<String> {
    cities
        .iter()
        .map(|city| city.trim())
        .filter(|city| !city.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Check the trip form, reporting every invalid field.
///
/// Whether the driver exists is checked when the trip is added to the store.
pub fn validate_trip_form(form: &TripForm) -> Result<NewTrip, FieldErrors> {
    let mut errors = FieldErrors::new();

    let oc = form.oc.trim();
    if oc.is_empty() {
        errors.add("oc", MISSING_OC);
    }

    let driver_id = form.driver_id.trim().parse::<DriverId>().ok();
    if driver_id.is_none() {
        errors.add("driver_id", MISSING_DRIVER);
    }

    let product = Product::from_form_value(&form.product);
    if product.is_none() {
        errors.add("product", INVALID_PRODUCT);
    }

    let sacks = form
        .sacks
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|sacks| *sacks >= 1);
    if sacks.is_none() {
        errors.add("sacks", MISSING_SACKS);
    }

    let start_date = parse_iso_date(&form.start_date);
    if start_date.is_none() {
        errors.add("start_date", MISSING_START_DATE);
    }

    let cities = clean_cities(&form.cities);
    if cities.len() < MIN_CITIES {
        errors.add("cities", TOO_FEW_CITIES);
    }

    let estimated_km = if form.estimated_km.trim().is_empty() {
        Some(0.0)
    } else {
        parse_decimal(&form.estimated_km).filter(|km| *km >= 0.0)
    };
    if estimated_km.is_none() {
        errors.add("estimated_km", INVALID_ESTIMATED_KM);
    }

    match (driver_id, product, sacks, start_date, estimated_km) {
        (Some(driver_id), Some(product), Some(sacks), Some(start_date), Some(estimated_km))
            if errors.is_empty() =>
        {
            Ok(NewTrip {
                oc: oc.to_owned(),
                driver_id,
                product,
                cities,
                estimated_km,
                sacks,
                start_date,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::trip::{NewTrip, Product};

    use super::{
        INVALID_ESTIMATED_KM, INVALID_PRODUCT, MISSING_DRIVER, MISSING_OC, MISSING_SACKS,
        MISSING_START_DATE, TOO_FEW_CITIES, TripForm, clean_cities, validate_trip_form,
    };

    fn valid_form() -> TripForm {
        TripForm {
            oc: " OC-2024-100 ".to_owned(),
            driver_id: "2".to_owned(),
            product: "sorgo".to_owned(),
            sacks: "450".to_owned(),
            start_date: "2024-07-01".to_owned(),
            estimated_km: "1350".to_owned(),
            cities: vec!["Rio Verde".to_owned(), " ".to_owned(), "Paranaguá ".to_owned()],
        }
    }

    #[test]
    fn accepts_valid_trip() {
        assert_eq!(
            validate_trip_form(&valid_form()),
            Ok(NewTrip {
                oc: "OC-2024-100".to_owned(),
                driver_id: 2,
                product: Product::Sorgo,
                cities: vec!["Rio Verde".to_owned(), "Paranaguá".to_owned()],
                estimated_km: 1350.0,
                sacks: 450,
                start_date: date!(2024 - 07 - 01),
            })
        );
    }

    #[test]
    fn blank_estimated_km_is_zero() {
        let form = TripForm {
            estimated_km: String::new(),
            ..valid_form()
        };

        assert_eq!(validate_trip_form(&form).unwrap().estimated_km, 0.0);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = validate_trip_form(&TripForm::default()).unwrap_err();

        assert_eq!(errors.get("oc"), Some(MISSING_OC));
        assert_eq!(errors.get("driver_id"), Some(MISSING_DRIVER));
        assert_eq!(errors.get("product"), Some(INVALID_PRODUCT));
        assert_eq!(errors.get("sacks"), Some(MISSING_SACKS));
        assert_eq!(errors.get("start_date"), Some(MISSING_START_DATE));
        assert_eq!(errors.get("cities"), Some(TOO_FEW_CITIES));
        assert_eq!(errors.get("estimated_km"), None);
    }

    #[test]
    fn requires_two_non_blank_cities() {
        let form = TripForm {
            cities: vec!["Sorriso".to_owned(), "  ".to_owned(), String::new()],
            ..valid_form()
        };

        let errors = validate_trip_form(&form).unwrap_err();

        assert_eq!(errors.get("cities"), Some(TOO_FEW_CITIES));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rejects_zero_sacks() {
        let form = TripForm {
            sacks: "0".to_owned(),
            ..valid_form()
        };

        assert_eq!(
            validate_trip_form(&form).unwrap_err().get("sacks"),
            Some(MISSING_SACKS)
        );
    }

    #[test]
    fn rejects_negative_estimated_km() {
        let form = TripForm {
            estimated_km: "-5".to_owned(),
            ..valid_form()
        };

        assert_eq!(
            validate_trip_form(&form).unwrap_err().get("estimated_km"),
            Some(INVALID_ESTIMATED_KM)
        );
    }

    #[test]
    fn rejects_unknown_product() {
        let form = TripForm {
            product: "soja".to_owned(),
            ..valid_form()
        };

        assert_eq!(
            validate_trip_form(&form).unwrap_err().get("product"),
            Some(INVALID_PRODUCT)
        );
    }

    #[test]
    fn cleaning_cities_keeps_order() {
        let cities = ["  B ", "", "A"].map(str::to_owned);

        assert_eq!(clean_cities(&cities), ["B", "A"]);
    }

    #[test]
    fn decodes_repeated_city_fields() {
        let form_data = "oc=OC-1&driver_id=2&product=milho&sacks=10\
            &start_date=2024-07-01&cities=Sinop&cities=Cuiab%C3%A1";

        let form: TripForm = serde_html_form::from_str(form_data).unwrap();

        assert_eq!(form.cities, ["Sinop", "Cuiabá"]);
        assert_eq!(form.estimated_km, "");
    }

    #[test]
    fn decodes_form_without_cities() {
        let form: TripForm = serde_html_form::from_str("oc=OC-1").unwrap();

        assert!(form.cities.is_empty());
        assert_eq!(
            validate_trip_form(&form).unwrap_err().get("cities"),
            Some(TOO_FEW_CITIES)
        );
    }
}
