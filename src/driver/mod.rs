//! Drivers: the people assigned to trips.

mod domain;
mod page;

pub use domain::{Driver, DriverForm, DriverId, NewDriver, validate_driver_form};
pub use page::{create_driver_endpoint, get_drivers_page};
