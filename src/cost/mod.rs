//! Trip costs: entering the real distance and rates of a trip and working out its profit.

mod calculation;
mod form;
mod page;

pub use calculation::{CostBreakdown, ProfitKind, calculate_cost};
pub use form::{CostEntry, CostForm, parse_decimal, validate_cost_form};
pub use page::{get_costs_page, preview_cost_endpoint, update_trip_cost_endpoint};
