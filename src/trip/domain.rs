//! Core trip domain types.

use std::fmt;

use time::Date;

use crate::{
    cost::{CostBreakdown, calculate_cost},
    driver::DriverId,
};

pub type TripId = u64;

/// The grain carried on a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Milho,
    Sorgo,
}

impl Product {
    pub const ALL: [Product; 2] = [Product::Milho, Product::Sorgo];

    /// The value used in forms and the CSV export.
    pub fn as_str(self) -> &'static str {
        match self {
            Product::Milho => "milho",
            Product::Sorgo => "sorgo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Product::Milho => "Milho",
            Product::Sorgo => "Sorgo",
        }
    }

    pub fn from_form_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|product| product.as_str() == value.trim())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn label(self) -> &'static str {
        match self {
            TripStatus::Planned => "Planejada",
            TripStatus::InProgress => "Em Andamento",
            TripStatus::Completed => "Concluída",
            TripStatus::Cancelled => "Cancelada",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The rates agreed for a trip, entered once the trip is done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripCost {
    /// The amount paid per kilometre driven.
    pub km_paid: f64,
    /// The amount received for the trip.
    pub reference_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: TripId,
    /// The load order (Ordem de Carga) code.
    pub oc: String,
    pub driver_id: DriverId,
    pub product: Product,
    /// The cities on the route, in the order they are visited.
    pub cities: Vec<String>,
    pub estimated_km: f64,
    pub real_km: Option<f64>,
    pub sacks: u32,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub status: TripStatus,
    pub cost: Option<TripCost>,
}

impl Trip {
    /// The total cost and profit of the trip, if its costs have been entered.
    ///
    /// A trip without a recorded real distance is treated as 0 km.
    pub fn cost_breakdown(&self) -> Option<CostBreakdown> {
        let cost = self.cost?;

        Some(calculate_cost(
            self.real_km.unwrap_or(0.0),
            cost.km_paid,
            cost.reference_value,
        ))
    }
}

/// A trip that passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub oc: String,
    pub driver_id: DriverId,
    pub product: Product,
    pub cities: Vec<String>,
    pub estimated_km: f64,
    pub sacks: u32,
    pub start_date: Date,
}
