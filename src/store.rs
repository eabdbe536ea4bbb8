//! The in-memory store that owns every driver and trip.
//!
//! The server keeps a single [TripStore] behind a mutex in
//! [AppState](crate::AppState). Nothing is persisted between runs.

use std::sync::{Arc, Mutex, MutexGuard};

use time::{Date, macros::date};

use crate::{
    Error,
    cost::CostEntry,
    driver::{Driver, DriverId, NewDriver},
    trip::{NewTrip, Product, Trip, TripCost, TripId, TripStatus},
};

/// The drivers and trips known to the application, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripStore {
    drivers: Vec<Driver>,
    trips: Vec<Trip>,
}

impl TripStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a handful of drivers and trips for demos.
    pub fn with_sample_data() -> Self {
        let drivers = vec![
            sample_driver(1, "João Silva", "12345678901", "(11) 98765-4321"),
            sample_driver(2, "Maria Oliveira", "98765432109", "(21) 99876-5432"),
            sample_driver(3, "Carlos Pereira", "456789123", "(31) 97654-3210"),
            sample_driver(4, "Ana Souza", "7418529630", "(41) 96543-2109"),
        ];

        let trips = vec![
            SampleTrip {
                id: 1,
                oc: "OC-2024-001",
                driver_id: 1,
                product: Product::Milho,
                cities: &["Sorriso", "Cuiabá", "Santos"],
                estimated_km: 2150.0,
                real_km: Some(2180.0),
                sacks: 600,
                start_date: date!(2024 - 01 - 08),
                end_date: Some(date!(2024 - 01 - 11)),
                status: TripStatus::Completed,
                cost: Some(TripCost {
                    km_paid: 4.5,
                    reference_value: 12_500.0,
                }),
            },
            SampleTrip {
                id: 2,
                oc: "OC-2024-002",
                driver_id: 2,
                product: Product::Sorgo,
                cities: &["Rio Verde", "Uberlândia", "Paranaguá"],
                estimated_km: 1350.0,
                real_km: Some(1372.0),
                sacks: 450,
                start_date: date!(2024 - 02 - 14),
                end_date: Some(date!(2024 - 02 - 16)),
                status: TripStatus::Completed,
                cost: None,
            },
            SampleTrip {
                id: 3,
                oc: "OC-2024-003",
                driver_id: 3,
                product: Product::Milho,
                cities: &["Lucas do Rio Verde", "Rondonópolis"],
                estimated_km: 560.0,
                real_km: None,
                sacks: 520,
                start_date: date!(2024 - 03 - 02),
                end_date: None,
                status: TripStatus::Cancelled,
                cost: None,
            },
            SampleTrip {
                id: 4,
                oc: "OC-2024-004",
                driver_id: 1,
                product: Product::Sorgo,
                cities: &["Dourados", "Maringá", "Paranaguá"],
                estimated_km: 780.0,
                real_km: Some(765.0),
                sacks: 380,
                start_date: date!(2024 - 03 - 20),
                end_date: Some(date!(2024 - 03 - 21)),
                status: TripStatus::Completed,
                cost: Some(TripCost {
                    km_paid: 5.0,
                    reference_value: 3_500.0,
                }),
            },
            SampleTrip {
                id: 5,
                oc: "OC-2024-005",
                driver_id: 4,
                product: Product::Milho,
                cities: &["Sinop", "Cuiabá", "Campo Grande", "Santos"],
                estimated_km: 2400.0,
                real_km: None,
                sacks: 640,
                start_date: date!(2024 - 04 - 05),
                end_date: None,
                status: TripStatus::InProgress,
                cost: None,
            },
            SampleTrip {
                id: 6,
                oc: "OC-2024-006",
                driver_id: 2,
                product: Product::Milho,
                cities: &["Chapadão do Sul", "Uberaba", "Santos"],
                estimated_km: 1190.0,
                real_km: None,
                sacks: 500,
                start_date: date!(2024 - 04 - 18),
                end_date: None,
                status: TripStatus::InProgress,
                cost: None,
            },
            SampleTrip {
                id: 7,
                oc: "OC-2024-007",
                driver_id: 3,
                product: Product::Sorgo,
                cities: &["Jataí", "Goiânia"],
                estimated_km: 320.0,
                real_km: None,
                sacks: 300,
                start_date: date!(2024 - 05 - 06),
                end_date: None,
                status: TripStatus::Planned,
                cost: None,
            },
            SampleTrip {
                id: 8,
                oc: "OC-2024-008",
                driver_id: 4,
                product: Product::Milho,
                cities: &["Primavera do Leste", "Rondonópolis", "Santos"],
                estimated_km: 1600.0,
                real_km: None,
                sacks: 580,
                start_date: date!(2024 - 05 - 27),
                end_date: None,
                status: TripStatus::Planned,
                cost: None,
            },
        ];

        Self {
            drivers,
            trips: trips.into_iter().map(SampleTrip::into_trip).collect(),
        }
    }

    /// Every registered driver, in the order they were added.
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// Every trip, in the order they were created.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// The driver with `id`, if registered.
    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.iter().find(|driver| driver.id == id)
    }

    /// The trip with `id`, if it exists.
    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == id)
    }

    /// Register a driver, giving it the next free ID.
    pub fn add_driver(&mut self, new_driver: NewDriver) -> Driver {
        let id = self.drivers.iter().map(|driver| driver.id).max().unwrap_or(0) + 1;
        let driver = Driver {
            id,
            name: new_driver.name,
            license_number: new_driver.license_number,
            phone: new_driver.phone,
        };

        tracing::info!("Registered driver {id} ({})", driver.name);
        self.drivers.push(driver.clone());

        driver
    }

    /// Create a planned trip, giving it the next free ID.
    ///
    /// # Errors
    /// Returns [Error::UnknownDriver] if the trip's driver is not in the store.
    pub fn add_trip(&mut self, new_trip: NewTrip) -> Result<Trip, Error> {
        if self.driver(new_trip.driver_id).is_none() {
            return Err(Error::UnknownDriver(new_trip.driver_id));
        }

        let id = self.trips.iter().map(|trip| trip.id).max().unwrap_or(0) + 1;
        let trip = Trip {
            id,
            oc: new_trip.oc,
            driver_id: new_trip.driver_id,
            product: new_trip.product,
            cities: new_trip.cities,
            estimated_km: new_trip.estimated_km,
            real_km: None,
            sacks: new_trip.sacks,
            start_date: new_trip.start_date,
            end_date: None,
            status: TripStatus::Planned,
            cost: None,
        };

        tracing::info!("Created trip {id} ({})", trip.oc);
        self.trips.push(trip.clone());

        Ok(trip)
    }

    /// Record the real distance and rates of a trip and mark it as completed.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingTrip] if there is no trip with `id`.
    pub fn update_trip_cost(&mut self, id: TripId, entry: CostEntry) -> Result<Trip, Error> {
        let trip = self
            .trips
            .iter_mut()
            .find(|trip| trip.id == id)
            .ok_or(Error::UpdateMissingTrip)?;

        if trip.status == TripStatus::Cancelled {
            tracing::warn!(
                "Trip {id} ({}) was cancelled and is now marked as completed after entering its costs",
                trip.oc
            );
        }

        trip.real_km = Some(entry.real_km);
        trip.cost = Some(TripCost {
            km_paid: entry.km_paid,
            reference_value: entry.reference_value,
        });
        trip.status = TripStatus::Completed;

        Ok(trip.clone())
    }
}

/// The store shared between request handlers.
pub type SharedStore = Arc<Mutex<TripStore>>;

/// Lock the shared store, logging a poisoned lock.
pub fn lock_store(store: &SharedStore) -> Result<MutexGuard<'_, TripStore>, Error> {
    store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)
}

fn sample_driver(id: DriverId, name: &str, license_number: &str, phone: &str) -> Driver {
    Driver {
        id,
        name: name.to_owned(),
        license_number: license_number.to_owned(),
        phone: phone.to_owned(),
    }
}

struct SampleTrip {
    id: TripId,
    oc: &'static str,
    driver_id: DriverId,
    product: Product,
    cities: &'static [&'static str],
    estimated_km: f64,
    real_km: Option<f64>,
    sacks: u32,
    start_date: Date,
    end_date: Option<Date>,
    status: TripStatus,
    cost: Option<TripCost>,
}

impl SampleTrip {
    fn into_trip(self) -> Trip {
        Trip {
            id: self.id,
            oc: self.oc.to_owned(),
            driver_id: self.driver_id,
            product: self.product,
            cities: self.cities.iter().map(|city| (*city).to_owned()).collect(),
            estimated_km: self.estimated_km,
            real_km: self.real_km,
            sacks: self.sacks,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            cost: self.cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        cost::CostEntry,
        driver::NewDriver,
        trip::{NewTrip, Product, TripCost, TripStatus},
    };

    use super::TripStore;

    fn new_driver(name: &str) -> NewDriver {
        NewDriver {
            name: name.to_owned(),
            license_number: "123456789".to_owned(),
            phone: "1198765432".to_owned(),
        }
    }

    fn new_trip(oc: &str, driver_id: u64) -> NewTrip {
        NewTrip {
            oc: oc.to_owned(),
            driver_id,
            product: Product::Sorgo,
            cities: vec!["Rio Verde".to_owned(), "Santos".to_owned()],
            estimated_km: 950.0,
            sacks: 400,
            start_date: date!(2024 - 06 - 01),
        }
    }

    #[test]
    fn driver_ids_follow_the_largest_id() {
        let mut store = TripStore::with_sample_data();
        let max_id = store.drivers().iter().map(|driver| driver.id).max().unwrap();

        let driver = store.add_driver(new_driver("Pedro Lima"));

        assert_eq!(driver.id, max_id + 1);
        assert_eq!(store.driver(driver.id), Some(&driver));
        assert_eq!(store.drivers().last(), Some(&driver));
    }

    #[test]
    fn first_driver_gets_id_one() {
        let mut store = TripStore::new();

        assert_eq!(store.add_driver(new_driver("Pedro Lima")).id, 1);
    }

    #[test]
    fn new_trip_is_planned_without_costs() {
        let mut store = TripStore::new();
        let driver = store.add_driver(new_driver("Pedro Lima"));

        let trip = store.add_trip(new_trip("OC-9", driver.id)).unwrap();

        assert_eq!(trip.status, TripStatus::Planned);
        assert_eq!(trip.real_km, None);
        assert_eq!(trip.cost, None);
        assert_eq!(trip.end_date, None);
        assert_eq!(store.trip(trip.id), Some(&trip));
    }

    #[test]
    fn rejects_trip_for_unknown_driver() {
        let mut store = TripStore::new();

        let result = store.add_trip(new_trip("OC-9", 42));

        assert_eq!(result, Err(Error::UnknownDriver(42)));
        assert!(store.trips().is_empty());
    }

    #[test]
    fn cost_update_completes_trip() {
        let mut store = TripStore::with_sample_data();
        let trip_id = store
            .trips()
            .iter()
            .find(|trip| trip.status == TripStatus::InProgress)
            .unwrap()
            .id;
        let entry = CostEntry {
            real_km: 1200.0,
            km_paid: 4.0,
            reference_value: 6000.0,
        };

        let updated = store.update_trip_cost(trip_id, entry).unwrap();

        assert_eq!(updated.real_km, Some(1200.0));
        assert_eq!(
            updated.cost,
            Some(TripCost {
                km_paid: 4.0,
                reference_value: 6000.0
            })
        );
        assert_eq!(updated.status, TripStatus::Completed);
        assert_eq!(store.trip(trip_id), Some(&updated));
    }

    #[test]
    fn cost_update_preserves_trip_order() {
        let mut store = TripStore::with_sample_data();
        let ids_before: Vec<u64> = store.trips().iter().map(|trip| trip.id).collect();
        let entry = CostEntry {
            real_km: 10.0,
            km_paid: 1.0,
            reference_value: 10.0,
        };

        store.update_trip_cost(ids_before[2], entry).unwrap();

        let ids_after: Vec<u64> = store.trips().iter().map(|trip| trip.id).collect();
        assert_eq!(ids_before, ids_after);
    }

    #[test]
    fn cost_update_for_missing_trip_fails() {
        let mut store = TripStore::with_sample_data();
        let before = store.clone();
        let entry = CostEntry {
            real_km: 10.0,
            km_paid: 1.0,
            reference_value: 10.0,
        };

        assert_eq!(
            store.update_trip_cost(999, entry),
            Err(Error::UpdateMissingTrip)
        );
        assert_eq!(store, before);
    }

    #[test]
    fn sample_trips_reference_known_drivers() {
        let store = TripStore::with_sample_data();

        for trip in store.trips() {
            assert!(
                store.driver(trip.driver_id).is_some(),
                "trip {} has unknown driver",
                trip.oc
            );
            assert!(trip.cities.len() >= 2);
        }
    }
}
