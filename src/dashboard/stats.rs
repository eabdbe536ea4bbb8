//! Summary statistics shown at the top of the dashboard.

use crate::trip::{Trip, TripStatus};

/// How many trips the recent trips table shows.
pub(super) const RECENT_TRIPS: usize = 5;

/// Totals over every trip in the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct DashboardStats {
    pub total_trips: usize,
    pub trips_in_progress: usize,
    /// The sum of the real distance of each trip. Trips without a real
    /// distance count as 0 km.
    pub total_km_driven: f64,
    pub total_sacks: u64,
}

pub(super) fn compute_dashboard_stats(trips: &[Trip]) -> DashboardStats {
    DashboardStats {
        total_trips: trips.len(),
        trips_in_progress: trips
            .iter()
            .filter(|trip| trip.status == TripStatus::InProgress)
            .count(),
        total_km_driven: trips.iter().filter_map(|trip| trip.real_km).sum(),
        total_sacks: trips.iter().map(|trip| u64::from(trip.sacks)).sum(),
    }
}

/// The `count` trips with the latest start dates, newest first.
///
/// Trips that start on the same day keep their store order.
pub(super) fn recent_trips(trips: &[Trip], count: usize) -> Vec<&Trip> {
    let mut recent: Vec<&Trip> = trips.iter().collect();
    recent.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    recent.truncate(count);
    recent
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        store::TripStore,
        trip::{Product, Trip, TripStatus},
    };

    use super::{DashboardStats, compute_dashboard_stats, recent_trips};

    fn trip(id: u64, start_date: Date) -> Trip {
        Trip {
            id,
            oc: format!("OC-{id}"),
            driver_id: 1,
            product: Product::Milho,
            cities: vec!["Sorriso".to_owned(), "Santos".to_owned()],
            estimated_km: 100.0,
            real_km: None,
            sacks: 10,
            start_date,
            end_date: None,
            status: TripStatus::Planned,
            cost: None,
        }
    }

    #[test]
    fn computes_stats_for_sample_data() {
        let store = TripStore::with_sample_data();

        let stats = compute_dashboard_stats(store.trips());

        assert_eq!(
            stats,
            DashboardStats {
                total_trips: 8,
                trips_in_progress: 2,
                total_km_driven: 4317.0,
                total_sacks: 3970,
            }
        );
    }

    #[test]
    fn stats_for_no_trips_are_zero() {
        let stats = compute_dashboard_stats(&[]);

        assert_eq!(
            stats,
            DashboardStats {
                total_trips: 0,
                trips_in_progress: 0,
                total_km_driven: 0.0,
                total_sacks: 0,
            }
        );
    }

    #[test]
    fn recent_trips_are_newest_first() {
        let store = TripStore::with_sample_data();

        let ids: Vec<u64> = recent_trips(store.trips(), 5)
            .into_iter()
            .map(|trip| trip.id)
            .collect();

        assert_eq!(ids, [8, 7, 6, 5, 4]);
    }

    #[test]
    fn recent_trips_keep_store_order_for_same_day() {
        let trips = vec![
            trip(1, date!(2024 - 01 - 01)),
            trip(2, date!(2024 - 02 - 01)),
            trip(3, date!(2024 - 02 - 01)),
        ];

        let ids: Vec<u64> = recent_trips(&trips, 2)
            .into_iter()
            .map(|trip| trip.id)
            .collect();

        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn recent_trips_returns_all_when_fewer_than_count() {
        let trips = vec![trip(1, date!(2024 - 01 - 01))];

        assert_eq!(recent_trips(&trips, 5).len(), 1);
    }
}
