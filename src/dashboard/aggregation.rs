//! Trip counts per calendar month for the dashboard chart.

use time::Month;

use crate::trip::Trip;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The number of trips that started in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct MonthlyTripCount {
    pub month: Month,
    pub count: usize,
}

impl MonthlyTripCount {
    /// The three letter abbreviation of the month, e.g. "Jan".
    pub fn label(&self) -> &'static str {
        MONTH_LABELS[month_index(self.month)]
    }
}

fn month_index(month: Month) -> usize {
    usize::from(u8::from(month) - 1)
}

/// Count trips by the month of their start date.
///
/// Trips from different years fall in the same bucket when they share a
/// month. Months without trips are left out and the rest are returned in
/// calendar order.
pub(super) fn count_trips_by_month(trips: &[Trip]) -> Vec<MonthlyTripCount> {
    let mut counts = [0usize; 12];

    for trip in trips {
        counts[month_index(trip.start_date.month())] += 1;
    }

    let mut month = Month::January;
    let mut monthly_counts = Vec::new();

    for count in counts {
        if count > 0 {
            monthly_counts.push(MonthlyTripCount { month, count });
        }

        month = month.next();
    }

    monthly_counts
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, macros::date};

    use crate::{
        store::TripStore,
        trip::{Product, Trip, TripStatus},
    };

    use super::{MonthlyTripCount, count_trips_by_month};

    fn trip(id: u64, start_date: Date) -> Trip {
        Trip {
            id,
            oc: format!("OC-{id}"),
            driver_id: 1,
            product: Product::Sorgo,
            cities: vec!["Jataí".to_owned(), "Goiânia".to_owned()],
            estimated_km: 320.0,
            real_km: None,
            sacks: 300,
            start_date,
            end_date: None,
            status: TripStatus::Planned,
            cost: None,
        }
    }

    #[test]
    fn counts_sample_trips_in_calendar_order() {
        let store = TripStore::with_sample_data();

        let counts = count_trips_by_month(store.trips());

        let labels: Vec<_> = counts.iter().map(MonthlyTripCount::label).collect();
        let values: Vec<_> = counts.iter().map(|month| month.count).collect();
        assert_eq!(labels, ["Jan", "Feb", "Mar", "Apr", "May"]);
        assert_eq!(values, [1, 1, 2, 2, 2]);
    }

    #[test]
    fn ignores_year_and_skips_empty_months() {
        let trips = vec![
            trip(1, date!(2024 - 12 - 01)),
            trip(2, date!(2023 - 03 - 15)),
            trip(3, date!(2024 - 03 - 31)),
        ];

        let counts = count_trips_by_month(&trips);

        assert_eq!(
            counts,
            [
                MonthlyTripCount {
                    month: Month::March,
                    count: 2
                },
                MonthlyTripCount {
                    month: Month::December,
                    count: 1
                },
            ]
        );
        assert_eq!(counts[1].label(), "Dec");
    }

    #[test]
    fn no_trips_gives_no_months() {
        assert!(count_trips_by_month(&[]).is_empty());
    }
}
