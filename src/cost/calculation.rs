//! The cost and profit of a trip.

/// How much a trip cost and how much it made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub total_cost: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitKind {
    Profit,
    Loss,
    BreakEven,
}

impl CostBreakdown {
    pub fn profit_kind(&self) -> ProfitKind {
        if self.profit > 0.0 {
            ProfitKind::Profit
        } else if self.profit < 0.0 {
            ProfitKind::Loss
        } else {
            ProfitKind::BreakEven
        }
    }
}

/// The total cost is the real distance times the rate per km, and the profit
/// is what is left of the reference value after paying that cost.
pub fn calculate_cost(real_km: f64, km_paid: f64, reference_value: f64) -> CostBreakdown {
    let total_cost = real_km * km_paid;

    CostBreakdown {
        total_cost,
        profit: reference_value - total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::{CostBreakdown, ProfitKind, calculate_cost};

    #[test]
    fn profitable_trip() {
        let got = calculate_cost(100.0, 1.5, 200.0);

        assert_eq!(
            got,
            CostBreakdown {
                total_cost: 150.0,
                profit: 50.0
            }
        );
        assert_eq!(got.profit_kind(), ProfitKind::Profit);
    }

    #[test]
    fn trip_at_a_loss() {
        let got = calculate_cost(200.0, 1.5, 200.0);

        assert_eq!(got.total_cost, 300.0);
        assert_eq!(got.profit, -100.0);
        assert_eq!(got.profit_kind(), ProfitKind::Loss);
    }

    #[test]
    fn zero_rates_break_even() {
        let got = calculate_cost(350.0, 0.0, 0.0);

        assert_eq!(got.total_cost, 0.0);
        assert_eq!(got.profit_kind(), ProfitKind::BreakEven);
    }
}
