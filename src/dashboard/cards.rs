//! The stat cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{
    dashboard::stats::DashboardStats,
    html::{CARD_STYLE, format_km, format_number},
};

pub(super) fn stat_cards_view(stats: &DashboardStats) -> Markup {
    let cards = [
        ("total-trips", "Total de Viagens", stats.total_trips.to_string()),
        (
            "trips-in-progress",
            "Viagens em Andamento",
            stats.trips_in_progress.to_string(),
        ),
        (
            "total-km-driven",
            "Total KM Rodados",
            format_km(stats.total_km_driven),
        ),
        (
            "total-sacks",
            "Total de Sacos",
            format_number(stats.total_sacks as f64, 0),
        ),
    ];

    html! {
        section id="stats" class="grid w-full gap-4 mb-6 sm:grid-cols-2 xl:grid-cols-4"
        {
            @for (key, title, value) in &cards {
                div class=(CARD_STYLE) data-stat=(key)
                {
                    h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
                    p class="mt-2 text-2xl font-bold" data-stat-value="true" { (value) }
                }
            }
        }
    }
}
