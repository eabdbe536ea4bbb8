//! Dashboard HTTP handler and view rendering.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::count_trips_by_month,
        cards::stat_cards_view,
        charts::{DashboardChart, charts_script, charts_view, trips_by_month_chart},
        stats::{RECENT_TRIPS, compute_dashboard_stats, recent_trips},
    },
    endpoints,
    html::{CARD_STYLE, ECHARTS_SCRIPT_URL, HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    store::{SharedStore, lock_store},
    trip::{derive_trip_rows, trips_table},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub store: SharedStore,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Display the trip statistics, the monthly trip chart and the latest trips.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let store = lock_store(&state.store)?;
    let trips = store.trips();

    let stats = compute_dashboard_stats(trips);
    let monthly_counts = count_trips_by_month(trips);
    let charts = if monthly_counts.is_empty() {
        Vec::new()
    } else {
        vec![DashboardChart {
            id: "trips-by-month-chart",
            options: trips_by_month_chart(&monthly_counts).to_string(),
        }]
    };
    let recent_rows = derive_trip_rows(recent_trips(trips, RECENT_TRIPS), store.drivers());

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-6xl"
            {
                (stat_cards_view(&stats))

                @if charts.is_empty() {
                    (no_chart_data_view())
                } @else {
                    (charts_view(&charts))
                }

                section id="recent-trips" class="w-full"
                {
                    div class="flex items-baseline justify-between mb-4"
                    {
                        h2 class="text-xl font-semibold" { "Viagens Recentes" }
                        (link(endpoints::TRIPS_VIEW, "Ver todas"))
                    }

                    (trips_table(&recent_rows, None))
                }
            }
        }
    };

    let scripts = if charts.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
            charts_script(&charts),
        ]
    };

    Ok(base("Dashboard", &scripts, &content).into_response())
}

fn no_chart_data_view() -> Markup {
    let new_trip_link = link(endpoints::NEW_TRIP_VIEW, "crie uma viagem");

    html! {
        div class={ (CARD_STYLE) " mb-4 text-center" } data-empty-state="true"
        {
            h2 class="text-xl font-bold" { "Visão Geral das Viagens" }

            p class="mt-2 text-gray-600 dark:text-gray-400"
            {
                "O gráfico aparecerá aqui quando houver viagens. Para começar, "
                (new_trip_link) "."
            }
        }
    }
}
