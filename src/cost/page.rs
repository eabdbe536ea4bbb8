//! The costs page: pick a trip, enter its real distance and rates and see
//! its total cost and profit.

use axum::{
    Form,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::Alert,
    cost::{CostForm, ProfitKind, calculate_cost, parse_decimal, validate_cost_form},
    dates::format_display_date,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, field_error, format_currency,
        page_header,
    },
    navigation::NavBar,
    store::{SharedStore, TripStore, lock_store},
    trip::{
        Trip, TripId, TripRow, TripStatus, UNKNOWN_DRIVER_NAME, derive_trip_rows, status_badge,
    },
    validation::FieldErrors,
};

/// The state needed for the costs page.
#[derive(Debug, Clone)]
pub struct CostsState {
    pub store: SharedStore,
}

impl FromRef<AppState> for CostsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The selected trip and the search terms for the trip picker.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

impl CostsQuery {
    fn selected_trip_id(&self) -> Option<TripId> {
        self.trip.as_deref()?.trim().parse().ok()
    }

    fn oc_search(&self) -> &str {
        self.oc.as_deref().unwrap_or_default().trim()
    }

    fn driver_search(&self) -> &str {
        self.driver.as_deref().unwrap_or_default().trim()
    }

    fn with_trip(&self, trip_id: TripId) -> Self {
        Self {
            trip: Some(trip_id.to_string()),
            ..self.clone()
        }
    }

    fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if query.is_empty() => endpoints::COSTS_VIEW.to_owned(),
            Ok(query) => format!("{}?{query}", endpoints::COSTS_VIEW),
            Err(error) => {
                tracing::error!("Could not encode costs query {self:?}: {error}");
                endpoints::COSTS_VIEW.to_owned()
            }
        }
    }
}

/// Whether the row's OC and driver name contain the search terms, ignoring case.
fn matches_search(row: &TripRow<'_>, oc: &str, driver: &str) -> bool {
    row.trip.oc.to_lowercase().contains(&oc.to_lowercase())
        && row
            .driver_name
            .to_lowercase()
            .contains(&driver.to_lowercase())
}

/// The trip shown when none was picked: the first completed trip, or else
/// the first trip.
fn default_trip(trips: &[Trip]) -> Option<&Trip> {
    trips
        .iter()
        .find(|trip| trip.status == TripStatus::Completed)
        .or_else(|| trips.first())
}

/// The form values for a trip: its saved figures, with the real distance
/// falling back to the estimate and the rates to zero.
fn cost_form_for(trip: &Trip) -> CostForm {
    let cost = trip.cost;

    CostForm {
        real_km: trip.real_km.unwrap_or(trip.estimated_km).to_string(),
        km_paid: cost.map_or(0.0, |cost| cost.km_paid).to_string(),
        reference_value: cost.map_or(0.0, |cost| cost.reference_value).to_string(),
    }
}

pub async fn get_costs_page(
    State(state): State<CostsState>,
    Query(query): Query<CostsQuery>,
) -> Result<Response, Error> {
    let store = lock_store(&state.store)?;

    let selected = match query.selected_trip_id() {
        Some(trip_id) => store.trip(trip_id),
        None => default_trip(store.trips()),
    };
    let selected_panel = selected.map(|trip| {
        cost_panel_view(
            trip,
            driver_name(&store, trip),
            &cost_form_for(trip),
            &FieldErrors::new(),
            None,
        )
    });

    let rows = derive_trip_rows(store.trips(), store.drivers());
    let matching: Vec<TripRow<'_>> = rows
        .into_iter()
        .filter(|row| matches_search(row, query.oc_search(), query.driver_search()))
        .collect();

    let nav_bar = NavBar::new(endpoints::COSTS_VIEW).into_html();
    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-6xl"
            {
                (page_header("Gerenciamento de Custos", None))

                p class="mb-6 text-gray-600 dark:text-gray-400"
                {
                    "Selecione uma viagem para adicionar ou editar seus custos."
                }

                div class="grid gap-8 md:grid-cols-3"
                {
                    div class="md:col-span-1"
                    {
                        (trip_picker_view(&matching, &query, selected.map(|trip| trip.id)))
                    }

                    div class="md:col-span-2"
                    {
                        @match selected_panel {
                            Some(panel) => { (panel) }
                            None => {
                                div class=(CARD_STYLE) data-empty-state="true"
                                {
                                    p class="text-gray-600 dark:text-gray-400"
                                    {
                                        "Selecione uma viagem para ver os detalhes."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    Ok(base("Custos", &[], &content).into_response())
}

/// Save the costs of a trip, which marks the trip as completed.
///
/// Responds with the cost panel, showing either the field errors or a
/// success message with the saved figures.
pub async fn update_trip_cost_endpoint(
    State(state): State<CostsState>,
    Path(trip_id): Path<TripId>,
    Form(form): Form<CostForm>,
) -> Response {
    let mut store = match lock_store(&state.store) {
        Ok(store) => store,
        Err(error) => return error.into_alert_response(),
    };

    let entry = match validate_cost_form(&form) {
        Ok(entry) => entry,
        Err(errors) => {
            let Some(trip) = store.trip(trip_id) else {
                return Error::UpdateMissingTrip.into_alert_response();
            };
            let name = driver_name(&store, trip);

            return cost_panel_view(trip, name, &form, &errors, None).into_response();
        }
    };

    let trip = match store.update_trip_cost(trip_id, entry) {
        Ok(trip) => trip,
        Err(error) => {
            tracing::warn!("Could not save the costs of trip {trip_id}: {error}");
            return error.into_alert_response();
        }
    };

    tracing::info!("Saved the costs of trip {trip_id} ({})", trip.oc);

    let alert = Alert::success(
        "Custo Atualizado!",
        format!("Os custos para a viagem {} foram salvos.", trip.oc),
    );

    cost_panel_view(
        &trip,
        driver_name(&store, &trip),
        &cost_form_for(&trip),
        &FieldErrors::new(),
        Some(alert),
    )
    .into_response()
}

/// Recalculate the cost totals from the values being typed in.
///
/// Values that are not numbers yet count as zero.
pub async fn preview_cost_endpoint(Form(form): Form<CostForm>) -> Response {
    cost_totals_view(&form).into_response()
}

fn driver_name<'a>(store: &'a TripStore, trip: &Trip) -> &'a str {
    store
        .driver(trip.driver_id)
        .map(|driver| driver.name.as_str())
        .unwrap_or(UNKNOWN_DRIVER_NAME)
}

const SELECTED_TRIP_STYLE: &str = "block w-full p-3 rounded-lg border \
    bg-blue-50 border-blue-300 dark:bg-gray-700 dark:border-blue-500";
const UNSELECTED_TRIP_STYLE: &str = "block w-full p-3 rounded-lg border \
    border-gray-200 hover:bg-gray-100 dark:border-gray-700 dark:hover:bg-gray-700";

fn trip_picker_view(rows: &[TripRow<'_>], query: &CostsQuery, selected: Option<TripId>) -> Markup {
    html! {
        div class=(CARD_STYLE) id="trip-picker"
        {
            h2 class="text-lg font-semibold" { "Viagens" }
            p class="mb-4 text-sm text-gray-600 dark:text-gray-400" { "Selecione uma viagem da lista." }

            form method="get" action=(endpoints::COSTS_VIEW) class="mb-4 space-y-2"
            {
                input
                    type="search"
                    name="oc"
                    aria-label="Buscar por OC"
                    placeholder="Buscar por OC..."
                    value=(query.oc_search())
                    class=(FORM_TEXT_INPUT_STYLE);
                input
                    type="search"
                    name="driver"
                    aria-label="Buscar por Motorista"
                    placeholder="Buscar por Motorista..."
                    value=(query.driver_search())
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(trip_id) = selected {
                    input type="hidden" name="trip" value=(trip_id);
                }

                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Buscar" }
            }

            ul class="space-y-2 max-h-[450px] overflow-y-auto"
            {
                @for row in rows {
                    @let is_selected = selected == Some(row.trip.id);
                    @let link_style = if is_selected {
                        SELECTED_TRIP_STYLE
                    } else {
                        UNSELECTED_TRIP_STYLE
                    };
                    li
                    {
                        a
                            href=(query.with_trip(row.trip.id).to_url())
                            data-trip-id=(row.trip.id)
                            aria-current=[is_selected.then_some("true")]
                            class=(link_style)
                        {
                            p class="font-semibold" { (row.trip.oc) }
                            p class="text-sm text-gray-600 dark:text-gray-400" { (row.driver_name) }
                            p class="text-xs text-gray-500" { (format_display_date(row.trip.start_date)) }
                        }
                    }
                }

                @if rows.is_empty() {
                    li data-empty-state="true" class="text-sm text-gray-600 dark:text-gray-400"
                    {
                        "Nenhum resultado."
                    }
                }
            }
        }
    }
}

fn cost_panel_view(
    trip: &Trip,
    driver_name: &str,
    form: &CostForm,
    errors: &FieldErrors,
    alert: Option<Alert>,
) -> Markup {
    html! {
        div id="cost-panel" class=(CARD_STYLE)
        {
            @if let Some(alert) = alert {
                div class="mb-4" { (alert.into_html()) }
            }

            div class="flex flex-wrap items-center justify-between gap-2"
            {
                h2 class="text-lg font-semibold" { "Custos da Viagem: " (trip.oc) }
                (status_badge(trip.status))
            }
            p class="mb-4 text-sm text-gray-600 dark:text-gray-400"
            {
                (driver_name) " · " (format_display_date(trip.start_date))
            }
            p class="mb-4 text-sm text-gray-600 dark:text-gray-400"
            {
                "Adicione os valores para calcular a rentabilidade da viagem."
            }

            form
                id="cost-form"
                hx-post=(format_endpoint(endpoints::TRIP_COST_API, trip.id))
                hx-target="#cost-panel"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="real_km" class=(FORM_LABEL_STYLE) { "KM Real" }
                    input
                        type="number"
                        name="real_km"
                        id="real_km"
                        min="0"
                        step="0.1"
                        placeholder="KM rodado"
                        value=(form.real_km)
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error("real_km", errors.get("real_km")))
                }

                div
                {
                    label for="km_paid" class=(FORM_LABEL_STYLE) { "Valor por KM (R$)" }
                    input
                        type="number"
                        name="km_paid"
                        id="km_paid"
                        min="0"
                        step="0.01"
                        placeholder="Ex: 1.50"
                        value=(form.km_paid)
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error("km_paid", errors.get("km_paid")))
                }

                div
                {
                    label for="reference_value" class=(FORM_LABEL_STYLE) { "Valor de Referência (R$)" }
                    input
                        type="number"
                        name="reference_value"
                        id="reference_value"
                        min="0"
                        step="0.01"
                        placeholder="Ex: 3000.00"
                        value=(form.reference_value)
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error("reference_value", errors.get("reference_value")))
                }

                (cost_totals_view(form))

                div class="flex justify-end"
                {
                    div class="w-full sm:w-48"
                    {
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Salvar Custos" }
                    }
                }
            }
        }
    }
}

/// The total cost and profit, refreshed whenever an input of the cost form
/// changes.
fn cost_totals_view(form: &CostForm) -> Markup {
    let number = |text: &str| parse_decimal(text).unwrap_or(0.0);
    let breakdown = calculate_cost(
        number(&form.real_km),
        number(&form.km_paid),
        number(&form.reference_value),
    );
    let (profit_kind, profit_style) = match breakdown.profit_kind() {
        ProfitKind::Profit => ("profit", "text-green-600 dark:text-green-400"),
        ProfitKind::Loss => ("loss", "text-red-600 dark:text-red-400"),
        ProfitKind::BreakEven => ("break-even", ""),
    };

    html! {
        div
            id="cost-totals"
            hx-post=(endpoints::COST_PREVIEW_API)
            hx-trigger="input from:#cost-form delay:300ms"
            hx-include="#cost-form"
            hx-target="this"
            hx-swap="outerHTML"
            class="pt-4 space-y-2"
        {
            div class="flex items-center justify-between p-3 rounded-lg bg-gray-100 dark:bg-gray-700"
            {
                span class="font-medium" { "Custo Total da Viagem:" }
                span class="text-lg font-bold" data-total-cost="true" { (format_currency(breakdown.total_cost)) }
            }

            div class="flex items-center justify-between p-3 rounded-lg bg-gray-100 dark:bg-gray-700"
            {
                span class="font-medium" { "Lucro/Prejuízo:" }
                span
                    class={ "text-lg font-bold " (profit_style) }
                    data-profit-kind=(profit_kind)
                {
                    (format_currency(breakdown.profit))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Form,
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use scraper::Html;

    use crate::{
        cost::{CostForm, form::NEGATIVE_KM_PAID},
        endpoints::{self, format_endpoint},
        store::TripStore,
        test_utils::{
            assert_field_error, assert_form_input_with_value, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_element, parse_html_document,
            parse_html_fragment, select_texts, shared_store,
        },
        trip::{TripRow, TripStatus},
    };

    use super::{
        CostsQuery, CostsState, get_costs_page, matches_search, preview_cost_endpoint,
        update_trip_cost_endpoint,
    };

    fn state() -> CostsState {
        CostsState {
            store: shared_store(TripStore::with_sample_data()),
        }
    }

    async fn render(state: CostsState, query: &str) -> Html {
        let query: CostsQuery = serde_urlencoded::from_str(query).unwrap();
        let response = get_costs_page(State(state), Query(query)).await.unwrap();
        assert_status_ok(&response);

        parse_html_document(response).await
    }

    fn picker_ocs(html: &Html) -> Vec<String> {
        select_texts(html, "#trip-picker a[data-trip-id] p.font-semibold")
    }

    fn cost_form(real_km: &str, km_paid: &str, reference_value: &str) -> CostForm {
        CostForm {
            real_km: real_km.to_owned(),
            km_paid: km_paid.to_owned(),
            reference_value: reference_value.to_owned(),
        }
    }

    #[tokio::test]
    async fn selects_first_completed_trip_by_default() {
        let html = render(state(), "").await;

        assert_valid_html(&html);
        assert_eq!(
            must_get_element(&html, "h1").text().collect::<String>(),
            "Gerenciamento de Custos"
        );
        assert_eq!(picker_ocs(&html).len(), 8);
        assert_eq!(
            select_texts(&html, "#cost-panel h2"),
            ["Custos da Viagem: OC-2024-001"]
        );

        let form = must_get_element(&html, "#cost-form");
        assert_hx_endpoint(&form, &format_endpoint(endpoints::TRIP_COST_API, 1), "hx-post");
        assert_form_input_with_value(&form, "real_km", "number", "2180");
        assert_form_input_with_value(&form, "km_paid", "number", "4.5");
        assert_form_input_with_value(&form, "reference_value", "number", "12500");
        assert_eq!(
            must_get_element(&html, "[data-profit-kind]").value().attr("data-profit-kind"),
            Some("profit")
        );
    }

    #[tokio::test]
    async fn trip_without_costs_defaults_to_estimate_and_zero() {
        let html = render(state(), "trip=7").await;

        let form = must_get_element(&html, "#cost-form");
        assert_form_input_with_value(&form, "real_km", "number", "320");
        assert_form_input_with_value(&form, "km_paid", "number", "0");
        assert_form_input_with_value(&form, "reference_value", "number", "0");
        let selected = select_texts(&html, "#trip-picker a[aria-current] p.font-semibold");
        assert_eq!(selected, ["OC-2024-007"]);
    }

    #[tokio::test]
    async fn searches_by_oc_and_driver_ignoring_case() {
        let html = render(state(), "oc=oc-2024&driver=MARIA").await;

        assert_eq!(picker_ocs(&html), ["OC-2024-002", "OC-2024-006"]);
    }

    #[tokio::test]
    async fn shows_empty_states_without_trips() {
        let state = CostsState {
            store: shared_store(TripStore::new()),
        };

        let html = render(state, "").await;

        assert_eq!(
            select_texts(&html, "#trip-picker [data-empty-state]"),
            ["Nenhum resultado."]
        );
        assert_eq!(
            select_texts(&html, "div[data-empty-state] p"),
            ["Selecione uma viagem para ver os detalhes."]
        );
    }

    #[tokio::test]
    async fn saving_costs_completes_trip() {
        let state = state();

        let response = update_trip_cost_endpoint(
            State(state.clone()),
            Path(5),
            Form(cost_form("2410", "4", "10000")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            select_texts(&html, "[role='alert'] p"),
            ["Custo Atualizado!"]
        );
        assert_eq!(
            must_get_element(&html, "[data-profit-kind]").value().attr("data-profit-kind"),
            Some("profit")
        );

        let store = state.store.lock().unwrap();
        let trip = store.trip(5).unwrap();
        assert_eq!(trip.status, TripStatus::Completed);
        assert_eq!(trip.real_km, Some(2410.0));
        assert_eq!(trip.cost.unwrap().km_paid, 4.0);
    }

    #[tokio::test]
    async fn saving_costs_of_cancelled_trip_completes_it() {
        let state = state();

        update_trip_cost_endpoint(State(state.clone()), Path(3), Form(cost_form("560", "5", "2000")))
            .await;

        let store = state.store.lock().unwrap();
        assert_eq!(store.trip(3).unwrap().status, TripStatus::Completed);
    }

    #[tokio::test]
    async fn invalid_costs_are_not_saved() {
        let state = state();

        let response = update_trip_cost_endpoint(
            State(state.clone()),
            Path(5),
            Form(cost_form("2410", "-1", "10000")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_field_error(&html, "km_paid", NEGATIVE_KM_PAID);
        let form = must_get_element(&html, "#cost-form");
        assert_form_input_with_value(&form, "km_paid", "number", "-1");

        let store = state.store.lock().unwrap();
        assert_eq!(store.trip(5).unwrap().status, TripStatus::InProgress);
        assert_eq!(store.trip(5).unwrap().cost, None);
    }

    #[tokio::test]
    async fn saving_costs_of_missing_trip_is_not_found() {
        let response =
            update_trip_cost_endpoint(State(state()), Path(99), Form(cost_form("1", "1", "1")))
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn preview_shows_loss() {
        let response = preview_cost_endpoint(Form(cost_form("200", "1,5", "200"))).await;

        let html = parse_html_fragment(response).await;
        assert_eq!(
            must_get_element(&html, "[data-profit-kind]").value().attr("data-profit-kind"),
            Some("loss")
        );
    }

    #[tokio::test]
    async fn preview_counts_blank_values_as_zero() {
        let response = preview_cost_endpoint(Form(cost_form("", "", ""))).await;

        let html = parse_html_fragment(response).await;
        assert_eq!(select_texts(&html, "[data-total-cost]"), ["R$ 0,00"]);
        assert_eq!(
            must_get_element(&html, "[data-profit-kind]").value().attr("data-profit-kind"),
            Some("break-even")
        );
    }

    #[test]
    fn search_matches_substrings() {
        let store = TripStore::with_sample_data();
        let trip = store.trip(1).unwrap();
        let row = TripRow {
            trip,
            driver_name: "João Silva",
        };

        assert!(matches_search(&row, "", ""));
        assert!(matches_search(&row, "2024-001", "joão"));
        assert!(!matches_search(&row, "002", ""));
        assert!(!matches_search(&row, "", "maria"));
    }
}
