//! The route editor on the new trip form: the list of cities, the estimated
//! distance and the button that asks the route optimizer for a better order.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    alert::Alert,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, field_error, format_km, format_number, loading_spinner,
    },
    route_optimizer::{
        OptimizationObjective, OptimizedRoute, RouteOptimizer, RouteRequest, validate_route,
    },
    trip::form::{MIN_CITIES, clean_cities},
    validation::FieldErrors,
};

pub const TOO_FEW_CITIES_TO_OPTIMIZE: &str = "Por favor, insira pelo menos duas cidades.";
pub const OPTIMIZATION_FAILED: &str = "Ocorreu um erro ao otimizar a rota. Tente novamente.";

/// Separates the cities of a suggested route.
const ROUTE_ARROW: &str = " → ";

/// The state needed to optimize a route.
#[derive(Clone)]
pub struct RouteOptimizerState {
    pub route_optimizer: Arc<dyn RouteOptimizer>,
}

impl FromRef<AppState> for RouteOptimizerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            route_optimizer: state.route_optimizer.clone(),
        }
    }
}

/// The route fields of the new trip form.
///
/// The route endpoints receive the whole trip form, so unknown fields are
/// ignored.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteForm {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub estimated_km: String,
    #[serde(default)]
    pub optimize_for: String,
    /// Either "add" or "remove".
    #[serde(default)]
    pub action: String,
    /// The city to remove.
    #[serde(default)]
    pub index: String,
}

/// What the route editor shows.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct RouteEditor {
    pub cities: Vec<String>,
    pub estimated_km: String,
    pub optimize_for: OptimizationObjective,
    pub suggestion: Option<OptimizedRoute>,
    /// Shown above the route when the optimizer could not be used.
    pub alert: Option<Alert>,
}

impl RouteEditor {
    /// An editor with the given cities, padded with blank inputs so there is
    /// always room for the minimum number of cities.
    pub fn new(cities: &[String], estimated_km: &str, optimize_for: OptimizationObjective) -> Self {
        let mut cities = cities.to_vec();
        if cities.len() < MIN_CITIES {
            cities.resize(MIN_CITIES, String::new());
        }

        Self {
            cities,
            estimated_km: estimated_km.to_owned(),
            optimize_for,
            suggestion: None,
            alert: None,
        }
    }

    fn from_form(form: &RouteForm) -> Self {
        Self::new(
            &form.cities,
            &form.estimated_km,
            parse_objective(&form.optimize_for),
        )
    }

    fn add_city(&mut self) {
        self.cities.push(String::new());
    }

    /// Remove the city at `index` unless that would leave fewer than the
    /// minimum number of inputs.
    fn remove_city(&mut self, index: usize) {
        if self.cities.len() > MIN_CITIES && index < self.cities.len() {
            self.cities.remove(index);
        }
    }

    /// Replace the route with the optimizer's suggestion.
    fn apply(&mut self, suggestion: OptimizedRoute) {
        self.cities = suggestion.optimized_route.clone();
        if let Some(distance) = suggestion.total_distance_km {
            self.estimated_km = km_input_value(distance);
        }
        self.suggestion = Some(suggestion);
    }
}

fn parse_objective(value: &str) -> OptimizationObjective {
    match value.trim() {
        "time" => OptimizationObjective::Time,
        _ => OptimizationObjective::Distance,
    }
}

fn objective_form_value(objective: OptimizationObjective) -> &'static str {
    match objective {
        OptimizationObjective::Distance => "distance",
        OptimizationObjective::Time => "time",
    }
}

fn objective_label(objective: OptimizationObjective) -> &'static str {
    match objective {
        OptimizationObjective::Distance => "Menor distância",
        OptimizationObjective::Time => "Menor tempo",
    }
}

/// A distance rounded to one decimal place, written the way number inputs
/// expect it.
fn km_input_value(km: f64) -> String {
    ((km * 10.0).round() / 10.0).to_string()
}

/// Add or remove a city input and re-render the route editor.
pub async fn edit_route_endpoint(Form(form): Form<RouteForm>) -> Response {
    let mut editor = RouteEditor::from_form(&form);

    match form.action.as_str() {
        "add" => editor.add_city(),
        "remove" => match form.index.trim().parse::<usize>() {
            Ok(index) => editor.remove_city(index),
            Err(error) => tracing::warn!("Invalid city index {:?}: {error}", form.index),
        },
        action => tracing::warn!("Unknown route editor action {action:?}"),
    }

    route_editor_view(&editor, &FieldErrors::new()).into_response()
}

/// Ask the route optimizer for a better order for the entered cities.
///
/// On success the cities and estimated km are replaced by the suggestion. On
/// failure the route is left as the user entered it.
pub async fn optimize_route_endpoint(
    State(state): State<RouteOptimizerState>,
    Form(form): Form<RouteForm>,
) -> Response {
    let mut editor = RouteEditor::from_form(&form);
    let mut errors = FieldErrors::new();

    let cities = clean_cities(&form.cities);
    if cities.len() < MIN_CITIES {
        errors.add("route", TOO_FEW_CITIES_TO_OPTIMIZE);
        return route_editor_view(&editor, &errors).into_response();
    }

    let request = RouteRequest {
        cities,
        optimize_for: editor.optimize_for,
    };

    match state
        .route_optimizer
        .optimize(&request)
        .await
        .and_then(validate_route)
    {
        Ok(suggestion) => {
            tracing::info!(
                "Optimized route of {} cities: {:?}",
                request.cities.len(),
                suggestion.optimized_route
            );
            editor.apply(suggestion);
        }
        Err(error) => {
            tracing::warn!("Could not optimize route {:?}: {error}", request.cities);
            editor.alert = Some(Alert::error("Erro na otimização", OPTIMIZATION_FAILED));
        }
    }

    route_editor_view(&editor, &errors).into_response()
}

/// Render the route editor.
///
/// `errors` may hold messages for "cities", "estimated_km" and "route".
pub(crate) fn route_editor_view(editor: &RouteEditor, errors: &FieldErrors) -> Markup {
    let can_remove = editor.cities.len() > MIN_CITIES;

    html! {
        fieldset id="route-editor" class="space-y-4"
        {
            legend class=(FORM_LABEL_STYLE) { "Rota" }

            @if let Some(alert) = &editor.alert {
                (alert.clone().into_html())
            }

            ol class="space-y-2"
            {
                @for (index, city) in editor.cities.iter().enumerate() {
                    li class="flex items-center gap-2" data-city-index=(index)
                    {
                        input
                            type="text"
                            name="cities"
                            value=(city)
                            placeholder={ "Cidade " (index + 1) }
                            aria-label={ "Cidade " (index + 1) }
                            class=(FORM_TEXT_INPUT_STYLE);

                        button
                            type="button"
                            hx-post=(endpoints::TRIP_ROUTE_API)
                            hx-target="#route-editor"
                            hx-swap="outerHTML"
                            hx-vals=(format!(r#"{{"action": "remove", "index": "{index}"}}"#))
                            disabled[!can_remove]
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Remover"
                        }
                    }
                }
            }

            (field_error("cities", errors.get("cities")))

            button
                type="button"
                hx-post=(endpoints::TRIP_ROUTE_API)
                hx-target="#route-editor"
                hx-swap="outerHTML"
                hx-vals=r#"{"action": "add"}"#
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Adicionar Cidade"
            }

            div
            {
                label for="estimated_km" class=(FORM_LABEL_STYLE) { "KM Estimado" }
                input
                    type="number"
                    name="estimated_km"
                    id="estimated_km"
                    min="0"
                    step="0.1"
                    value=(editor.estimated_km)
                    class=(FORM_TEXT_INPUT_STYLE);
                (field_error("estimated_km", errors.get("estimated_km")))
            }

            div class="flex flex-wrap items-end gap-2"
            {
                div
                {
                    label for="optimize_for" class=(FORM_LABEL_STYLE) { "Otimizar por" }
                    select name="optimize_for" id="optimize_for" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for objective in [OptimizationObjective::Distance, OptimizationObjective::Time] {
                            option
                                value=(objective_form_value(objective))
                                selected[objective == editor.optimize_for]
                            {
                                (objective_label(objective))
                            }
                        }
                    }
                }

                button
                    type="button"
                    hx-post=(endpoints::OPTIMIZE_ROUTE_API)
                    hx-target="#route-editor"
                    hx-swap="outerHTML"
                    hx-disabled-elt="this"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    (loading_spinner())
                    "Otimizar Rota"
                }
            }

            (field_error("route", errors.get("route")))

            @if let Some(suggestion) = &editor.suggestion {
                (suggestion_view(suggestion))
            }
        }
    }
}

fn suggestion_view(suggestion: &OptimizedRoute) -> Markup {
    html! {
        div class=(CARD_STYLE) data-route-suggestion="true"
        {
            h3 class="mb-2 font-semibold" { "Rota Sugerida" }
            p data-suggested-route="true" { (suggestion.optimized_route.join(ROUTE_ARROW)) }

            dl class="grid grid-cols-2 gap-2 mt-2 text-sm"
            {
                @if let Some(distance) = suggestion.total_distance_km {
                    dt class="font-medium" { "Distância Total" }
                    dd data-total-distance="true" { (format_km(distance)) }
                }

                @if let Some(hours) = suggestion.total_time_hours {
                    dt class="font-medium" { "Tempo Estimado" }
                    dd data-total-time="true" { (format_number(hours, 1)) " h" }
                }
            }

            @if !suggestion.explanation.is_empty() {
                p class="mt-2 text-sm text-gray-600 dark:text-gray-400" { (suggestion.explanation) }
            }
        }
    }
}
