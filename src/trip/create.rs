//! The page and endpoint for creating a trip.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    dates::format_iso_date,
    driver::Driver,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base, field_error, page_header,
    },
    navigation::NavBar,
    route_optimizer::OptimizationObjective,
    store::{SharedStore, lock_store},
    timezone::current_local_date,
    trip::{
        Product,
        form::{TripForm, UNKNOWN_DRIVER, validate_trip_form},
        route::{RouteEditor, route_editor_view},
    },
    validation::FieldErrors,
};

/// The state needed to create a trip.
#[derive(Debug, Clone)]
pub struct NewTripState {
    pub store: SharedStore,
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTripState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the new trip page with the start date set to today.
pub async fn get_new_trip_page(State(state): State<NewTripState>) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let form = TripForm {
        start_date: format_iso_date(today),
        ..Default::default()
    };

    let store = lock_store(&state.store)?;
    let nav_bar = NavBar::new(endpoints::TRIPS_VIEW).into_html();
    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-2xl"
            {
                (page_header("Criar Nova Viagem", Some(html! {
                    a href=(endpoints::TRIPS_VIEW) class=(LINK_STYLE) { "Voltar" }
                })))

                (trip_form_view(&form, store.drivers(), &FieldErrors::new()))
            }
        }
    };

    Ok(base("Nova Viagem", &[], &content).into_response())
}

/// Create a planned trip from the submitted form.
///
/// An invalid form is rendered again with a message under each invalid
/// field. A valid form redirects to the trips page.
pub async fn create_trip_endpoint(
    State(state): State<NewTripState>,
    Form(form): Form<TripForm>,
) -> Response {
    let mut store = match lock_store(&state.store) {
        Ok(store) => store,
        Err(error) => return error.into_alert_response(),
    };

    let new_trip = match validate_trip_form(&form) {
        Ok(new_trip) => new_trip,
        Err(errors) => {
            tracing::debug!("Rejected trip form: {errors:?}");
            return trip_form_view(&form, store.drivers(), &errors).into_response();
        }
    };

    match store.add_trip(new_trip) {
        Ok(_) => (
            HxRedirect(endpoints::TRIPS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UnknownDriver(driver_id)) => {
            tracing::warn!("Trip form referenced unknown driver {driver_id}");
            let mut errors = FieldErrors::new();
            errors.add("driver_id", UNKNOWN_DRIVER);
            trip_form_view(&form, store.drivers(), &errors).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn trip_form_view(form: &TripForm, drivers: &[Driver], errors: &FieldErrors) -> Markup {
    let route_editor = RouteEditor::new(
        &form.cities,
        &form.estimated_km,
        OptimizationObjective::default(),
    );

    html! {
        form
            id="trip-form"
            hx-post=(endpoints::TRIPS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="oc" class=(FORM_LABEL_STYLE) { "Ordem de Carga (OC)" }
                input
                    type="text"
                    name="oc"
                    id="oc"
                    placeholder="OC-2024-001"
                    value=(form.oc)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
                (field_error("oc", errors.get("oc")))
            }

            div
            {
                label for="driver_id" class=(FORM_LABEL_STYLE) { "Motorista" }
                select name="driver_id" id="driver_id" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[form.driver_id.is_empty()] { "Selecione um motorista" }

                    @for driver in drivers {
                        @let value = driver.id.to_string();
                        option value=(value) selected[form.driver_id.trim() == value] { (driver.name) }
                    }
                }
                (field_error("driver_id", errors.get("driver_id")))
            }

            div class="grid gap-4 sm:grid-cols-3"
            {
                div
                {
                    label for="product" class=(FORM_LABEL_STYLE) { "Produto" }
                    select name="product" id="product" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[form.product.is_empty()] { "Selecione" }

                        @for product in Product::ALL {
                            option
                                value=(product.as_str())
                                selected[form.product.trim() == product.as_str()]
                            {
                                (product.label())
                            }
                        }
                    }
                    (field_error("product", errors.get("product")))
                }

                div
                {
                    label for="sacks" class=(FORM_LABEL_STYLE) { "Quantidade de Sacos" }
                    input
                        type="number"
                        name="sacks"
                        id="sacks"
                        min="1"
                        step="1"
                        value=(form.sacks)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error("sacks", errors.get("sacks")))
                }

                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "Data de Início" }
                    input
                        type="date"
                        name="start_date"
                        id="start_date"
                        value=(form.start_date)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error("start_date", errors.get("start_date")))
                }
            }

            (route_editor_view(&route_editor, errors))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Criar Viagem" }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use scraper::Selector;

    use crate::{
        endpoints,
        store::TripStore,
        test_utils::{
            assert_field_error, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_hx_redirect, assert_no_field_errors, assert_status_ok,
            assert_valid_html, must_get_element, must_get_form, parse_html_document,
            parse_html_fragment, shared_store,
        },
        trip::{
            Product, TripStatus,
            form::{MISSING_OC, TOO_FEW_CITIES, TripForm, UNKNOWN_DRIVER},
        },
    };

    use super::{NewTripState, create_trip_endpoint, get_new_trip_page};

    fn state(store: TripStore) -> NewTripState {
        NewTripState {
            store: shared_store(store),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn valid_form() -> TripForm {
        TripForm {
            oc: "OC-2024-100".to_owned(),
            driver_id: "3".to_owned(),
            product: "milho".to_owned(),
            sacks: "500".to_owned(),
            start_date: "2024-06-10".to_owned(),
            estimated_km: "980".to_owned(),
            cities: vec!["Sinop".to_owned(), "Cuiabá".to_owned()],
        }
    }

    #[tokio::test]
    async fn renders_new_trip_form() {
        let response = get_new_trip_page(State(state(TripStore::with_sample_data())))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            must_get_element(&html, "h1").text().collect::<String>(),
            "Criar Nova Viagem"
        );

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRIPS_API, "hx-post");
        assert_form_input(&form, "oc", "text");
        assert_form_input(&form, "sacks", "number");
        assert_form_input(&form, "start_date", "date");
        assert_form_input(&form, "estimated_km", "number");
        assert_form_submit_button_with_text(&form, "Criar Viagem");

        let driver_options = html
            .select(&Selector::parse("#driver_id option").unwrap())
            .count();
        assert_eq!(driver_options, 5);
        let city_inputs = html
            .select(&Selector::parse("input[name='cities']").unwrap())
            .count();
        assert_eq!(city_inputs, 2);
        let start_date = must_get_element(&html, "input[name='start_date']");
        assert!(!start_date.value().attr("value").unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn creates_planned_trip_and_redirects() {
        let state = state(TripStore::with_sample_data());

        let response = create_trip_endpoint(State(state.clone()), Form(valid_form()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::TRIPS_VIEW);

        let store = state.store.lock().unwrap();
        let trip = store.trips().last().unwrap();
        assert_eq!(trip.id, 9);
        assert_eq!(trip.oc, "OC-2024-100");
        assert_eq!(trip.product, Product::Milho);
        assert_eq!(trip.status, TripStatus::Planned);
        assert_eq!(trip.cities, ["Sinop", "Cuiabá"]);
    }

    #[tokio::test]
    async fn invalid_form_is_rendered_with_errors() {
        let state = state(TripStore::with_sample_data());
        let form = TripForm {
            oc: "  ".to_owned(),
            cities: vec!["Sinop".to_owned()],
            ..valid_form()
        };

        let response = create_trip_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_field_error(&html, "oc", MISSING_OC);
        assert_field_error(&html, "cities", TOO_FEW_CITIES);
        assert_eq!(state.store.lock().unwrap().trips().len(), 8);

        let selected_driver = must_get_element(&html, "#driver_id option[selected]");
        assert_eq!(selected_driver.value().attr("value"), Some("3"));
    }

    #[tokio::test]
    async fn unknown_driver_is_a_field_error() {
        let state = state(TripStore::with_sample_data());
        let form = TripForm {
            driver_id: "42".to_owned(),
            ..valid_form()
        };

        let response = create_trip_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_field_error(&html, "driver_id", UNKNOWN_DRIVER);
        assert_eq!(state.store.lock().unwrap().trips().len(), 8);
    }

    #[tokio::test]
    async fn empty_store_rejects_every_driver() {
        let state = state(TripStore::new());

        let response = create_trip_endpoint(State(state), Form(valid_form())).await;

        let html = parse_html_fragment(response).await;
        assert_field_error(&html, "driver_id", UNKNOWN_DRIVER);
        let other_errors = html
            .select(&Selector::parse("[data-field-error]:not([data-field-error='driver_id'])").unwrap())
            .count();
        assert_eq!(other_errors, 0);
    }

    #[tokio::test]
    async fn page_has_no_errors_initially() {
        let response = get_new_trip_page(State(state(TripStore::new())))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_no_field_errors(&html);
    }
}
