//! The drivers page and the endpoint for registering a driver.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    driver::{Driver, DriverForm, validate_driver_form},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        field_error, page_header,
    },
    navigation::NavBar,
    store::{SharedStore, lock_store},
    validation::FieldErrors,
};

/// The state needed for the drivers page.
#[derive(Debug, Clone)]
pub struct DriversState {
    pub store: SharedStore,
}

impl FromRef<AppState> for DriversState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

pub async fn get_drivers_page(State(state): State<DriversState>) -> Result<Response, Error> {
    let store = lock_store(&state.store)?;

    Ok(drivers_view(store.drivers()).into_response())
}

/// Register a driver from the submitted form.
///
/// An invalid form is rendered again with its messages. A valid form
/// redirects to the drivers page so the new driver shows up in the table.
pub async fn create_driver_endpoint(
    State(state): State<DriversState>,
    Form(form): Form<DriverForm>,
) -> Response {
    let new_driver = match validate_driver_form(&form) {
        Ok(new_driver) => new_driver,
        Err(errors) => return driver_form_view(&form, &errors).into_response(),
    };

    let mut store = match lock_store(&state.store) {
        Ok(store) => store,
        Err(error) => return error.into_alert_response(),
    };

    store.add_driver(new_driver);

    (
        HxRedirect(endpoints::DRIVERS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn drivers_view(drivers: &[Driver]) -> Markup {
    let nav_bar = NavBar::new(endpoints::DRIVERS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-6xl"
            {
                (page_header("Gerenciamento de Motoristas", None))

                p class="mb-6 text-gray-600 dark:text-gray-400"
                {
                    "Adicione, visualize e gerencie os motoristas da sua frota."
                }

                div class="grid gap-6 lg:grid-cols-3"
                {
                    div class="lg:col-span-2" { (drivers_table(drivers)) }

                    div class=(CARD_STYLE)
                    {
                        h2 class="mb-4 text-lg font-semibold" { "Adicionar Motorista" }
                        (driver_form_view(&DriverForm::default(), &FieldErrors::new()))
                    }
                }
            }
        }
    };

    base("Motoristas", &[], &content)
}

fn drivers_table(drivers: &[Driver]) -> Markup {
    html! {
        div class="w-full overflow-x-auto rounded-lg shadow-sm"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class="px-6 py-3" { "Nome" }
                        th scope="col" class="px-6 py-3" { "CNH" }
                        th scope="col" class="px-6 py-3" { "Telefone" }
                    }
                }

                tbody
                {
                    @for driver in drivers {
                        tr class=(TABLE_ROW_STYLE) data-driver-id=(driver.id)
                        {
                            th scope="row" class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                            {
                                (driver.name)
                            }
                            td class=(TABLE_CELL_STYLE) { (driver.license_number) }
                            td class=(TABLE_CELL_STYLE) { (driver.phone) }
                        }
                    }

                    @if drivers.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="3" data-empty-state="true" class="px-6 py-4 text-center"
                            {
                                "Nenhum motorista cadastrado."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn driver_form_view(form: &DriverForm, errors: &FieldErrors) -> Markup {
    html! {
        form
            id="driver-form"
            hx-post=(endpoints::DRIVERS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Nome" }
                input
                    type="text"
                    name="name"
                    id="name"
                    placeholder="Nome completo"
                    value=(form.name)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
                (field_error("name", errors.get("name")))
            }

            div
            {
                label for="license_number" class=(FORM_LABEL_STYLE) { "Nº da CNH" }
                input
                    type="text"
                    name="license_number"
                    id="license_number"
                    inputmode="numeric"
                    placeholder="12345678901"
                    value=(form.license_number)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
                (field_error("license_number", errors.get("license_number")))
            }

            div
            {
                label for="phone" class=(FORM_LABEL_STYLE) { "Telefone" }
                input
                    type="tel"
                    name="phone"
                    id="phone"
                    placeholder="(11) 98765-4321"
                    value=(form.phone)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
                (field_error("phone", errors.get("phone")))
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Salvar Motorista" }
        }
    }
}
