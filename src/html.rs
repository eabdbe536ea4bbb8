use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::endpoints;

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "px-4 py-2 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 focus:z-10 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700 disabled:opacity-50";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer disabled:opacity-50 disabled:no-underline";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_ERROR_STYLE: &str = "mt-1 text-sm text-red-600 dark:text-red-400";

// Card styles
pub const CARD_STYLE: &str = "w-full p-6 bg-white border border-gray-200 \
    rounded-lg shadow-sm dark:bg-gray-800 dark:border-gray-700";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Badge styles
const BADGE_BASE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold rounded-full";
pub const BADGE_BLUE_STYLE: &str = "text-blue-800 bg-blue-100 dark:bg-blue-900 dark:text-blue-300";
pub const BADGE_GREEN_STYLE: &str =
    "text-green-800 bg-green-100 dark:bg-green-900 dark:text-green-300";
pub const BADGE_RED_STYLE: &str = "text-red-800 bg-red-100 dark:bg-red-900 dark:text-red-300";
pub const BADGE_GRAY_STYLE: &str = "text-gray-800 bg-gray-100 dark:bg-gray-700 dark:text-gray-300";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub const HTMX_SCRIPT_URL: &str = "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js";
pub const HTMX_RESPONSE_TARGETS_URL: &str =
    "https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.js";
pub const TAILWIND_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4";
pub const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - LogiFlow" }

                script src=(TAILWIND_SCRIPT_URL) {}
                script src=(HTMX_SCRIPT_URL) {}
                script src=(HTMX_RESPONSE_TARGETS_URL) {}

                style
                {
                    r#"
                    .htmx-indicator {
                        display: none;
                    }

                    .htmx-request .htmx-indicator,
                    .htmx-request.htmx-indicator {
                        display: inline;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }

                script src="/static/app.js" defer {}
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900 pb-[calc(5rem+env(safe-area-inset-bottom))] lg:pb-0"
            {
                (content)

                // Alert container for error responses targeted by hx-target-error
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A full page for an HTTP error, e.g. "404", with a link back to the dashboard.
pub fn error_view(title: &str, status_code: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            div class={ (CARD_STYLE) " max-w-lg mt-16 text-center" }
            {
                p class="text-7xl font-extrabold text-blue-600 dark:text-blue-500" data-status-code=(status_code)
                {
                    (status_code)
                }

                h1 class="mt-4 text-2xl font-bold" { (description) }
                p class="mt-2 text-gray-600 dark:text-gray-400" { (fix) }

                a href=(endpoints::DASHBOARD_VIEW) class={ "inline-block mt-6 " (LINK_STYLE) }
                {
                    "Voltar ao Dashboard"
                }
            }
        }
    );

    base(title, &[], &content)
}

/// The page heading shared by every page, with optional content (e.g. a
/// link) aligned to the right.
pub fn page_header(title: &str, actions: Option<Markup>) -> Markup {
    html! {
        div class="flex flex-wrap items-center justify-between gap-4 w-full mb-6"
        {
            h1 class="text-2xl font-bold text-gray-900 dark:text-white" { (title) }

            @if let Some(actions) = actions {
                div class="flex items-center gap-2" { (actions) }
            }
        }
    }
}

/// A validation message for a single form field.
///
/// Renders nothing if `message` is `None`.
pub fn field_error(field: &str, message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p class=(FORM_ERROR_STYLE) data-field-error=(field) { (message) }
        }
    }
}

pub fn badge(text: &str, colour_style: &str) -> Markup {
    html! {
        span class={ (BADGE_BASE_STYLE) " " (colour_style) } { (text) }
    }
}

/// A spinning ring shown only while its htmx request is in flight.
pub fn loading_spinner() -> Markup {
    html! {
        span
            role="status"
            aria-label="Carregando"
            class="htmx-indicator inline-block w-4 h-4 me-2 align-middle rounded-full \
                border-2 border-current border-t-transparent animate-spin"
        {}
    }
}

/// Format `number` as Brazilian reais, e.g. "R$ 1.234,50".
pub fn format_currency(number: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("R$ ")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    if number == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "R$ 0,00".to_owned();
    }

    let formatted = to_brazilian_notation(&fmt.fmt_string(number.abs()), 2);

    if number < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Format `number` with Brazilian thousands and decimal separators, e.g. "1.234,5".
pub fn format_number(number: f64, decimals: usize) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(3))
    });

    let rounded = round_to(number.abs(), decimals);

    if rounded == 0.0 {
        return to_brazilian_notation("0", decimals);
    }

    let formatted = to_brazilian_notation(&fmt.fmt_string(rounded), decimals);

    if number < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Format a distance in kilometres, e.g. "1.250 km".
pub fn format_km(km: f64) -> String {
    let decimals = if km.fract() == 0.0 { 0 } else { 1 };
    format!("{} km", format_number(km, decimals))
}

fn round_to(number: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (number * factor).round() / factor
}

/// Convert a number formatted with ',' thousands separators and a '.' decimal
/// point into the Brazilian convention, padding or truncating the fraction to
/// exactly `decimals` digits.
///
/// numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3".
fn to_brazilian_notation(formatted: &str, decimals: usize) -> String {
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted, ""));
    let mut result = integer.replace(',', ".");

    if decimals > 0 {
        result.push(',');
        result.extend(
            fraction
                .chars()
                .chain(std::iter::repeat('0'))
                .take(decimals),
        );
    }

    result
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE) { (text) }
    )
}
