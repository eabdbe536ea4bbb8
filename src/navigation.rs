//! The navigation bar shown at the top of every page, and as a tab bar at
//! the bottom of the screen on small displays.

use maud::{Markup, html};

use crate::{endpoints, html::BUTTON_SECONDARY_STYLE};

/// The sections of the app, in the order they appear in the navigation bar.
const SECTIONS: [(&str, &str); 4] = [
    (endpoints::DASHBOARD_VIEW, "Dashboard"),
    (endpoints::TRIPS_VIEW, "Viagens"),
    (endpoints::DRIVERS_VIEW, "Motoristas"),
    (endpoints::COSTS_VIEW, "Custos"),
];

const DESKTOP_LINK_STYLE: &str = "py-2 px-3 rounded-sm text-gray-900 \
    hover:text-blue-700 dark:text-white dark:hover:text-blue-500";
const DESKTOP_CURRENT_LINK_STYLE: &str = "py-2 px-3 rounded-sm font-semibold \
    text-blue-700 dark:text-blue-500";
const TAB_LINK_STYLE: &str = "flex items-center justify-center rounded-lg px-2.5 py-2 \
    text-xs font-semibold text-gray-600 hover:text-blue-700 dark:text-gray-300";
const TAB_CURRENT_LINK_STYLE: &str = "flex items-center justify-center rounded-lg px-2.5 py-2 \
    text-xs font-semibold bg-blue-50 text-blue-700 dark:bg-blue-900/30 dark:text-blue-200";

/// A link to a section of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SectionLink {
    url: &'static str,
    title: &'static str,
    is_current: bool,
}

impl SectionLink {
    fn view(self, style: &str, current_style: &str) -> Markup {
        html! {
            a
                href=(self.url)
                class=(if self.is_current { current_style } else { style })
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        }
    }
}

pub struct NavBar {
    links: [SectionLink; 4],
}

impl NavBar {
    /// Get the navigation bar with the link for `active_endpoint`, if any,
    /// marked as the current page.
    pub fn new(active_endpoint: &str) -> Self {
        Self {
            links: SECTIONS.map(|(url, title)| SectionLink {
                url,
                title,
                is_current: url == active_endpoint,
            }),
        }
    }

    pub fn into_html(self) -> Markup {
        html! {
            header class="bg-white border-b border-gray-200 dark:bg-gray-900 dark:border-gray-700"
            {
                nav class="flex items-center justify-between max-w-screen-xl gap-4 p-4 mx-auto"
                {
                    a href=(endpoints::ROOT) class="text-2xl font-semibold dark:text-white"
                    {
                        "LogiFlow"
                    }

                    ul class="hidden lg:flex items-center gap-6 font-medium"
                    {
                        @for link in self.links {
                            li { (link.view(DESKTOP_LINK_STYLE, DESKTOP_CURRENT_LINK_STYLE)) }
                        }
                    }

                    a href=(endpoints::NEW_TRIP_VIEW) class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Nova Viagem"
                    }
                }
            }

            nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden" aria-label="Seções"
            {
                ul
                    class="grid grid-cols-4 gap-2 px-4 py-3 mx-4 mb-4 rounded-xl border
                    border-gray-200 bg-white/95 shadow-lg dark:border-gray-700 dark:bg-gray-900/95"
                {
                    @for link in self.links {
                        li class="min-w-0" { (link.view(TAB_LINK_STYLE, TAB_CURRENT_LINK_STYLE)) }
                    }
                }
            }
        }
    }
}
