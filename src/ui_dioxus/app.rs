use dioxus::prelude::*;

use crate::config::StoreConfig;
use crate::services::error_handling::LogHelper;
use crate::services::UserErrorFormatter;
use crate::storefront::Storefront;
use crate::ui_dioxus::router::Route;
use crate::ui_dioxus::state::AppContext;

const STYLE: &str = include_str!("../../assets/storefront.css");

#[component]
pub fn App() -> Element {
    let context = use_hook(|| {
        Storefront::open(StoreConfig::load_or_default())
            .map(AppContext::new)
            .map_err(|e| {
                LogHelper::log_error_with_context("open storefront", &e);
                UserErrorFormatter::format_for_ui(&e)
            })
    });

    match context {
        Ok(context) => {
            // Provide the storefront handles to every route
            use_context_provider(|| context);

            rsx! {
                style { {STYLE} }
                Router::<Route> {}
            }
        }
        Err(message) => rsx! {
            div {
                class: "loading-container",
                h2 { "The store could not be opened" }
                p { "{message}" }
            }
        },
    }
}
