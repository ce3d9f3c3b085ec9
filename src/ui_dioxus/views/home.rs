use dioxus::prelude::*;

use crate::ui_dioxus::components::ProductGrid;
use crate::ui_dioxus::router::Route;
use crate::ui_dioxus::state::use_app;

#[component]
pub fn HomeView() -> Element {
    let app = use_app();
    let featured: Vec<_> = app.catalog.featured(4).into_iter().cloned().collect();
    let deals: Vec<_> = app.catalog.discounted(4).into_iter().cloned().collect();
    let categories = app.catalog.categories().to_vec();

    rsx! {
        section {
            class: "hero",
            h1 { "Everything you need, delivered" }
            p { "Browse the catalog and check out in a couple of clicks." }
            Link { class: "btn btn-primary", to: Route::Products {}, "Shop now" }
        }

        section {
            class: "category-strip",
            for category in categories {
                div {
                    key: "{category.id}",
                    class: "category-chip",
                    title: "{category.description}",
                    "{category.name}"
                }
            }
        }

        section {
            h2 { "Featured" }
            ProductGrid { products: featured }
        }

        section {
            h2 { "Deals" }
            ProductGrid { products: deals }
        }
    }
}
